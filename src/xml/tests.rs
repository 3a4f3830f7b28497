//! Tests for XML response helpers

use super::*;

const USERS_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<tsResponse xmlns="http://tableau.com/api">
  <pagination pageNumber="1" pageSize="100" totalAvailable="2"/>
  <users>
    <user id="u1" name="alice" siteRole="Creator" lastLogin="2024-01-01T12:00:00Z">
      <domain name="local"/>
    </user>
    <user id="u2" name="bob" siteRole="Viewer"/>
  </users>
</tsResponse>"#;

const ERROR_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<tsResponse xmlns="http://tableau.com/api">
  <error code="404002">
    <summary>Resource Not Found</summary>
    <detail>User 'x' could not be found.</detail>
  </error>
</tsResponse>"#;

#[test]
fn test_find_ignores_namespace() {
    let doc = parse(USERS_XML).unwrap();
    let pagination = find(doc.root_element(), "pagination").unwrap();
    assert_eq!(attr_u64(pagination, "totalAvailable"), Some(2));
}

#[test]
fn test_find_all_in_document_order() {
    let doc = parse(USERS_XML).unwrap();
    let names: Vec<_> = find_all(doc.root_element(), "user")
        .filter_map(|n| attr(n, "name"))
        .collect();
    assert_eq!(names, vec!["alice", "bob"]);
}

#[test]
fn test_nested_attr_and_datetime() {
    let doc = parse(USERS_XML).unwrap();
    let alice = find(doc.root_element(), "user").unwrap();
    assert_eq!(nested_attr(alice, "domain", "name"), Some("local".to_string()));
    let login = attr_datetime(alice, "lastLogin").unwrap();
    assert_eq!(login.to_rfc3339(), "2024-01-01T12:00:00+00:00");
}

#[test]
fn test_parse_error_block() {
    let err = parse_error(ERROR_XML).unwrap();
    assert_eq!(err.code, "404002");
    assert_eq!(err.summary, "Resource Not Found");
    assert_eq!(err.detail, "User 'x' could not be found.");
    assert!(parse_error(USERS_XML).is_none());
}

#[test]
fn test_non_xml_detection() {
    assert!(is_xml(USERS_XML));
    assert!(!is_xml("<html><body>Wrong site</body>"));
    assert!(parse("not xml").is_err());
}
