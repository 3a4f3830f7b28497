//! Tests for auth module

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;

const SIGN_IN_RESPONSE: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<tsResponse xmlns="http://tableau.com/api">
  <credentials token="tok-123" estimatedTimeToExpiration="365:00:00">
    <site id="site-1" contentUrl="sales"/>
    <user id="user-1"/>
  </credentials>
</tsResponse>"#;

// ============================================================================
// Request Body Tests
// ============================================================================

#[test]
fn test_password_request_xml() {
    let auth = TableauAuth::password("admin", "s3cret", "sales");
    assert_eq!(
        auth.to_request_xml().unwrap(),
        r#"<tsRequest><credentials name="admin" password="s3cret"><site contentUrl="sales"/></credentials></tsRequest>"#
    );
}

#[test]
fn test_token_request_xml_default_site() {
    let auth = TableauAuth::personal_access_token("ci", "abc", "");
    assert_eq!(
        auth.to_request_xml().unwrap(),
        r#"<tsRequest><credentials personalAccessTokenName="ci" personalAccessTokenSecret="abc"><site contentUrl=""/></credentials></tsRequest>"#
    );
}

#[test]
fn test_jwt_request_with_impersonation() {
    let auth = TableauAuth::jwt("eyJ", "").impersonate("user-9");
    assert_eq!(
        auth.to_request_xml().unwrap(),
        r#"<tsRequest><credentials jwt="eyJ"><site contentUrl=""/><user id="user-9"/></credentials></tsRequest>"#
    );
}

#[test]
fn test_switch_site_request_xml() {
    assert_eq!(
        switch_site_request_xml("marketing").unwrap(),
        r#"<tsRequest><site contentUrl="marketing"/></tsRequest>"#
    );
}

#[test]
fn test_debug_hides_secrets() {
    let auth = TableauAuth::password("admin", "s3cret", "");
    let debug = format!("{auth:?}");
    assert!(debug.contains("admin"));
    assert!(!debug.contains("s3cret"));
    assert_eq!(auth.display_name(), "admin");
}

// ============================================================================
// Session Tests
// ============================================================================

#[test]
fn test_session_from_xml() {
    let session = Session::from_xml(SIGN_IN_RESPONSE).unwrap();
    assert_eq!(session.token, "tok-123");
    assert_eq!(session.site_id, "site-1");
    assert_eq!(session.site_content_url, "sales");
    assert_eq!(session.user_id, "user-1");
    assert!(!format!("{session:?}").contains("tok-123"));
}

#[test]
fn test_session_without_token_fails() {
    let body = r#"<tsResponse xmlns="http://tableau.com/api"><credentials/></tsResponse>"#;
    assert!(matches!(
        Session::from_xml(body),
        Err(Error::FailedSignIn { .. })
    ));
}

#[test]
fn test_credentials_deserialize_from_yaml() {
    let yaml = "type: personal_access_token\ntoken_name: ci\ntoken_value: abc\n";
    let creds: Credentials = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(
        creds,
        Credentials::PersonalAccessToken {
            token_name: "ci".into(),
            token_value: "abc".into(),
        }
    );
}
