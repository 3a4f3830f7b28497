//! Integration tests using mock HTTP server
//!
//! Tests the full flow: sign in → version negotiation → gated endpoint calls → paged results

use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use tableau_server_client::http::{HttpClient, HttpClientConfig};
use tableau_server_client::models::UserItem;
use tableau_server_client::{
    ApiVersion, ClientConfig, Error, FilterArg, Pager, RequestOptions, Server, TableauAuth,
};
use wiremock::matchers::{any, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SIGN_IN_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<tsResponse xmlns="http://tableau.com/api">
  <credentials token="integration-token">
    <site id="site-42" contentUrl="finance"/>
    <user id="me"/>
  </credentials>
</tsResponse>"#;

const SERVER_INFO_XML: &str = r#"<tsResponse xmlns="http://tableau.com/api">
  <serverInfo>
    <productVersion build="20233.23.1017.0948">2023.3.0</productVersion>
    <restApiVersion>3.21</restApiVersion>
  </serverInfo>
</tsResponse>"#;

fn users_page(page: u32, size: u32, total: u32, names: &[&str]) -> String {
    let users: String = names
        .iter()
        .map(|n| format!(r#"<user id="{n}-id" name="{n}" siteRole="Explorer" lastLogin="2024-03-01T10:00:00Z"/>"#))
        .collect();
    format!(
        r#"<tsResponse xmlns="http://tableau.com/api"><pagination pageNumber="{page}" pageSize="{size}" totalAvailable="{total}"/><users>{users}</users></tsResponse>"#
    )
}

fn server_for(mock_server: &MockServer) -> Server {
    let config = HttpClientConfig::builder().max_retries(0).build();
    let http = HttpClient::with_config(config).unwrap();
    Server::with_http_client(&mock_server.uri(), http).unwrap()
}

async fn mount_sign_in(mock_server: &MockServer, version: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/api/{version}/auth/signin")))
        .and(body_string_contains("contentUrl=\"finance\""))
        .respond_with(ResponseTemplate::new(200).set_body_string(SIGN_IN_XML))
        .expect(1)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Session + version negotiation
// ============================================================================

#[tokio::test]
async fn test_sign_in_then_upgrade_version() {
    let mock_server = MockServer::start().await;
    mount_sign_in(&mock_server, "2.4").await;
    Mock::given(method("GET"))
        .and(path("/api/2.4/serverInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SERVER_INFO_XML))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/3.21/sites/site-42/users/me"))
        .and(header("X-Tableau-Auth", "integration-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<tsResponse xmlns="http://tableau.com/api"><user id="me" name="me@example.com" siteRole="SiteAdministratorCreator"/></tsResponse>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server);
    server
        .sign_in(&TableauAuth::password("me@example.com", "pw", "finance"))
        .await
        .unwrap();
    let version = server.use_server_version().await.unwrap();
    assert_eq!(version, ApiVersion::new(3, 21));

    let me = server.users().get_by_id("me").await.unwrap();
    assert_eq!(me.site_role.as_deref(), Some("SiteAdministratorCreator"));
}

// ============================================================================
// QuerySet + Pager
// ============================================================================

#[tokio::test]
async fn test_filtered_users_across_uneven_pages() {
    let mock_server = MockServer::start().await;
    mount_sign_in(&mock_server, "3.19").await;
    for (page, names) in [(1, vec!["ann", "ben"]), (2, vec!["cat", "dan"]), (3, vec!["eve"])] {
        Mock::given(method("GET"))
            .and(path("/api/3.19/sites/site-42/users"))
            .and(query_param("pageNumber", page.to_string()))
            .and(query_param("pageSize", "2"))
            .and(query_param("sort", "name:asc"))
            .and(query_param("filter", "lastLogin:gte:2024-01-01T00:00:00Z"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(users_page(page, 2, 5, &names)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let server = server_for(&mock_server);
    server.set_version(ApiVersion::new(3, 19));
    server
        .sign_in(&TableauAuth::personal_access_token("ci", "secret", "finance"))
        .await
        .unwrap();

    let users = server.users();
    let args: Vec<FilterArg> = vec!["last_login__gte=2024-01-01T00:00:00Z".parse().unwrap()];
    let query = users
        .filter_args(args)
        .unwrap()
        .order_by(&["name"])
        .unwrap()
        .page_size(2)
        .unwrap();

    let names: Vec<String> = query
        .pager()
        .unwrap()
        .into_stream()
        .map_ok(|u: UserItem| u.name.unwrap_or_default())
        .try_collect()
        .await
        .unwrap();
    assert_eq!(names, vec!["ann", "ben", "cat", "dan", "eve"]);
}

#[tokio::test]
async fn test_empty_collection_single_fetch() {
    let mock_server = MockServer::start().await;
    mount_sign_in(&mock_server, "3.19").await;
    Mock::given(method("GET"))
        .and(path("/api/3.19/sites/site-42/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string(users_page(1, 100, 0, &[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server);
    server.set_version(ApiVersion::new(3, 19));
    server
        .sign_in(&TableauAuth::jwt("header.payload.sig", "finance"))
        .await
        .unwrap();

    let users = server.users();
    let all = Pager::<UserItem>::new(&users).collect().await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_invalid_query_never_reaches_server() {
    let mock_server = MockServer::start().await;
    mount_sign_in(&mock_server, "3.19").await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server);
    server.set_version(ApiVersion::new(3, 19));
    server
        .sign_in(&TableauAuth::password("a", "b", "finance"))
        .await
        .unwrap();

    let users = server.users();
    let err = users.filter("favorite_color", "blue").unwrap_err();
    assert!(matches!(err, Error::InvalidFilterField { .. }));

    let err = RequestOptions::new().with_page_size(1001).unwrap_err();
    assert!(matches!(err, Error::InvalidPageSize { page_size: 1001 }));
}

// ============================================================================
// Version gating
// ============================================================================

#[tokio::test]
async fn test_gated_call_sends_nothing() {
    let mock_server = MockServer::start().await;
    mount_sign_in(&mock_server, "2.0").await;
    Mock::given(method("POST"))
        .and(path("/api/3.5/sites/site-42/encrypt-extracts"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let server = server_for(&mock_server);
    server.set_version(ApiVersion::new(2, 0));
    server
        .sign_in(&TableauAuth::password("a", "b", "finance"))
        .await
        .unwrap();

    let err = server.sites().encrypt_extracts("site-42").await.unwrap_err();
    assert!(matches!(err, Error::EndpointUnavailable { .. }));
    assert_eq!(
        err.to_string(),
        "sites.encrypt_extracts requires REST API version 3.5, server is on 2.0"
    );

    server.set_version(ApiVersion::new(3, 5));
    server.sites().encrypt_extracts("site-42").await.unwrap();
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_config_connect_and_sign_in() {
    let mock_server = MockServer::start().await;
    mount_sign_in(&mock_server, "3.10").await;
    Mock::given(any())
        .and(path("/api/3.10/auth/signout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("tsc.yaml");
    std::fs::write(
        &file,
        format!(
            "server: {}\nsite: finance\napi_version: \"3.10\"\nauth:\n  token_name: ci\n  token_value: secret\nhttp:\n  max_retries: 0\n",
            mock_server.uri()
        ),
    )
    .unwrap();

    let config = ClientConfig::from_file(&file).unwrap();
    let server = config.connect().unwrap();
    assert_eq!(server.version(), ApiVersion::new(3, 10));

    let session = server.sign_in(&config.credentials().unwrap()).await.unwrap();
    assert_eq!(session.site_id, "site-42");
    server.sign_out().await.unwrap();
    assert!(!server.is_signed_in());
}
