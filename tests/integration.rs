//! End-to-end tests: config -> token acquisition -> Web API calls, driven
//! against a single mock server standing in for both Azure AD and the
//! Dataverse environment.

use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dataverse_api::{DataverseConfig, DataverseRestClient, EntryKey, TokenClient};

fn fake_config() -> DataverseConfig {
    DataverseConfig::new("tenant-guid", "client-guid", "orgc1997c24", "svc_user", "hunter2")
        .with_user_domain("example.org")
}

/// Mount a token endpoint that issues `access-token-123` for the fake config.
async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth2/v2.0/token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("client_id=client-guid"))
        .and(body_string_contains("username=svc_user%40example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "access-token-123",
            "token_type": "Bearer",
            "expires_in": 3599
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn acquired_token_authorizes_entry_lookup() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/data/v9.2/crb81_mouses(crb81_mouse_id=614)"))
        .and(header("Authorization", "Bearer access-token-123"))
        .and(header("OData-MaxVersion", "4.0"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "crb81_mouse_id": 614,
            "crb81_sex": 0
        })))
        .mount(&server)
        .await;

    let config = fake_config();
    let token = TokenClient::new()
        .acquire_token_from(&config, &server.uri())
        .await
        .expect("token acquisition should succeed");

    let client = DataverseRestClient::new(
        format!("{}/api/data/v9.2/", server.uri()),
        token.access_token,
    )
    .expect("client construction should succeed");

    let entry = client
        .get_entry("crb81_mouses", EntryKey::alternate("crb81_mouse_id", 614i64))
        .await
        .expect("lookup should succeed");

    assert_eq!(entry["crb81_mouse_id"], 614);
    assert_eq!(entry["crb81_sex"], 0);
}

#[tokio::test]
async fn rejected_credentials_never_build_a_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "AADSTS50126: Error validating credentials"
        })))
        .mount(&server)
        .await;

    let err = TokenClient::new()
        .acquire_token_from(&fake_config(), &server.uri())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("invalid_grant"));
}

#[tokio::test]
async fn filter_query_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data/v9.2/crb81_mouses"))
        .and(query_param("$filter", "crb81_sex eq 0"))
        .and(header("Authorization", "Bearer t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "@odata.context": "ctx",
            "value": [
                {"crb81_mouse_id": 614},
                {"crb81_mouse_id": 615},
                {"crb81_mouse_id": 616}
            ]
        })))
        .mount(&server)
        .await;

    let client =
        DataverseRestClient::new(format!("{}/api/data/v9.2/", server.uri()), "t").unwrap();

    let result = client
        .query("crb81_mouses", "crb81_sex eq 0")
        .await
        .expect("query should succeed");

    assert_eq!(result.value.len(), 3);
    assert!(result.is_complete());
}

#[tokio::test]
async fn error_taxonomy_is_branchable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data/v9.2/mice(gone)"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/data/v9.2/mice(secret)"))
        .respond_with(ResponseTemplate::new(403).set_body_string("insufficient privileges"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/data/v9.2/mice(broken)"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&server)
        .await;

    let client =
        DataverseRestClient::new(format!("{}/api/data/v9.2/", server.uri()), "t").unwrap();

    let err = client.get_entry("mice", "gone").await.unwrap_err();
    assert!(err.is_not_found());

    let err = client.get_entry("mice", "secret").await.unwrap_err();
    assert!(err.is_auth_error());
    assert_eq!(err.status(), Some(403));

    let err = client.get_entry("mice", "broken").await.unwrap_err();
    assert!(!err.is_not_found());
    assert!(!err.is_auth_error());
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("service unavailable"));
}

#[tokio::test]
async fn create_then_update_flow() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/data/v9.2/crb81_mouses"))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "crb81_mouseid": "8a35a8c5-9371-ee11-8179-000d3a5a1234",
            "crb81_mouse_id": 617,
            "crb81_sex": 0
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(
            "/api/data/v9.2/crb81_mouses(8a35a8c5-9371-ee11-8179-000d3a5a1234)",
        ))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "crb81_mouseid": "8a35a8c5-9371-ee11-8179-000d3a5a1234",
            "crb81_mouse_id": 617,
            "crb81_sex": 1
        })))
        .mount(&server)
        .await;

    let client =
        DataverseRestClient::new(format!("{}/api/data/v9.2/", server.uri()), "t").unwrap();

    let created = client
        .add_entry(
            "crb81_mouses",
            &serde_json::json!({"crb81_mouse_id": 617, "crb81_sex": 0}),
        )
        .await
        .expect("create should succeed");

    let id = created["crb81_mouseid"].as_str().unwrap();

    let updated = client
        .update_entry("crb81_mouses", id, &serde_json::json!({"crb81_sex": 1}))
        .await
        .expect("update should succeed");

    assert_eq!(updated["crb81_sex"], 1);
}
