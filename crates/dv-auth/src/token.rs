//! Azure AD token acquisition for the Dataverse Web API.
//!
//! One token is acquired per client construction via the OAuth 2.0
//! resource-owner password grant; there is no refresh or caching layer.

use serde::Deserialize;
use tracing::instrument;

use crate::config::DataverseConfig;
use crate::error::{Error, ErrorKind, Result};

/// Client for acquiring Dataverse access tokens from Azure AD.
#[derive(Clone)]
pub struct TokenClient {
    http_client: reqwest::Client,
}

impl std::fmt::Debug for TokenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenClient").finish_non_exhaustive()
    }
}

impl Default for TokenClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenClient {
    /// Create a new token client.
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }

    /// Acquire an access token for the config's environment.
    ///
    /// Posts the password grant to the config's Azure AD authority.
    /// Credentials travel in the form body only, never in the URL.
    #[instrument(skip(self, config))]
    pub async fn acquire_token(&self, config: &DataverseConfig) -> Result<TokenResponse> {
        self.acquire_token_from(config, &config.authority()).await
    }

    /// Acquire an access token against an explicit authority URL.
    ///
    /// `authority` is the base authority (e.g.
    /// `https://login.microsoftonline.com/{tenant}`); the v2.0 token path is
    /// appended here.
    #[instrument(skip(self, config))]
    pub async fn acquire_token_from(
        &self,
        config: &DataverseConfig,
        authority: &str,
    ) -> Result<TokenResponse> {
        let username = config.qualified_username();
        let scope = config.scope();
        let params = [
            ("grant_type", "password"),
            ("client_id", config.client_id()),
            ("scope", &scope),
            ("username", &username),
            ("password", config.password()),
        ];

        let body = serde_urlencoded::to_string(params)?;

        let response = self
            .http_client
            .post(format!("{}/oauth2/v2.0/token", authority))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        self.handle_token_response(response).await
    }

    /// Handle a token response, checking for errors.
    async fn handle_token_response(&self, response: reqwest::Response) -> Result<TokenResponse> {
        if !response.status().is_success() {
            let error: AadErrorResponse = response.json().await?;
            return Err(Error::new(ErrorKind::OAuth {
                error: error.error,
                description: error.error_description.unwrap_or_default(),
            }));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token)
    }
}

/// Successful token response from Azure AD.
///
/// Token values are redacted in Debug output.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    /// The bearer token attached to every Web API request.
    pub access_token: String,
    /// Token type, normally "Bearer".
    #[serde(default)]
    pub token_type: String,
    /// Lifetime in seconds, if Azure AD reported one.
    pub expires_in: Option<u64>,
    /// Refresh token, present when `offline_access` was granted. Surfaced
    /// for callers; this crate never uses it.
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Error payload from the Azure AD token endpoint.
#[derive(Debug, Deserialize)]
struct AadErrorResponse {
    error: String,
    error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fake_config() -> DataverseConfig {
        DataverseConfig::new("tenant-guid", "client-guid", "orgc1997c24", "svc_user", "hunter2")
            .with_user_domain("example.org")
    }

    #[tokio::test]
    async fn test_acquire_token_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth2/v2.0/token"))
            .and(body_string_contains("grant_type=password"))
            .and(body_string_contains("username=svc_user%40example.org"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "token-abc",
                "token_type": "Bearer",
                "expires_in": 3599,
                "refresh_token": "refresh-xyz"
            })))
            .mount(&mock_server)
            .await;

        let token = TokenClient::new()
            .acquire_token_from(&fake_config(), &mock_server.uri())
            .await
            .unwrap();

        assert_eq!(token.access_token, "token-abc");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, Some(3599));
        assert!(token.refresh_token.is_some());
    }

    #[tokio::test]
    async fn test_password_not_in_url() {
        let mock_server = MockServer::start().await;

        // Match on the path alone: the query string must stay empty
        Mock::given(method("POST"))
            .and(path("/oauth2/v2.0/token"))
            .respond_with(move |req: &wiremock::Request| {
                assert!(req.url.query().is_none());
                let body = String::from_utf8_lossy(&req.body).to_string();
                assert!(body.contains("password=hunter2"));
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "access_token": "t",
                    "token_type": "Bearer"
                }))
            })
            .mount(&mock_server)
            .await;

        TokenClient::new()
            .acquire_token_from(&fake_config(), &mock_server.uri())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_aad_error_surfaced() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "AADSTS50126: Error validating credentials"
            })))
            .mount(&mock_server)
            .await;

        let err = TokenClient::new()
            .acquire_token_from(&fake_config(), &mock_server.uri())
            .await
            .unwrap_err();

        match err.kind {
            ErrorKind::OAuth { error, description } => {
                assert_eq!(error, "invalid_grant");
                assert!(description.contains("AADSTS50126"));
            }
            other => panic!("expected OAuth error, got {other:?}"),
        }
    }

    #[test]
    fn test_token_response_debug_redacts() {
        let token = TokenResponse {
            access_token: "secret-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: Some(3599),
            refresh_token: Some("secret-refresh".to_string()),
        };

        let debug = format!("{token:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-token"));
        assert!(!debug.contains("secret-refresh"));
    }
}
