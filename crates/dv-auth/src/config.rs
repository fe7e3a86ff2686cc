//! Dataverse connection settings.
//!
//! Settings are read once from `DATAVERSE_`-prefixed environment variables
//! and held immutably for the process lifetime. Request code receives the
//! config by reference and never reads the environment itself, so tests can
//! inject fake configs built with [`DataverseConfig::new`].

use crate::error::{Error, ErrorKind, Result};
use crate::DEFAULT_API_VERSION;

/// Environment variable holding the Azure AD tenant id.
pub const ENV_TENANT_ID: &str = "DATAVERSE_TENANT_ID";
/// Environment variable holding the Azure AD application (client) id.
pub const ENV_CLIENT_ID: &str = "DATAVERSE_CLIENT_ID";
/// Environment variable holding the Dataverse organization id.
pub const ENV_ORG: &str = "DATAVERSE_ORG";
/// Environment variable holding the service account username.
pub const ENV_USERNAME: &str = "DATAVERSE_USERNAME";
/// Environment variable holding the service account password.
pub const ENV_PASSWORD: &str = "DATAVERSE_PASSWORD";
/// Optional environment variable with the domain appended to bare usernames.
pub const ENV_USER_DOMAIN: &str = "DATAVERSE_USER_DOMAIN";
/// Optional environment variable overriding the Web API version.
pub const ENV_API_VERSION: &str = "DATAVERSE_API_VERSION";

/// Configuration for a Dataverse environment.
///
/// The password is redacted in Debug output to prevent accidental exposure
/// in logs.
#[derive(Clone)]
pub struct DataverseConfig {
    tenant_id: String,
    client_id: String,
    org: String,
    username: String,
    password: String,
    user_domain: Option<String>,
    additional_scopes: Vec<String>,
    api_version: String,
}

impl std::fmt::Debug for DataverseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataverseConfig")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("org", &self.org)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("user_domain", &self.user_domain)
            .field("additional_scopes", &self.additional_scopes)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl DataverseConfig {
    /// Create a new config with the given values.
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        org: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            org: org.into(),
            username: username.into(),
            password: password.into(),
            user_domain: None,
            additional_scopes: vec!["offline_access".to_string()],
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Set the domain appended to usernames that carry none.
    pub fn with_user_domain(mut self, domain: impl Into<String>) -> Self {
        self.user_domain = Some(domain.into());
        self
    }

    /// Set the additional OAuth scopes requested alongside the API scope.
    pub fn with_additional_scopes(mut self, scopes: Vec<String>) -> Self {
        self.additional_scopes = scopes;
        self
    }

    /// Set the Web API version (e.g., "9.2").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `DATAVERSE_TENANT_ID`
    /// - `DATAVERSE_CLIENT_ID`
    /// - `DATAVERSE_ORG`
    /// - `DATAVERSE_USERNAME`
    /// - `DATAVERSE_PASSWORD`
    ///
    /// Optional:
    /// - `DATAVERSE_USER_DOMAIN` (appended to usernames without one)
    /// - `DATAVERSE_API_VERSION` (default: "9.2")
    ///
    /// A required variable that is missing or empty fails with
    /// [`ErrorKind::EnvVar`] naming the variable; no client is ever built
    /// from a partial config.
    pub fn from_env() -> Result<Self> {
        let tenant_id = required_env(ENV_TENANT_ID)?;
        let client_id = required_env(ENV_CLIENT_ID)?;
        let org = required_env(ENV_ORG)?;
        let username = required_env(ENV_USERNAME)?;
        let password = required_env(ENV_PASSWORD)?;

        let mut config = Self::new(tenant_id, client_id, org, username, password);
        if let Some(domain) = optional_env(ENV_USER_DOMAIN) {
            config = config.with_user_domain(domain);
        }
        if let Some(version) = optional_env(ENV_API_VERSION) {
            config = config.with_api_version(version);
        }

        Ok(config)
    }

    /// Get the Azure AD tenant id.
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Get the Azure AD application (client) id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Get the Dataverse organization id.
    pub fn org(&self) -> &str {
        &self.org
    }

    /// Get the configured username, without domain qualification.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Get the password (for the token request body only; never log this).
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Get the Web API version.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Base URL for the Dataverse environment.
    pub fn env_url(&self) -> String {
        format!("https://{}.crm.dynamics.com", self.org)
    }

    /// Base URL for the Dataverse Web API, with trailing slash.
    pub fn api_url(&self) -> String {
        format!("{}/api/data/v{}/", self.env_url(), self.api_version)
    }

    /// Base URL for the Azure AD authority.
    pub fn authority(&self) -> String {
        format!("https://login.microsoftonline.com/{}", self.tenant_id)
    }

    /// OAuth scope string for the Dataverse API.
    pub fn scope(&self) -> String {
        let mut scope = format!("{}/.default", self.env_url());
        for extra in &self.additional_scopes {
            scope.push(' ');
            scope.push_str(extra);
        }
        scope
    }

    /// Username with the configured domain appended when it carries none.
    pub fn qualified_username(&self) -> String {
        match &self.user_domain {
            Some(domain) if !self.username.contains('@') => {
                format!("{}@{}", self.username, domain)
            }
            _ => self.username.clone(),
        }
    }

    /// Returns true if all required fields are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.tenant_id.is_empty()
            && !self.client_id.is_empty()
            && !self.org.is_empty()
            && !self.username.is_empty()
            && !self.password.is_empty()
    }
}

fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::new(ErrorKind::EnvVar(name.to_string()))),
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
