//! # dataverse-auth
//!
//! Configuration and authentication for the Dataverse Web API.
//!
//! This crate provides:
//! - [`DataverseConfig`] - immutable settings loaded once from
//!   `DATAVERSE_`-prefixed environment variables
//! - [`TokenClient`] - Azure AD token acquisition via the OAuth 2.0
//!   password grant
//!
//! ## Security
//!
//! - Passwords and tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Credentials travel in request bodies, never in URLs
//!
//! ## Example
//!
//! ```rust,ignore
//! use dataverse_auth::{DataverseConfig, TokenClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dataverse_auth::Error> {
//!     let config = DataverseConfig::from_env()?;
//!     let token = TokenClient::new().acquire_token(&config).await?;
//!
//!     println!("token expires in {:?}s", token.expires_in);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod token;

pub use config::{
    DataverseConfig, ENV_API_VERSION, ENV_CLIENT_ID, ENV_ORG, ENV_PASSWORD, ENV_TENANT_ID,
    ENV_USERNAME, ENV_USER_DOMAIN,
};
pub use error::{Error, ErrorKind, Result};
pub use token::{TokenClient, TokenResponse};

/// Default Dataverse Web API version.
pub const DEFAULT_API_VERSION: &str = "9.2";
