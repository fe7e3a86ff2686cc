//! # dataverse-api
//!
//! A Microsoft Dataverse (Dynamics 365) Web API client library for Rust.
//!
//! This library provides environment-based configuration, Azure AD token
//! acquisition, and a thin OData client for entry lookups and filtered
//! queries.
//!
//! ## Security
//!
//! This library is designed with security in mind:
//! - Sensitive data (passwords, tokens) are redacted in Debug output
//! - Tracing/logging skips credential parameters
//! - Credentials travel in request bodies, never in URLs
//!
//! ## Crates
//!
//! - **dataverse-auth** - `DATAVERSE_*` environment configuration and Azure
//!   AD token acquisition
//! - **dataverse-rest** - Web API client: entry lookup by primary or
//!   alternate key, `$filter` queries, create/update
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dataverse_api::{DataverseConfig, DataverseRestClient, EntryKey};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Settings from DATAVERSE_* environment variables
//!     let config = DataverseConfig::from_env()?;
//!
//!     // Acquires a token and builds the client
//!     let client = DataverseRestClient::connect(&config).await?;
//!
//!     // Look up one entry by alternate key
//!     let mouse = client
//!         .get_entry("crb81_mouses", EntryKey::alternate("crb81_mouse_id", 614i64))
//!         .await?;
//!     println!("{}", serde_json::Value::Object(mouse));
//!
//!     // Filtered query
//!     let males = client.query("crb81_mouses", "crb81_sex eq 1").await?;
//!     for entry in &males.value {
//!         println!("{:?}", entry.get("crb81_mouse_id"));
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export member crates for convenient access
pub use dataverse_auth as auth;
pub use dataverse_rest as rest;

// Re-export commonly used types at the top level
pub use dataverse_auth::{DataverseConfig, TokenClient, TokenResponse};
pub use dataverse_rest::{
    ClientConfig, DataverseRestClient, Entry, EntryKey, KeyValue, QueryResult,
};
