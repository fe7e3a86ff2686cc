//! # dataverse-rest
//!
//! Dataverse Web API client: entry lookups, alternate keys, and filtered
//! queries.
//!
//! ## Features
//!
//! - **Entry lookup** - by primary id or alternate key, with OData quoting
//!   rules applied to key values
//! - **Filtered queries** - `$filter` expressions passed through verbatim
//! - **Entry create/update** - with the returned representation decoded
//! - **Typed errors** - auth, not-found, API, and transport failures as
//!   distinct conditions
//!
//! Entries are opaque field mappings; no schema is imposed on what a table
//! returns. There are no retries and no pagination follow-through:
//! continuation links are surfaced on [`QueryResult`], never followed.
//!
//! ## Example
//!
//! ```rust,ignore
//! use dataverse_auth::DataverseConfig;
//! use dataverse_rest::{DataverseRestClient, EntryKey};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dataverse_rest::Error> {
//!     let config = DataverseConfig::from_env()?;
//!     let client = DataverseRestClient::connect(&config).await?;
//!
//!     let mouse = client
//!         .get_entry("crb81_mouses", EntryKey::alternate("crb81_mouse_id", 614i64))
//!         .await?;
//!     println!("{}", serde_json::Value::Object(mouse));
//!
//!     let females = client.query("crb81_mouses", "crb81_sex eq 0").await?;
//!     println!("{} matches", females.value.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod entry;
mod error;
mod query;

pub use client::DataverseRestClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use entry::{Entry, EntryKey, KeyValue};
pub use error::{Error, ErrorKind, Result};
pub use query::QueryResult;

// Re-export dataverse-auth types that users need to connect
pub use dataverse_auth::{DataverseConfig, TokenClient, TokenResponse};

/// User-Agent string for the client.
pub const USER_AGENT: &str = concat!("dataverse-api/", env!("CARGO_PKG_VERSION"));
