//! Dataverse Web API client.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Request bodies and credentials are skipped in tracing spans

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::{debug, instrument};

use dataverse_auth::{DataverseConfig, TokenClient};

use crate::config::ClientConfig;
use crate::entry::{Entry, EntryKey};
use crate::error::{Error, ErrorKind, Result};
use crate::query::QueryResult;

/// Client for basic CRUD operations on Dataverse entries.
///
/// Holds the immutable API base URL and access token; no mutable state is
/// shared between calls, so the client is `Clone` and safe to use from
/// multiple tasks. No coordination (de-duplication, rate limiting) is
/// provided, and no request is ever retried.
///
/// # Example
///
/// ```rust,ignore
/// use dataverse_rest::{DataverseRestClient, EntryKey};
///
/// let client = DataverseRestClient::new(
///     "https://orgc1997c24.crm.dynamics.com/api/data/v9.2/",
///     "access_token_here",
/// )?;
///
/// // Primary-key lookup
/// let entry = client.get_entry("crb81_mouses", "8a35a8c5-...").await?;
///
/// // Alternate-key lookup (string values are quoted, numeric are not)
/// let entry = client
///     .get_entry("crb81_mouses", EntryKey::alternate("crb81_mouse_id", 614i64))
///     .await?;
///
/// // Filtered query; the expression is passed through verbatim
/// let result = client.query("crb81_mouses", "crb81_sex eq 0").await?;
/// ```
#[derive(Clone)]
pub struct DataverseRestClient {
    http: reqwest::Client,
    api_url: String,
    access_token: String,
}

impl std::fmt::Debug for DataverseRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataverseRestClient")
            .field("api_url", &self.api_url)
            .field("access_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl DataverseRestClient {
    /// Create a new client with the given API base URL and access token.
    pub fn new(api_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(api_url, access_token, ClientConfig::default())
    }

    /// Create a new client with custom HTTP configuration.
    pub fn with_config(
        api_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(odata_headers())
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        let mut api_url = api_url.into();
        if !api_url.ends_with('/') {
            api_url.push('/');
        }

        Ok(Self {
            http,
            api_url,
            access_token: access_token.into(),
        })
    }

    /// Build a client from a [`DataverseConfig`], acquiring an access token.
    ///
    /// One token is acquired here and held for the client's lifetime; there
    /// is no refresh.
    pub async fn connect(config: &DataverseConfig) -> Result<Self> {
        Self::connect_with_config(config, ClientConfig::default()).await
    }

    /// Build a client from a [`DataverseConfig`] with custom HTTP configuration.
    pub async fn connect_with_config(
        config: &DataverseConfig,
        client_config: ClientConfig,
    ) -> Result<Self> {
        let token = TokenClient::new().acquire_token(config).await?;
        Self::with_config(config.api_url(), token.access_token, client_config)
    }

    /// Get the API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // =========================================================================
    // URL building
    // =========================================================================

    /// Build the collection URL for a table.
    pub fn collection_url(&self, table: &str) -> String {
        format!("{}{}", self.api_url, table)
    }

    /// Build the URL addressing a single entry.
    ///
    /// Primary keys render as `{table}({id})`; alternate keys as
    /// `{table}({key}={value})` with string values single-quoted.
    pub fn entry_url(&self, table: &str, key: &EntryKey) -> String {
        format!("{}{}({})", self.api_url, table, key)
    }

    /// Build the filtered-query URL for a table.
    ///
    /// The filter expression is emitted verbatim; the caller is responsible
    /// for OData-valid syntax and escaping.
    pub fn query_url(&self, table: &str, filter: &str) -> String {
        format!("{}{}?$filter={}", self.api_url, table, filter)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Get a Dataverse entry by primary id or alternate key.
    #[instrument(skip(self, key), fields(table = %table))]
    pub async fn get_entry(&self, table: &str, key: impl Into<EntryKey>) -> Result<Entry> {
        let key = key.into();
        let url = self.entry_url(table, &key);
        debug!(%url, "fetching entry");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        self.decode_response(response, &format!("{table}({key})"))
            .await
    }

    /// Query a table with an OData `$filter` expression.
    ///
    /// Returns the decoded entries, possibly empty. If the service reports a
    /// continuation link it is surfaced on the result and never followed.
    #[instrument(skip(self), fields(table = %table))]
    pub async fn query(&self, table: &str, filter: &str) -> Result<QueryResult> {
        let url = self.query_url(table, filter);
        debug!(%url, "querying table");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        self.decode_response(response, table).await
    }

    /// Add a new entry to a table, returning the created entry.
    #[instrument(skip(self, data), fields(table = %table))]
    pub async fn add_entry<T: Serialize>(&self, table: &str, data: &T) -> Result<Entry> {
        let url = self.collection_url(table);
        debug!(%url, "adding entry");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .header("Prefer", "return=representation")
            .json(data)
            .send()
            .await?;

        self.decode_response(response, table).await
    }

    /// Update an existing entry, returning the updated entry.
    #[instrument(skip(self, key, data), fields(table = %table))]
    pub async fn update_entry<T: Serialize>(
        &self,
        table: &str,
        key: impl Into<EntryKey>,
        data: &T,
    ) -> Result<Entry> {
        let key = key.into();
        let url = self.entry_url(table, &key);
        debug!(%url, "updating entry");

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.access_token)
            .header("Prefer", "return=representation")
            .json(data)
            .send()
            .await?;

        self.decode_response(response, &format!("{table}({key})"))
            .await
    }

    // =========================================================================
    // Response handling
    // =========================================================================

    /// Map a response to the decoded body or a typed error.
    ///
    /// Single choke point for status mapping: 2xx decodes, 401/403 is an
    /// auth rejection, 404 is not-found, everything else is an API error
    /// carrying the status and the original body text.
    async fn decode_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        context: &str,
    ) -> Result<T> {
        let status = response.status().as_u16();

        if response.status().is_success() {
            return response.json().await.map_err(Into::into);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status, "non-success response");

        Err(match status {
            401 | 403 => Error::new(ErrorKind::Auth {
                status,
                message: body,
            }),
            404 => {
                let detail = if body.is_empty() {
                    context.to_string()
                } else {
                    format!("{context}: {body}")
                };
                Error::new(ErrorKind::NotFound(detail))
            }
            _ => Error::new(ErrorKind::Api { status, body }),
        })
    }
}

fn odata_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("OData-MaxVersion", HeaderValue::from_static("4.0"));
    headers.insert("OData-Version", HeaderValue::from_static("4.0"));
    headers.insert("Accept", HeaderValue::from_static("application/json"));
    headers
}
