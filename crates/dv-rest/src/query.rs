//! Query result envelope for OData collection responses.

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Result of a filtered query against a table.
///
/// When the service truncates the result set it includes a continuation
/// link; that link is surfaced here and never followed automatically.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryResult {
    /// OData context URL for the collection.
    #[serde(rename = "@odata.context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Continuation link for the next page, if the result was truncated.
    #[serde(rename = "@odata.nextLink", skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,

    /// The matching entries (possibly empty).
    #[serde(default)]
    pub value: Vec<Entry>,
}

impl QueryResult {
    /// Returns true if the service reported no further pages.
    pub fn is_complete(&self) -> bool {
        self.next_link.is_none()
    }
}
