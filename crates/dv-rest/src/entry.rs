//! Entry addressing: primary keys, alternate keys, and value quoting.

use std::fmt;

/// One record from a Dataverse table, as an opaque field mapping.
///
/// The entity shape is caller-defined per table; this crate imposes no
/// schema on it.
pub type Entry = serde_json::Map<String, serde_json::Value>;

/// A value used to address an entry through an alternate key.
///
/// OData key literals quote text with single quotes and leave numbers and
/// booleans bare; `Display` renders the correctly-quoted form.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValue {
    /// Textual value, rendered single-quoted.
    Text(String),
    /// Integer value, rendered bare.
    Int(i64),
    /// Boolean value, rendered bare.
    Bool(bool),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Embedded single quotes are doubled per the OData literal grammar
            KeyValue::Text(value) => write!(f, "'{}'", value.replace('\'', "''")),
            KeyValue::Int(value) => write!(f, "{value}"),
            KeyValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        KeyValue::Text(value.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        KeyValue::Text(value)
    }
}

impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        KeyValue::Int(value)
    }
}

impl From<i32> for KeyValue {
    fn from(value: i32) -> Self {
        KeyValue::Int(value.into())
    }
}

impl From<bool> for KeyValue {
    fn from(value: bool) -> Self {
        KeyValue::Bool(value)
    }
}

/// How a single entry is addressed within a table.
///
/// `Display` renders the content of the parenthesized URL segment:
/// the bare id for primary keys, `key=value` for alternate keys.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryKey {
    /// Primary key: the opaque entry id, emitted as-is.
    Id(String),
    /// Alternate key: a named unique field and its typed value.
    Alternate { key: String, value: KeyValue },
}

impl EntryKey {
    /// Address an entry by its primary id.
    pub fn id(id: impl Into<String>) -> Self {
        EntryKey::Id(id.into())
    }

    /// Address an entry by an alternate key.
    pub fn alternate(key: impl Into<String>, value: impl Into<KeyValue>) -> Self {
        EntryKey::Alternate {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKey::Id(id) => write!(f, "{id}"),
            EntryKey::Alternate { key, value } => write!(f, "{key}={value}"),
        }
    }
}

impl From<&str> for EntryKey {
    fn from(id: &str) -> Self {
        EntryKey::Id(id.to_string())
    }
}

impl From<String> for EntryKey {
    fn from(id: String) -> Self {
        EntryKey::Id(id)
    }
}
