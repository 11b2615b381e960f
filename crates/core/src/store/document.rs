//! Generic document representation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Collections read by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Employees, drivers included (role-tagged).
    Funcionarios,
    /// Sellers.
    Vendedores,
    /// Served cities.
    Cidades,
    /// Fleet vehicles.
    Veiculos,
    /// Delivery routes.
    Rotas,
    /// Time-off requests.
    Folgas,
}

impl Collection {
    /// Every collection, in the order the stats are reported.
    pub const ALL: [Self; 6] = [
        Self::Funcionarios,
        Self::Vendedores,
        Self::Cidades,
        Self::Veiculos,
        Self::Rotas,
        Self::Folgas,
    ];

    /// Collection name as stored.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Funcionarios => "funcionarios",
            Self::Vendedores => "vendedores",
            Self::Cidades => "cidades",
            Self::Veiculos => "veiculos",
            Self::Rotas => "rotas",
            Self::Folgas => "folgas",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown collection: {s}"))
    }
}

/// Native store timestamp: seconds and nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTimestamp {
    /// Whole seconds since the epoch.
    pub seconds: i64,
    /// Sub-second nanoseconds.
    pub nanos: u32,
}

impl StoreTimestamp {
    /// Creates a store timestamp from a date.
    #[must_use]
    pub fn from_date(date: DateTime<Utc>) -> Self {
        Self {
            seconds: date.timestamp(),
            nanos: date.timestamp_subsec_nanos(),
        }
    }

    /// Converts to a date, or `None` when out of the representable range.
    #[must_use]
    pub fn to_date(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanos)
    }
}

/// A single stored field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Text(String),
    /// Native store timestamp.
    Timestamp(StoreTimestamp),
    /// Date value.
    Date(DateTime<Utc>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<StoreTimestamp> for FieldValue {
    fn from(value: StoreTimestamp) -> Self {
        Self::Timestamp(value)
    }
}

/// One scanned document: a key plus its fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned key, unique within the collection.
    pub key: String,
    /// Named fields.
    pub fields: BTreeMap<String, FieldValue>,
}

impl Document {
    /// Creates an empty document with the given key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns a field, treating explicit nulls as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .get(name)
            .filter(|value| !matches!(value, FieldValue::Null))
    }

    /// Returns a non-blank text field.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FieldValue::Text(text) if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns the first present field among `names`.
    #[must_use]
    pub fn first_of(&self, names: &[&str]) -> Option<&FieldValue> {
        names.iter().find_map(|name| self.get(name))
    }
}
