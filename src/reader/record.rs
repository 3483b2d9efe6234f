//! Raw record representation yielded by record sources.
//!
//! A record is an insertion-ordered mapping of field name to string value.
//! Sources reading files without a header row use positional field names
//! ("0", "1", ...). The empty record doubles as the exhaustion sentinel.

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{Error, Result};

/// One unit of raw data yielded by a record source.
///
/// Field order follows the column order of the backing resource and is
/// preserved through iteration and serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create a record from ordered (name, value) pairs
    pub fn from_pairs(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// The empty sentinel record returned by exhausted sources
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// Look up a field value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Field names in column order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Iterate over (name, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Ordered (name, value) pairs, cloned for display layers
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.fields.clone()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether this is the empty sentinel record
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert the raw field mapping into a typed value.
    ///
    /// Goes through a JSON intermediate, so the target type drives the
    /// interpretation of each string field the way serde defines it.
    pub fn denormalize<T: DeserializeOwned>(&self) -> Result<T> {
        let value = serde_json::to_value(self).map_err(|source| Error::Denormalization {
            reason: "record fields cannot be represented as JSON".to_string(),
            source,
        })?;

        serde_json::from_value(value).map_err(|source| Error::Denormalization {
            reason: "record fields do not match the target type".to_string(),
            source,
        })
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
