//! Ordered extra-to-missing header mapping.
//!
//! Insertion order matters twice: undo always removes the newest pair, and the
//! payload sent to the merge service lists pairs in the order they were made.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Mapping from an extra header name to a missing header name.
///
/// Keys are unique and no missing header is targeted twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMapping {
    pairs: Vec<(String, String)>,
}

impl HeaderMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. Returns `false` without changes if either side is
    /// already part of another pair.
    pub fn insert(&mut self, extra: impl Into<String>, missing: impl Into<String>) -> bool {
        let extra = extra.into();
        let missing = missing.into();
        if self.contains_extra(&extra) || self.contains_missing(&missing) {
            return false;
        }
        self.pairs.push((extra, missing));
        true
    }

    /// Remove and return the most recently inserted pair.
    pub fn pop_last(&mut self) -> Option<(String, String)> {
        self.pairs.pop()
    }

    pub fn last(&self) -> Option<(&str, &str)> {
        self.pairs.last().map(|(e, m)| (e.as_str(), m.as_str()))
    }

    pub fn get(&self, extra: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(e, _)| e == extra)
            .map(|(_, m)| m.as_str())
    }

    pub fn contains_extra(&self, extra: &str) -> bool {
        self.pairs.iter().any(|(e, _)| e == extra)
    }

    pub fn contains_missing(&self, missing: &str) -> bool {
        self.pairs.iter().any(|(_, m)| m == missing)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(e, m)| (e.as_str(), m.as_str()))
    }

    pub fn extra_headers(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(e, _)| e.as_str())
    }

    pub fn missing_headers(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, m)| m.as_str())
    }
}

impl Serialize for HeaderMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (extra, missing) in &self.pairs {
            map.serialize_entry(extra, missing)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HeaderMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = HeaderMapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of extra header to missing header")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut mapping = HeaderMapping::new();
                while let Some((extra, missing)) = access.next_entry::<String, String>()? {
                    if !mapping.insert(extra.clone(), missing) {
                        return Err(serde::de::Error::custom(format!(
                            "header '{extra}' is mapped more than once"
                        )));
                    }
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

/// Body of a merge-and-download request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergePayload {
    pub mappings: HeaderMapping,
}

impl MergePayload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
