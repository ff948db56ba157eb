//! Substitution map: search key -> replacement value for one patch pass.

use crate::error::PatchError;
use serde::Serialize;
use std::fmt;

/// Replacement value. Integers are never quoted in JSON-like targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubstitutionValue {
    Text(String),
    Integer(i64),
}

impl fmt::Display for SubstitutionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubstitutionValue::Text(s) => f.write_str(s),
            SubstitutionValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for SubstitutionValue {
    fn from(value: &str) -> Self {
        SubstitutionValue::Text(value.to_string())
    }
}

impl From<String> for SubstitutionValue {
    fn from(value: String) -> Self {
        SubstitutionValue::Text(value)
    }
}

impl From<i64> for SubstitutionValue {
    fn from(value: i64) -> Self {
        SubstitutionValue::Integer(value)
    }
}

impl From<u16> for SubstitutionValue {
    fn from(value: u16) -> Self {
        SubstitutionValue::Integer(i64::from(value))
    }
}

/// Insertion-ordered key/value rules for one target file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionMap {
    entries: Vec<(String, SubstitutionValue)>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule; an existing key keeps its position and takes the new value.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<SubstitutionValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&SubstitutionValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubstitutionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reject empty keys and keys that are substrings of one another.
    ///
    /// Overlapping keys would let the same line match more than one rule, with
    /// the winner decided by insertion order.
    pub fn validate(&self) -> Result<(), PatchError> {
        for (i, (outer, _)) in self.entries.iter().enumerate() {
            if outer.is_empty() {
                return Err(PatchError::EmptyKey);
            }
            for (j, (inner, _)) in self.entries.iter().enumerate() {
                if i != j && !inner.is_empty() && outer.contains(inner.as_str()) {
                    return Err(PatchError::OverlappingKeys {
                        outer: outer.clone(),
                        inner: inner.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for SubstitutionMap
where
    K: Into<String>,
    V: Into<SubstitutionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SubstitutionMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
