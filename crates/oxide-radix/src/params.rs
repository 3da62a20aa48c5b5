//! Path parameters extracted during a lookup.

use std::ops::Index;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, RouterError};

/// A single URL parameter, consisting of a key and a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Param {
    /// Name of the `:name` or `*name` segment, without the sigil.
    pub key: String,
    /// The matched slice of the request path.
    pub value: String,
}

impl Param {
    /// Creates a new parameter.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered path parameters, in the left-to-right order their wildcards
/// appear in the matched pattern.
///
/// A carrier can be reused across requests: [`Params::reset`] drops the
/// previous bindings but keeps the allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params {
    params: Vec<Param>,
}

impl Params {
    /// Creates new empty path params.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty path params able to hold `capacity` entries without
    /// reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            params: Vec::with_capacity(capacity),
        }
    }

    /// Appends a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push(Param::new(key, value));
    }

    /// Gets the value of the first parameter with the given name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Gets a parameter value or returns an error.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MissingParam`] if no parameter has that name.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| RouterError::MissingParam(key.to_string()))
    }

    /// Parses a parameter as a specific type.
    #[must_use]
    pub fn parse<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|p| (p.key.as_str(), p.value.as_str()))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no parameters were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Clears all bindings while retaining the allocated capacity.
    pub fn reset(&mut self) {
        self.params.clear();
    }

    /// Drops every binding after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.params.truncate(len);
    }

    /// Returns the allocated capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.params.capacity()
    }
}

impl Index<usize> for Params {
    type Output = Param;

    fn index(&self, index: usize) -> &Param {
        &self.params[index]
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_params() {
        let mut params = Params::new();
        params.push("id", "123");
        params.push("name", "test");

        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.parse::<i64>("id"), Some(123));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_params_keep_insertion_order() {
        let mut params = Params::new();
        params.push("b", "2");
        params.push("a", "1");

        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(params[0], Param::new("b", "2"));
    }

    #[test]
    fn test_require_missing() {
        let params = Params::new();
        let err = params.require("id").unwrap_err();
        assert!(matches!(err, RouterError::MissingParam(ref k) if k == "id"));
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut params = Params::with_capacity(4);
        params.push("id", "1");
        params.push("slug", "hello");
        let capacity = params.capacity();

        params.reset();

        assert!(params.is_empty());
        assert_eq!(params.get("id"), None);
        assert_eq!(params.capacity(), capacity);
    }

    #[test]
    fn test_params_serialize_as_list() {
        let mut params = Params::new();
        params.push("id", "42");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!([{"key": "id", "value": "42"}]));
    }
}
