//! Request parameter parsing.
//!
//! Query-string pairs come first, then the fields of the JSON body (when the
//! request has one). Lookups return the first occurrence, so the query
//! string takes precedence over the body.

use thiserror::Error;

use crate::value::{decode, to_canonical, CodecError, Value};

#[derive(Debug, Error)]
pub enum ParamError {
    #[error("malformed request body: {0}")]
    Decode(#[from] CodecError),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("malformed query string: {0}")]
    Query(String),
}

/// Name/value parameters handed to a route handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge query parameters with the decoded, normalized body.
    pub fn parse(query: &[(String, String)], body: Option<&[u8]>) -> Result<Self, ParamError> {
        let mut entries: Vec<(String, Value)> = query
            .iter()
            .map(|(k, v)| (k.clone(), Value::Text(v.clone())))
            .collect();

        if let Some(bytes) = body.filter(|b| !b.is_empty()) {
            match to_canonical(decode(bytes)?) {
                Value::Map(fields) => entries.extend(fields),
                _ => return Err(ParamError::NotAnObject),
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical map view; the first occurrence of each name wins.
    pub fn to_value(&self) -> Value {
        let mut map = std::collections::BTreeMap::new();
        for (k, v) in &self.entries {
            map.entry(k.clone()).or_insert_with(|| v.clone());
        }
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_query_only() {
        let p = Params::parse(&query(&[("page", "2")]), None).unwrap();
        assert_eq!(p.text("page"), Some("2"));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_body_fields_are_canonical() {
        let body = br#"{"name":"bob","address":{"city":"Oslo"},"tags":[]}"#;
        let p = Params::parse(&[], Some(body.as_slice())).unwrap();
        assert_eq!(p.text("name"), Some("bob"));
        assert_eq!(
            p.get("address"),
            Some(&Value::map([("city", Value::from("Oslo"))]))
        );
        assert_eq!(p.get("tags"), Some(&Value::List(vec![])));
    }

    #[test]
    fn test_query_takes_precedence() {
        let p = Params::parse(&query(&[("id", "q")]), Some(br#"{"id":"b","x":1}"#.as_slice())).unwrap();
        assert_eq!(p.text("id"), Some("q"));
        assert_eq!(p.len(), 3);
        assert_eq!(p.to_value().as_map().and_then(|m| m.get("id")), Some(&Value::from("q")));
    }

    #[test]
    fn test_empty_body_is_no_body() {
        assert!(Params::parse(&[], Some(b"".as_slice())).unwrap().is_empty());
        assert!(Params::parse(&[], Some(b"{}".as_slice())).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(Params::parse(&[], Some(b"{nope".as_slice())), Err(ParamError::Decode(_))));
        assert!(matches!(Params::parse(&[], Some(b"[1,2]".as_slice())), Err(ParamError::NotAnObject)));
    }
}
