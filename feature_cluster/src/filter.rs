//! Matching of feature property bags against filters.

use geojson::JsonObject;
use serde_json::{Number, Value};

use crate::bins::bin_key;
use crate::error::ClusterError;

/// Match rule applied to a feature's properties.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every key must be present with a strictly equal value.
    Properties(JsonObject),
    /// The key must be present, with any value.
    HasKey(String),
    /// Every sub-filter must match.
    All(Vec<Filter>),
}

impl Filter {
    pub fn properties(bag: JsonObject) -> Self {
        Filter::Properties(bag)
    }

    pub fn has_key<S: Into<String>>(key: S) -> Self {
        Filter::HasKey(key.into())
    }

    pub fn all(filters: Vec<Filter>) -> Self {
        Filter::All(filters)
    }

    /// True when the filter places no constraint on properties.
    pub fn matches_all(&self) -> bool {
        match self {
            Filter::Properties(bag) => bag.is_empty(),
            Filter::HasKey(_) => false,
            Filter::All(filters) => filters.iter().all(Filter::matches_all),
        }
    }

    /// Tests a property bag against this filter. `None` behaves as `{}`.
    pub fn matches(&self, properties: Option<&JsonObject>) -> bool {
        apply_filter(properties, self)
    }

    fn from_array_element(value: &Value) -> Result<Self, ClusterError> {
        match value {
            Value::String(key) => Ok(Filter::HasKey(key.clone())),
            Value::Number(_) => Ok(Filter::HasKey(bin_key(value))),
            Value::Object(_) | Value::Array(_) => Filter::try_from(value),
            other => Err(invalid(other)),
        }
    }
}

impl From<JsonObject> for Filter {
    fn from(bag: JsonObject) -> Self {
        Filter::Properties(bag)
    }
}

impl TryFrom<&Value> for Filter {
    type Error = ClusterError;

    /// Objects become [`Filter::Properties`]; arrays become [`Filter::All`]
    /// over keys, objects or nested arrays. Anything else is rejected.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(bag) => Ok(Filter::Properties(bag.clone())),
            Value::Array(items) => items
                .iter()
                .map(Filter::from_array_element)
                .collect::<Result<Vec<_>, _>>()
                .map(Filter::All),
            other => Err(invalid(other)),
        }
    }
}

impl TryFrom<Value> for Filter {
    type Error = ClusterError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Filter::try_from(&value)
    }
}

fn invalid(value: &Value) -> ClusterError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    log::debug!("rejecting filter {}", value);
    ClusterError::InvalidInput(format!("filter must be an object or array, got {}", kind))
}

/// Strict equality between two property values.
///
/// Scalars compare by value and numbers compare numerically. Arrays and
/// objects compare by identity, which two separately owned values never
/// share, so they are never equal.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        _ => false,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Returns true if every key in `filter` is in `properties` with a strictly
/// equal value. An empty filter matches any properties.
pub fn properties_contains_filter(properties: &JsonObject, filter: &JsonObject) -> bool {
    filter.iter().all(|(key, expected)| {
        properties
            .get(key)
            .is_some_and(|actual| strict_equals(actual, expected))
    })
}

/// Dispatches `filter` against `properties`.
pub fn apply_filter(properties: Option<&JsonObject>, filter: &Filter) -> bool {
    let empty = JsonObject::new();
    let properties = properties.unwrap_or(&empty);
    match filter {
        Filter::Properties(bag) => properties_contains_filter(properties, bag),
        Filter::HasKey(key) => properties.contains_key(key),
        Filter::All(filters) => filters.iter().all(|f| apply_filter(Some(properties), f)),
    }
}
