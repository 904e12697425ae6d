//! Grouping of feature indices by the value of a property.

use std::collections::HashMap;

use geojson::FeatureCollection;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Indices of all features sharing one bin key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bin {
    pub key: String,
    pub indices: Vec<usize>,
}

/// Bins in first-occurrence order of their key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinTable {
    bins: Vec<Bin>,
    positions: HashMap<String, usize>,
}

impl BinTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `index` to the bin for `key`, creating the bin at the end if needed.
    pub fn push(&mut self, key: String, index: usize) {
        match self.positions.get(&key) {
            Some(&pos) => self.bins[pos].indices.push(index),
            None => {
                self.positions.insert(key.clone(), self.bins.len());
                self.bins.push(Bin {
                    key,
                    indices: vec![index],
                });
            }
        }
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Feature indices stored under `key`.
    pub fn get(&self, key: &str) -> Option<&[usize]> {
        self.positions
            .get(key)
            .map(|&pos| self.bins[pos].indices.as_slice())
    }

    /// Bin keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bins.iter().map(|b| b.key.as_str())
    }

    /// Iterator over all bins in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bin> {
        self.bins.iter()
    }

    /// Consumes the table into ordered `(key, indices)` pairs.
    pub fn into_map(self) -> Vec<(String, Vec<usize>)> {
        self.bins.into_iter().map(|b| (b.key, b.indices)).collect()
    }
}

impl<'a> IntoIterator for &'a BinTable {
    type Item = &'a Bin;
    type IntoIter = std::slice::Iter<'a, Bin>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for BinTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.bins)
    }
}

/// Converts a property value into the string key of its bin.
///
/// Numbers and strings with the same text share a key, so `1` and `"1"` land
/// in the same bin. Floats with an integral value print without a fraction
/// and `-0.0` prints as `"0"`.
pub fn bin_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                if f == 0.0 {
                    "0".to_string()
                } else {
                    // f64 Display never uses an exponent and drops a zero fraction.
                    format!("{}", f)
                }
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(|v| match v {
                Value::Null => String::new(),
                other => bin_key(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Groups feature indices of `collection` by the value of `property`.
///
/// Features whose properties lack `property` are left out of every bin.
pub fn create_bins(collection: &FeatureCollection, property: &str) -> BinTable {
    let mut table = BinTable::new();
    let mut skipped = 0usize;
    for (index, feature) in collection.features.iter().enumerate() {
        match feature.properties.as_ref().and_then(|p| p.get(property)) {
            Some(value) => table.push(bin_key(value), index),
            None => skipped += 1,
        }
    }
    log::debug!(
        "binned {} features by '{}' into {} bins ({} without the property)",
        collection.features.len() - skipped,
        property,
        table.len(),
        skipped
    );
    table
}
