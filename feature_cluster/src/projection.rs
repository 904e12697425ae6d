//! Projection of property bags onto a subset of keys.

use geojson::JsonObject;

/// Copies the entries of `properties` whose key is listed in `keys`.
///
/// Keys missing from `properties` are skipped.
pub fn filter_properties<S: AsRef<str>>(properties: &JsonObject, keys: &[S]) -> JsonObject {
    let mut out = JsonObject::new();
    for key in keys {
        let key = key.as_ref();
        if let Some(value) = properties.get(key) {
            out.insert(key.to_string(), value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_only_listed_keys() {
        let props = json!({"cluster": 0, "marker-color": "#0ff", "name": "a"});
        let props = props.as_object().unwrap();
        let out = filter_properties(props, &["cluster", "name", "missing"][..]);
        assert_eq!(serde_json::Value::Object(out), json!({"cluster": 0, "name": "a"}));
    }

    #[test]
    fn empty_keys() {
        let props = json!({"cluster": 0});
        let keys: [&str; 0] = [];
        assert!(filter_properties(props.as_object().unwrap(), &keys[..]).is_empty());
    }
}
