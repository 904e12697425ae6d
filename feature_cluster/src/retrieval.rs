//! Retrieval of the features matching a filter.

use geojson::FeatureCollection;
use serde_json::Value;

use crate::collection::from_features;
use crate::error::Result;
use crate::filter::{apply_filter, Filter};

/// Returns every feature of `collection` whose properties match `filter`.
///
/// `filter` must be a JSON object (or an array of keys and objects). Any
/// other shape is rejected with [`crate::ClusterError::InvalidInput`] instead
/// of falling back to an empty filter that would match the whole collection.
pub fn get_cluster(collection: &FeatureCollection, filter: &Value) -> Result<FeatureCollection> {
    let filter = Filter::try_from(filter)?;
    Ok(get_cluster_with(collection, &filter))
}

/// Typed form of [`get_cluster`].
pub fn get_cluster_with(collection: &FeatureCollection, filter: &Filter) -> FeatureCollection {
    let features = collection
        .features
        .iter()
        .filter(|f| apply_filter(f.properties.as_ref(), filter))
        .cloned()
        .collect::<Vec<_>>();
    log::debug!(
        "filter matched {} of {} features",
        features.len(),
        collection.features.len()
    );
    from_features(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::parse_feature_collection;
    use crate::ClusterError;
    use serde_json::json;

    fn markers() -> FeatureCollection {
        parse_feature_collection(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "geometry": null, "properties": {"cluster": 0, "marker-symbol": "circle"}},
                {"type": "Feature", "geometry": null, "properties": {"cluster": 1, "marker-symbol": "square"}},
                {"type": "Feature", "geometry": null, "properties": {"cluster": 1, "marker-symbol": "circle"}},
                {"type": "Feature", "geometry": null, "properties": null}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn intersection_of_keys() {
        let fc = markers();
        let out = get_cluster(&fc, &json!({"cluster": 1, "marker-symbol": "circle"})).unwrap();
        assert_eq!(out.features, vec![fc.features[2].clone()]);
    }

    #[test]
    fn empty_filter_returns_everything() {
        let fc = markers();
        let out = get_cluster(&fc, &json!({})).unwrap();
        assert_eq!(out.features.len(), 4);
    }

    #[test]
    fn key_array_filter() {
        let fc = markers();
        let out = get_cluster(&fc, &json!(["marker-symbol"])).unwrap();
        assert_eq!(out.features.len(), 3);
    }

    #[test]
    fn malformed_filter_is_invalid_input() {
        let fc = markers();
        assert!(matches!(
            get_cluster(&fc, &Value::Null),
            Err(ClusterError::InvalidInput(_))
        ));
        assert!(matches!(
            get_cluster(&fc, &json!("cluster")),
            Err(ClusterError::InvalidInput(_))
        ));
    }
}
