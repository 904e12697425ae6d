//! Helpers for building and loading GeoJSON feature collections.

use std::fs;

use geojson::{Feature, FeatureCollection, GeoJson};

use crate::error::{ClusterError, Result};

/// Builds a new collection from the features at `indices`, in the given order.
///
/// Indices outside the collection are ignored.
pub fn subcollection(collection: &FeatureCollection, indices: &[usize]) -> FeatureCollection {
    let features = indices
        .iter()
        .filter_map(|&i| collection.features.get(i).cloned())
        .collect();
    from_features(features)
}

/// Wraps a list of features in a collection without bbox or foreign members.
pub fn from_features(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Parses a GeoJSON string holding a FeatureCollection.
pub fn parse_feature_collection(data: &str) -> Result<FeatureCollection> {
    let geojson = data
        .parse::<GeoJson>()
        .map_err(|e| ClusterError::Parse(e.to_string()))?;
    FeatureCollection::try_from(geojson).map_err(|e| ClusterError::Parse(e.to_string()))
}

/// Reads a GeoJSON FeatureCollection from a file.
pub fn read_feature_collection(path: &str) -> Result<FeatureCollection> {
    let data = fs::read_to_string(path)?;
    parse_feature_collection(&data)
}

/// Serializes a collection as pretty-printed GeoJSON.
pub fn to_geojson_string(collection: &FeatureCollection) -> Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_POINTS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}, "properties": {"cluster": 0}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1.0, 1.0]}, "properties": null}
        ]
    }"#;

    #[test]
    fn parse_collection() {
        let fc = parse_feature_collection(TWO_POINTS).unwrap();
        assert_eq!(fc.features.len(), 2);
        assert!(fc.features[1].properties.is_none());
    }

    #[test]
    fn parse_rejects_single_feature() {
        let single = r#"{"type": "Feature", "geometry": null, "properties": {}}"#;
        let err = parse_feature_collection(single).unwrap_err();
        assert!(matches!(err, ClusterError::Parse(_)));
    }

    #[test]
    fn subcollection_keeps_requested_order() {
        let fc = parse_feature_collection(TWO_POINTS).unwrap();
        let sub = subcollection(&fc, &[1, 0, 7]);
        assert_eq!(sub.features.len(), 2);
        assert_eq!(sub.features[0], fc.features[1]);
        assert_eq!(sub.features[1], fc.features[0]);
    }
}
