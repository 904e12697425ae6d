use assert_fs::prelude::*;
use feature_cluster::{
    collection::{read_feature_collection, to_geojson_string},
    create_bins, get_cluster, ClusterError,
};
use predicates::prelude::*;
use serde_json::json;

const LABELED: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}, "properties": {"cluster": "a"}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1.0, 0.0]}, "properties": {"cluster": "b"}},
    {"type": "Feature", "geometry": {"type": "Point", "coordinates": [2.0, 0.0]}, "properties": {"cluster": "a"}}
  ]
}"#;

#[test]
fn read_and_bin_file() {
    let file = assert_fs::NamedTempFile::new("labeled.geojson").unwrap();
    file.write_str(LABELED).unwrap();
    let fc = read_feature_collection(file.path().to_str().unwrap()).unwrap();
    let bins = create_bins(&fc, "cluster");
    assert_eq!(bins.get("a"), Some(&[0, 2][..]));
    assert_eq!(bins.get("b"), Some(&[1][..]));
}

#[test]
fn write_retrieved_cluster() {
    let dir = assert_fs::TempDir::new().unwrap();
    let input = dir.child("labeled.geojson");
    input.write_str(LABELED).unwrap();
    let fc = read_feature_collection(input.path().to_str().unwrap()).unwrap();
    let out = get_cluster(&fc, &json!({"cluster": "b"})).unwrap();
    let output = dir.child("b.geojson");
    output.write_str(&to_geojson_string(&out).unwrap()).unwrap();
    output.assert(predicate::str::contains("\"cluster\": \"b\""));
    output.assert(predicate::str::contains("\"a\"").not());
    dir.close().unwrap();
}

#[test]
fn missing_file_is_io_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    let path = dir.child("absent.geojson");
    let err = read_feature_collection(path.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ClusterError::Io(_)));
}
