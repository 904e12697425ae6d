//! Per-cluster iteration and reduction over a feature collection.
//!
//! Every entry point builds a fresh [`BinTable`] with [`create_bins`] and
//! visits its bins in first-occurrence order. Each visit receives the cluster
//! as a new collection, the bin key and the 0-based ordinal of the bin.

use geojson::FeatureCollection;

use crate::bins::{create_bins, BinTable};
use crate::collection::subcollection;

/// One group of features sharing a bin key.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub features: FeatureCollection,
    pub key: String,
    /// Position of the bin among all bins, not a feature index.
    pub ordinal: usize,
}

impl Cluster {
    /// Number of features in the cluster.
    pub fn len(&self) -> usize {
        self.features.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.features.is_empty()
    }

    pub fn into_features(self) -> FeatureCollection {
        self.features
    }
}

/// Lazy sequence of clusters. Clone it to restart from the same position.
#[derive(Debug, Clone)]
pub struct Clusters<'a> {
    collection: &'a FeatureCollection,
    table: BinTable,
    next: usize,
}

impl Clusters<'_> {
    /// Bin table backing this sequence.
    pub fn bins(&self) -> &BinTable {
        &self.table
    }
}

impl Iterator for Clusters<'_> {
    type Item = Cluster;

    fn next(&mut self) -> Option<Cluster> {
        let bin = self.table.iter().nth(self.next)?;
        let cluster = Cluster {
            features: subcollection(self.collection, &bin.indices),
            key: bin.key.clone(),
            ordinal: self.next,
        };
        log::trace!(
            "cluster '{}' (#{}) with {} features",
            cluster.key,
            cluster.ordinal,
            cluster.len()
        );
        self.next += 1;
        Some(cluster)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Clusters<'_> {}

/// Returns the clusters of `collection` grouped by `property`.
pub fn clusters<'a>(collection: &'a FeatureCollection, property: &str) -> Clusters<'a> {
    Clusters {
        collection,
        table: create_bins(collection, property),
        next: 0,
    }
}

/// Calls `visit(cluster, key, ordinal)` for every cluster in order.
pub fn cluster_each<F>(collection: &FeatureCollection, property: &str, mut visit: F)
where
    F: FnMut(FeatureCollection, &str, usize),
{
    for cluster in clusters(collection, property) {
        visit(cluster.features, &cluster.key, cluster.ordinal);
    }
}

/// Folds every cluster into `init`, starting at ordinal 0.
///
/// Returns `init` untouched when no feature carries `property`.
pub fn cluster_fold<A, F>(collection: &FeatureCollection, property: &str, init: A, mut reduce: F) -> A
where
    F: FnMut(A, FeatureCollection, &str, usize) -> A,
{
    clusters(collection, property).fold(init, |acc, cluster| {
        reduce(acc, cluster.features, &cluster.key, cluster.ordinal)
    })
}

/// Reduces clusters using the first cluster as the initial accumulator.
///
/// The reducer is first called for ordinal 1. Returns `None` when there are
/// no clusters.
pub fn cluster_reduce<F>(
    collection: &FeatureCollection,
    property: &str,
    mut reduce: F,
) -> Option<FeatureCollection>
where
    F: FnMut(FeatureCollection, FeatureCollection, &str, usize) -> FeatureCollection,
{
    let mut iter = clusters(collection, property);
    let first = iter.next()?;
    Some(iter.fold(first.features, |acc, cluster| {
        reduce(acc, cluster.features, &cluster.key, cluster.ordinal)
    }))
}
