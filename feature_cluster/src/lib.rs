//! Grouping, traversal and retrieval of GeoJSON features by property value.
//!
//! Features are binned by the string form of a chosen property (see
//! [`bin_key`]). Bins keep the order in which their key first appears and
//! each bin keeps the original order of its features.

pub mod bins;
pub mod collection;
pub mod error;
pub mod filter;
pub mod projection;
pub mod retrieval;
pub mod traversal;

pub use bins::{bin_key, create_bins, Bin, BinTable};
pub use error::{ClusterError, Result};
pub use filter::{apply_filter, properties_contains_filter, strict_equals, Filter};
pub use projection::filter_properties;
pub use retrieval::{get_cluster, get_cluster_with};
pub use traversal::{cluster_each, cluster_fold, cluster_reduce, clusters, Cluster, Clusters};
