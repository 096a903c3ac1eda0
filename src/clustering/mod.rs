//! Location normalization and geographic clustering.
//!
//! Records are normalized per city, grouped by city and state, then
//! aggregated into sorted clusters with per-cluster counts and postal codes.
//! Every stage is a pure function of its input; callers rebuild the plan from
//! a fresh record snapshot rather than updating it in place.

pub mod aggregate;
pub mod builder;
pub mod normalize;
pub mod summary;
pub mod types;

pub use aggregate::aggregate;
pub use builder::build_clusters;
pub use normalize::{UNKNOWN_LOCATION, normalize};
pub use summary::{PlanSummary, find_cluster};
pub use types::{BuildStats, Cluster, ClusterAccumulator, ClusterKey, ClusterMap};

use crate::records::MaintenanceRecord;

/// Runs the full pipeline over one record snapshot.
pub fn plan(records: &[MaintenanceRecord]) -> (Vec<Cluster>, BuildStats) {
    let map = build_clusters(records);
    let stats = map.stats;
    (aggregate(map), stats)
}
