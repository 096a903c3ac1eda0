//! Plan-wide totals and cluster lookup.

use serde::Serialize;

use crate::clustering::normalize::normalize;
use crate::clustering::types::{BuildStats, Cluster, ClusterKey};
use crate::error::{PlanError, PlanResult};
use crate::parser::ParseStats;

/// Totals across every cluster in one plan.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub clusters: usize,
    pub records: usize,
    pub overdue: usize,
    pub due_soon: usize,
    pub dropped_status: usize,
    pub malformed: usize,
}

impl PlanSummary {
    pub fn from_clusters(clusters: &[Cluster]) -> Self {
        clusters.iter().fold(
            PlanSummary {
                clusters: clusters.len(),
                ..Default::default()
            },
            |mut s, c| {
                s.records += c.total;
                s.overdue += c.overdue;
                s.due_soon += c.due_soon;
                s
            },
        )
    }

    /// Attaches the diagnostic counters from parsing and building.
    pub fn with_diagnostics(mut self, parse: ParseStats, build: BuildStats) -> Self {
        self.malformed = parse.malformed;
        self.dropped_status = build.dropped_status;
        self
    }
}

/// Finds a cluster by exact key, or by a raw `"City, ST"` / `"City"` query
/// normalized the same way records are.
pub fn find_cluster<'a>(clusters: &'a [Cluster], query: &str) -> PlanResult<&'a Cluster> {
    if let Some(cluster) = clusters.iter().find(|c| c.key.as_str() == query) {
        return Ok(cluster);
    }

    let (city, state) = match query.rsplit_once(',') {
        Some((city, state)) => (city, state),
        None => (query, ""),
    };
    let wanted = ClusterKey::new(&normalize(Some(city)), state);

    clusters
        .iter()
        .find(|c| c.key == wanted)
        .ok_or_else(|| PlanError::UnknownCluster(query.to_string()))
}
