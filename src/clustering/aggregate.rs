use crate::clustering::types::{Cluster, ClusterAccumulator, ClusterMap};

/// Materializes accumulators into finished clusters, sorted by key.
///
/// Sorting is plain byte order on the key string, so the result does not
/// depend on locale. Nothing is truncated; an empty map yields an empty vec.
pub fn aggregate(map: ClusterMap) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = map
        .into_accumulators()
        .into_iter()
        .map(finish_cluster)
        .collect();

    // Stable, so equal keys (impossible from the builder) would keep insertion order.
    clusters.sort_by(|a, b| a.key.cmp(&b.key));
    clusters
}

fn finish_cluster(acc: ClusterAccumulator) -> Cluster {
    let total = acc.overdue + acc.due_soon;
    debug_assert_eq!(total, acc.members.len(), "cluster {} count drift", acc.key);

    let most_overdue_days = acc.members.iter().filter_map(|r| r.days_until_due).min();

    Cluster {
        key: acc.key,
        city: acc.city,
        state: acc.state,
        // BTreeSet iteration is already sorted and distinct.
        postal_codes: acc.postal_codes.into_iter().collect(),
        members: acc.members,
        total,
        overdue: acc.overdue,
        due_soon: acc.due_soon,
        most_overdue_days,
    }
}
