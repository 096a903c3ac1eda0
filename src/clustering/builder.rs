use tracing::{debug, warn};

use crate::clustering::normalize::normalize;
use crate::clustering::types::{ClusterAccumulator, ClusterKey, ClusterMap};
use crate::records::MaintenanceRecord;

/// Groups records into clusters keyed by normalized city and state.
///
/// Records whose status is neither Overdue nor Due Soon are dropped and
/// counted in [`ClusterMap::stats`]. Every other record lands in exactly one
/// accumulator. Keys come out in first-seen order; sorting is left to
/// [`aggregate`](crate::clustering::aggregate::aggregate).
pub fn build_clusters(records: &[MaintenanceRecord]) -> ClusterMap {
    let mut map = ClusterMap::default();

    for record in records {
        let Some(status) = record.pm_status() else {
            map.stats.dropped_status += 1;
            debug!(
                record_id = %record.id,
                status = ?record.status,
                "Dropping record with unclusterable status"
            );
            continue;
        };

        let city = normalize(record.city.as_deref());
        let state = record.state_code();
        let key = ClusterKey::new(&city, &state);

        map.entry_or_insert_with(key, |key| ClusterAccumulator::new(key, city.clone(), state))
        .push(record.clone(), status);

        map.stats.accepted += 1;
    }

    if map.stats.dropped_status > 0 {
        warn!(
            dropped = map.stats.dropped_status,
            accepted = map.stats.accepted,
            "Records dropped by status filter"
        );
    }

    map
}
