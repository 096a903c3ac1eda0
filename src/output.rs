//! Output formatting for planned clusters.
//!
//! Supports pretty-printing, JSON serialization, and a CSV summary file.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::clustering::{Cluster, PlanSummary};
use csv::WriterBuilder;
use std::fs::File;

/// One line of the cluster summary CSV.
#[derive(Debug, Serialize)]
struct ClusterSummaryRow<'a> {
    cluster: &'a str,
    city: &'a str,
    state: &'a str,
    total: usize,
    overdue: usize,
    due_soon: usize,
    most_overdue_days: Option<i64>,
    postal_codes: String,
}

impl<'a> From<&'a Cluster> for ClusterSummaryRow<'a> {
    fn from(c: &'a Cluster) -> Self {
        Self {
            cluster: c.key.as_str(),
            city: &c.city,
            state: &c.state,
            total: c.total,
            overdue: c.overdue,
            due_soon: c.due_soon,
            most_overdue_days: c.most_overdue_days,
            postal_codes: c.postal_codes.join(" "),
        }
    }
}

/// JSON shape of a full plan.
#[derive(Serialize)]
struct PlanView<'a> {
    summary: &'a PlanSummary,
    clusters: &'a [Cluster],
}

/// Logs one line per cluster followed by the plan totals.
pub fn print_pretty(clusters: &[Cluster], summary: &PlanSummary) {
    for c in clusters {
        info!(
            cluster = %c.key,
            total = c.total,
            overdue = c.overdue,
            due_soon = c.due_soon,
            most_overdue_days = ?c.most_overdue_days,
            postal_codes = %c.postal_codes.join(" "),
            "Cluster"
        );
    }

    info!(
        clusters = summary.clusters,
        records = summary.records,
        overdue = summary.overdue,
        due_soon = summary.due_soon,
        dropped_status = summary.dropped_status,
        malformed = summary.malformed,
        "Plan summary"
    );
}

/// Serializes the plan as pretty-printed JSON.
pub fn plan_json(clusters: &[Cluster], summary: &PlanSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(&PlanView { summary, clusters })?)
}

/// Writes one summary row per cluster to a CSV file, replacing any existing file.
pub fn write_summary_csv(path: &str, clusters: &[Cluster]) -> Result<()> {
    debug!(path, rows = clusters.len(), "Writing cluster summary CSV");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for cluster in clusters {
        writer.serialize(ClusterSummaryRow::from(cluster))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::plan;
    use crate::records::MaintenanceRecord;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample() -> (Vec<Cluster>, PlanSummary) {
        let record = |city: &str, zip: &str| MaintenanceRecord {
            city: Some(city.to_string()),
            state: Some("MN".to_string()),
            status: Some("Overdue".to_string()),
            zip: Some(zip.to_string()),
            ..Default::default()
        };
        let (clusters, _) = plan(&[record("St Paul", "55101"), record("Duluth", "55802")]);
        let summary = PlanSummary::from_clusters(&clusters);
        (clusters, summary)
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        let (clusters, summary) = sample();
        print_pretty(&clusters, &summary);
    }

    #[test]
    fn test_plan_json_shape() {
        let (clusters, summary) = sample();
        let json: serde_json::Value = serde_json::from_str(&plan_json(&clusters, &summary).unwrap()).unwrap();

        assert_eq!(json["summary"]["clusters"], 2);
        assert_eq!(json["clusters"][0]["key"], "DULUTH, MN");
        assert_eq!(json["clusters"][1]["postal_codes"][0], "55101");
    }

    #[test]
    fn test_write_summary_csv() {
        let path = temp_path("pm_route_planner_test_summary.csv");
        let _ = fs::remove_file(&path);

        let (clusters, _) = sample();
        write_summary_csv(&path, &clusters).unwrap();
        write_summary_csv(&path, &clusters).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        // Rewritten, not appended: 1 header + 2 clusters
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("cluster,city,state,total"));
        assert!(lines[2].starts_with("\"SAINT PAUL, MN\""));

        fs::remove_file(&path).unwrap();
    }
}
