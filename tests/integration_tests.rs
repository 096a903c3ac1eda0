use chrono::NaiveDate;
use pm_route_planner::clustering::{PlanSummary, UNKNOWN_LOCATION, find_cluster, plan};
use pm_route_planner::error::PlanError;
use pm_route_planner::export::{ExportFormat, export_filename, format_for_export, render_cluster};
use pm_route_planner::parser::parse_records;
use pm_route_planner::records::MaintenanceRecord;

fn fixture() -> &'static [u8] {
    include_bytes!("fixtures/pms_due.json")
}

#[test]
fn test_full_pipeline() {
    let parsed = parse_records(fixture()).expect("Failed to parse payload");
    assert_eq!(parsed.stats.total, 7);
    assert_eq!(parsed.stats.malformed, 1);

    let (clusters, build_stats) = plan(&parsed.records);
    assert_eq!(build_stats.accepted, 5);
    assert_eq!(build_stats.dropped_status, 1);

    let keys: Vec<_> = clusters.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["DULUTH, MN", "SAINT LOUIS, MO", "SAINT PAUL, MN", UNKNOWN_LOCATION]
    );

    let summary = PlanSummary::from_clusters(&clusters).with_diagnostics(parsed.stats, build_stats);
    assert_eq!(summary.records, 5);
    assert_eq!(summary.overdue, 3);
    assert_eq!(summary.due_soon, 2);
    assert_eq!(summary.malformed, 1);
    assert_eq!(summary.dropped_status, 1);

    for cluster in &clusters {
        assert_eq!(cluster.overdue + cluster.due_soon, cluster.members.len());
        assert!(cluster.members.iter().all(|r| r.status.as_deref() != Some("Closed")));
        assert!(cluster.postal_codes.windows(2).all(|w| w[0] < w[1]));
    }

    let st_louis = find_cluster(&clusters, "St Louis, MO").unwrap();
    assert_eq!(st_louis.most_overdue_days, Some(-40));
}

#[test]
fn test_saint_paul_scenario() {
    let record = |city: Option<&str>, state: &str, status: &str, zip: Option<&str>| MaintenanceRecord {
        city: city.map(str::to_string),
        state: Some(state.to_string()),
        status: Some(status.to_string()),
        zip: zip.map(str::to_string),
        ..Default::default()
    };

    let (clusters, _) = plan(&[
        record(Some("St. Paul"), "MN", "Overdue", Some("55101")),
        record(Some("SAINT PAUL"), "MN", "DueSoon", Some("55102")),
        record(None, "", "Overdue", None),
    ]);

    assert_eq!(clusters.len(), 2);

    let saint_paul = &clusters[0];
    assert_eq!(saint_paul.key.as_str(), "SAINT PAUL, MN");
    assert_eq!(saint_paul.members.len(), 2);
    assert_eq!(saint_paul.overdue, 1);
    assert_eq!(saint_paul.due_soon, 1);
    assert_eq!(saint_paul.postal_codes, vec!["55101", "55102"]);

    let unknown = &clusters[1];
    assert_eq!(unknown.key.as_str(), "Unknown Location");
    assert_eq!(unknown.city, "Unknown Location");
    assert_eq!(unknown.members.len(), 1);
    assert_eq!(unknown.overdue, 1);
    assert_eq!(unknown.due_soon, 0);
}

#[test]
fn test_export_selected_cluster() {
    let parsed = parse_records(fixture()).unwrap();
    let (clusters, _) = plan(&parsed.records);
    let cluster = find_cluster(&clusters, "saint paul, MN").unwrap();

    let rows = format_for_export(cluster);
    assert_eq!(rows.len(), cluster.members.len());

    let first: Vec<_> = rows[0].values().collect();
    assert_eq!(first[0], "WX-44812");
    assert_eq!(first[3], "St. Paul");
    assert_eq!(first[14], "-21");
    // Second member has no phone or serial.
    let second: Vec<_> = rows[1].values().collect();
    assert_eq!(second[0], "");
    assert_eq!(second[6], "");

    let date = NaiveDate::from_ymd_opt(2024, 4, 29).unwrap();
    assert_eq!(
        export_filename(cluster, date, ExportFormat::Xlsx.extension()),
        "PM_Route_SAINT_PAUL_2024-04-29.xlsx"
    );

    let csv = String::from_utf8(render_cluster(cluster, ExportFormat::Csv).unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn test_empty_payload_plans_nothing() {
    let parsed = parse_records(br#"{"pms": []}"#).unwrap();
    let (clusters, stats) = plan(&parsed.records);
    assert!(clusters.is_empty());
    assert_eq!(stats.accepted, 0);
}

#[test]
fn test_non_array_payload_is_invalid_input() {
    let err = parse_records(br#"{"pms": "oops"}"#).unwrap_err();
    assert!(matches!(err, PlanError::InvalidInput(_)));
}
