use chrono::NaiveDate;

use crate::clustering::Cluster;
use crate::export::columns::EXPORT_COLUMNS;

/// One member record flattened into `(header, value)` cells in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub cells: Vec<(&'static str, String)>,
}

impl ExportRow {
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(_, v)| v.as_str())
    }
}

/// Projects a cluster's members into export rows, one per member.
pub fn format_for_export(cluster: &Cluster) -> Vec<ExportRow> {
    cluster
        .members
        .iter()
        .map(|record| ExportRow {
            cells: EXPORT_COLUMNS
                .iter()
                .map(|c| (c.header, c.field.extract(record)))
                .collect(),
        })
        .collect()
}

/// `PM_Route_<CITY_WITH_UNDERSCORES>_<YYYY-MM-DD>.<ext>`, built from the
/// normalized display city.
pub fn export_filename(cluster: &Cluster, date: NaiveDate, ext: &str) -> String {
    let city: String = cluster
        .city
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();

    format!("PM_Route_{}_{}.{}", city, date.format("%Y-%m-%d"), ext)
}
