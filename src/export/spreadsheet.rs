//! CSV and XLSX writers for route exports.

use chrono::NaiveDate;
use csv::WriterBuilder;
use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::clustering::Cluster;
use crate::error::{PlanError, PlanResult};
use crate::export::columns::{EXPORT_COLUMNS, headers};
use crate::export::formatter::{ExportRow, export_filename, format_for_export};

/// Spreadsheet flavour to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Writes a header row and then `rows` as CSV.
pub fn write_csv<W: Write>(writer: W, rows: &[ExportRow]) -> PlanResult<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(headers())?;
    for row in rows {
        writer.write_record(row.values())?;
    }
    writer.flush()?;

    Ok(())
}

/// Renders `rows` into an in-memory XLSX workbook with a bold, frozen header
/// and the fixed column widths.
pub fn write_xlsx(rows: &[ExportRow]) -> PlanResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("PM Route")?;

    for (col, column) in EXPORT_COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, column.width)?;
        worksheet.write_string_with_format(0, col, column.header, &bold)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (i, row) in rows.iter().enumerate() {
        let r = worksheet_row(i)?;
        for (col, value) in row.values().enumerate() {
            worksheet.write_string(r, col as u16, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Worksheet row for the `index`th data row; row 0 holds the header.
fn worksheet_row(index: usize) -> PlanResult<u32> {
    index
        .checked_add(1)
        .and_then(|r| u32::try_from(r).ok())
        .ok_or_else(|| PlanError::Export(format!("row {index} exceeds worksheet limits")))
}

/// Renders one cluster in `format`, returning the file body.
pub fn render_cluster(cluster: &Cluster, format: ExportFormat) -> PlanResult<Vec<u8>> {
    let rows = format_for_export(cluster);
    match format {
        ExportFormat::Csv => {
            let mut buf = Vec::new();
            write_csv(&mut buf, &rows)?;
            Ok(buf)
        }
        ExportFormat::Xlsx => write_xlsx(&rows),
    }
}

/// Writes one cluster's export into `dir`, creating it if needed.
///
/// Returns the path of the written file.
pub fn save_cluster(
    cluster: &Cluster,
    dir: &Path,
    format: ExportFormat,
    date: NaiveDate,
) -> PlanResult<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(export_filename(cluster, date, format.extension()));
    debug!(cluster = %cluster.key, path = %path.display(), "Writing export");

    let body = render_cluster(cluster, format)?;
    std::fs::write(&path, body)?;

    info!(
        cluster = %cluster.key,
        rows = cluster.members.len(),
        path = %path.display(),
        "Export written"
    );
    Ok(path)
}
