//! Route exports: flattening a cluster into rows and writing them out.

pub mod columns;
pub mod formatter;
pub mod spreadsheet;

pub use columns::{EXPORT_COLUMNS, ExportColumn, ExportField};
pub use formatter::{ExportRow, export_filename, format_for_export};
pub use spreadsheet::{ExportFormat, render_cluster, save_cluster, write_csv, write_xlsx};
