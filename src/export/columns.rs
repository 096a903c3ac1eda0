//! Fixed column schema for route exports.

use crate::records::MaintenanceRecord;

/// Record field backing an export column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportField {
    SerialNumber,
    Customer,
    Address,
    City,
    State,
    Zip,
    Phone,
    Contact,
    Make,
    Model,
    UnitNumber,
    Frequency,
    LastService,
    NextDue,
    DaysUntilDue,
    Technician,
    Status,
    Comments,
}

impl ExportField {
    /// Renders the field as a cell value. Missing values become `""`.
    pub fn extract(self, r: &MaintenanceRecord) -> String {
        let text = |v: &Option<String>| v.as_deref().unwrap_or("").to_string();

        match self {
            ExportField::SerialNumber => text(&r.serial_number),
            ExportField::Customer => text(&r.customer),
            ExportField::Address => text(&r.address),
            // Raw city: the cluster already carries the normalized one.
            ExportField::City => text(&r.city),
            ExportField::State => text(&r.state),
            ExportField::Zip => text(&r.zip),
            ExportField::Phone => text(&r.phone),
            ExportField::Contact => text(&r.contact),
            ExportField::Make => text(&r.make),
            ExportField::Model => text(&r.model),
            ExportField::UnitNumber => text(&r.unit_number),
            ExportField::Frequency => text(&r.frequency),
            ExportField::LastService => text(&r.last_service_date),
            ExportField::NextDue => text(&r.next_due_date),
            ExportField::DaysUntilDue => r.days_until_due.map(|d| d.to_string()).unwrap_or_default(),
            ExportField::Technician => text(&r.technician),
            ExportField::Status => text(&r.status),
            ExportField::Comments => text(&r.comments),
        }
    }
}

/// One export column: header text, spreadsheet width hint, and source field.
#[derive(Debug, Clone, Copy)]
pub struct ExportColumn {
    pub header: &'static str,
    pub width: f64,
    pub field: ExportField,
}

const fn col(header: &'static str, width: f64, field: ExportField) -> ExportColumn {
    ExportColumn { header, width, field }
}

/// Column order and widths for every route export.
pub static EXPORT_COLUMNS: [ExportColumn; 18] = [
    col("Serial Number", 16.0, ExportField::SerialNumber),
    col("Customer", 30.0, ExportField::Customer),
    col("Address", 32.0, ExportField::Address),
    col("City", 18.0, ExportField::City),
    col("State", 7.0, ExportField::State),
    col("Zip", 10.0, ExportField::Zip),
    col("Phone", 15.0, ExportField::Phone),
    col("Contact", 20.0, ExportField::Contact),
    col("Make", 14.0, ExportField::Make),
    col("Model", 16.0, ExportField::Model),
    col("Unit Number", 12.0, ExportField::UnitNumber),
    col("Frequency", 12.0, ExportField::Frequency),
    col("Last Service", 13.0, ExportField::LastService),
    col("Next Due", 13.0, ExportField::NextDue),
    col("Days Until Due", 14.0, ExportField::DaysUntilDue),
    col("Technician", 20.0, ExportField::Technician),
    col("Status", 10.0, ExportField::Status),
    col("Comments", 40.0, ExportField::Comments),
];

/// Header row in column order.
pub fn headers() -> impl Iterator<Item = &'static str> {
    EXPORT_COLUMNS.iter().map(|c| c.header)
}
