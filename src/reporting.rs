use serde::Serialize;
use std::path::Path;

use crate::error::Result;

/// One row of the run report, captured after each played round.
#[derive(Debug, Clone, Serialize)]
pub struct DayRecord {
    pub day: u32,
    pub movements_issued: usize,
    pub units_moved: f64,
    pub new_demand: usize,
    pub pending_demand: usize,
    pub missed_demand: usize,
    pub source_stock: f64,
    pub storage_stock: f64,
}

/// Writes the per-day history to a semicolon-delimited CSV file, the
/// same dialect the config tables use.
pub fn write_run_report(file_path: &Path, records: &[DayRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_path(file_path)?;

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    log::info!("Run report with {} rows written to '{}'.", records.len(), file_path.display());
    Ok(())
}
