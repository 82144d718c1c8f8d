//! JSON persistence: one flat object of storage key → RSD.

use super::IoError;
use crate::key::StorageKey;
use crate::report::Report;
use crate::search::RsdTable;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes `table` as a JSON object, creating parent directories as needed.
pub fn write_table(path: &Path, table: &RsdTable) -> Result<(), IoError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, table)?;
    writer.flush()?;

    info!(path = %path.display(), entries = table.len(), "wrote RSD table");
    Ok(())
}

/// Reads a table written by [`write_table`].
///
/// Every key must parse as a [`StorageKey`] and every value must be a finite
/// number.
pub fn read_table(path: &Path) -> Result<RsdTable, IoError> {
    let reader = BufReader::new(File::open(path)?);
    let table: RsdTable = serde_json::from_reader(reader)?;

    for (key, rsd) in &table {
        StorageKey::parse(key)?;
        if !rsd.is_finite() {
            return Err(IoError::MalformedInput(format!("RSD for {key} is not finite")));
        }
    }

    info!(path = %path.display(), entries = table.len(), "read RSD table");
    Ok(table)
}

/// Writes a pretty-printed report.
pub fn write_report(path: &Path, report: &Report) -> Result<(), IoError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    Ok(())
}

pub fn read_report(path: &Path) -> Result<Report, IoError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
