use csv::QuoteStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use transfer_index_core::model::{TransferIndex, TransferIndexEntry};

use super::fs_ops::create_output_file;
use crate::app::TransferAppError;

/// one row of the transfer index table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferIndexRow {
    pub stop_id: String,
    pub stop_name: String,
    pub bus_xfer_routes: usize,
}

impl From<&TransferIndexEntry> for TransferIndexRow {
    fn from(entry: &TransferIndexEntry) -> Self {
        TransferIndexRow {
            stop_id: entry.stop_id.clone(),
            stop_name: entry.name.clone(),
            bus_xfer_routes: entry.distinct_route_count,
        }
    }
}

/// writes `stop_id,stop_name,bus_xfer_routes` for every rail stop, ordered by stop_id.
pub fn write_transfer_index_csv(
    index: &TransferIndex,
    output_directory: &Path,
    filename: &str,
    overwrite: bool,
) -> Result<(), TransferAppError> {
    let file = match create_output_file(output_directory, filename, overwrite)? {
        Some(file) => file,
        None => return Ok(()),
    };
    let to_error = |e: csv::Error| TransferAppError::WriteError {
        path: output_directory.join(filename),
        message: format!("failure writing csv row: {e}"),
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(file);
    if index.is_empty() {
        // serialize() only writes headers along with the first row
        writer
            .write_record(["stop_id", "stop_name", "bus_xfer_routes"])
            .map_err(to_error)?;
    }
    for entry in index.entries.values() {
        writer.serialize(TransferIndexRow::from(entry)).map_err(to_error)?;
    }
    writer.flush().map_err(|e| TransferAppError::WriteError {
        path: output_directory.join(filename),
        message: format!("failure flushing csv: {e}"),
    })?;
    log::info!("wrote {} rows to {filename}", index.len());
    Ok(())
}
