use csv::QuoteStyle;
use std::path::Path;
use transfer_index_core::{model::TransferIndex, SweepPoint};

use super::fs_ops::create_output_file;
use crate::app::TransferAppError;

/// column label for a sweep point. only the parameters that vary across the sweep are
/// named: `100m`, `6min` or `100m_6min`.
pub fn sweep_label(point: &SweepPoint, vary_radius: bool, vary_minutes: bool) -> String {
    match (vary_radius, vary_minutes) {
        (_, false) => format!("{}m", point.buffer_radius),
        (false, true) => format!("{}min", point.max_transfer_minutes),
        (true, true) => format!("{}m_{}min", point.buffer_radius, point.max_transfer_minutes),
    }
}

/// writes one row per rail stop with one count column per sweep point.
///
/// every index must come from the same schedule snapshot, so all of them hold the same
/// rail stops; the first index supplies stop ids and names.
pub fn write_sweep_csv(
    results: &[(String, TransferIndex)],
    output_directory: &Path,
    filename: &str,
    overwrite: bool,
) -> Result<(), TransferAppError> {
    let first = match results.first() {
        Some((_, index)) => index,
        None => {
            log::warn!("no sweep results, not writing {filename}");
            return Ok(());
        }
    };
    let file = match create_output_file(output_directory, filename, overwrite)? {
        Some(file) => file,
        None => return Ok(()),
    };
    let to_error = |e: csv::Error| TransferAppError::WriteError {
        path: output_directory.join(filename),
        message: format!("failure writing csv row: {e}"),
    };
    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(file);

    let mut header = vec![String::from("stop_id"), String::from("stop_name")];
    header.extend(results.iter().map(|(label, _)| label.clone()));
    writer.write_record(&header).map_err(to_error)?;

    for (stop_id, entry) in first.entries.iter() {
        let mut record = vec![stop_id.clone(), entry.name.clone()];
        for (label, index) in results.iter() {
            let count = index.route_count(stop_id).ok_or_else(|| {
                TransferAppError::InternalError(format!(
                    "sweep result '{label}' is missing rail stop '{stop_id}'"
                ))
            })?;
            record.push(count.to_string());
        }
        writer.write_record(&record).map_err(to_error)?;
    }
    writer.flush().map_err(|e| TransferAppError::WriteError {
        path: output_directory.join(filename),
        message: format!("failure flushing csv: {e}"),
    })?;
    log::info!(
        "wrote {} rows x {} sweep columns to {filename}",
        first.len(),
        results.len()
    );
    Ok(())
}
