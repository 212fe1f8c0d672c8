use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path};
use transfer_index_core::model::ServiceTime;

use super::schedule_error::ScheduleError;

const STOP_TIMES_FILE: &str = "stop_times.txt";
const REQUIRED_COLUMNS: [&str; 2] = ["trip_id", "stop_id"];

/// one row of stop_times.txt with its clock strings left unparsed, so that a single
/// malformed time only drops that row's event instead of the whole feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawStopTime {
    pub trip_id: String,
    pub stop_id: String,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
}

/// the readable rows of stop_times.txt and the number of rows that could not be read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StopTimeRows {
    pub rows: Vec<RawStopTime>,
    /// rows missing a field or otherwise unreadable, e.g. a truncated last line
    pub skipped_rows: usize,
}

/// outcome of parsing one of the clock fields of a [`RawStopTime`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockField {
    Valid(ServiceTime),
    Missing,
    Malformed,
}

impl RawStopTime {
    pub fn arrival(&self) -> ClockField {
        parse_clock(self.arrival_time.as_deref())
    }

    pub fn departure(&self) -> ClockField {
        parse_clock(self.departure_time.as_deref())
    }
}

fn parse_clock(value: Option<&str>) -> ClockField {
    match value.map(str::trim) {
        None | Some("") => ClockField::Missing,
        Some(s) => match ServiceTime::parse(s) {
            Some(t) => ClockField::Valid(t),
            None => ClockField::Malformed,
        },
    }
}

/// reads stop_times.txt from an extracted feed directory or a zip archive.
///
/// unreadable rows are counted and skipped. a file without the `trip_id` or `stop_id`
/// column, or an I/O failure, fails the read.
pub fn read_stop_times(feed_path: &Path) -> Result<StopTimeRows, ScheduleError> {
    if feed_path.is_dir() {
        let file = File::open(feed_path.join(STOP_TIMES_FILE))?;
        read_rows(file)
    } else {
        let mut archive = zip::ZipArchive::new(File::open(feed_path)?)?;
        // feeds are sometimes zipped with an enclosing folder
        let entry_name = archive
            .file_names()
            .find(|name| *name == STOP_TIMES_FILE || name.ends_with("/stop_times.txt"))
            .map(String::from)
            .ok_or_else(|| {
                ScheduleError::MalformedGtfs(format!(
                    "archive {} has no {STOP_TIMES_FILE}",
                    feed_path.display()
                ))
            })?;
        let entry = archive.by_name(&entry_name)?;
        read_rows(entry)
    }
}

fn read_rows<R: Read>(reader: R) -> Result<StopTimeRows, ScheduleError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ScheduleError::MalformedGtfs(format!(
                "{STOP_TIMES_FILE} has no '{column}' column"
            )));
        }
    }
    let mut result = StopTimeRows::default();
    for row in csv_reader.deserialize::<RawStopTime>() {
        match row {
            Ok(row) => result.rows.push(row),
            Err(e) if e.is_io_error() => return Err(ScheduleError::StopTimesRead(e)),
            Err(e) => {
                log::debug!("skipping unreadable {STOP_TIMES_FILE} row: {e}");
                result.skipped_rows += 1;
            }
        }
    }
    if result.skipped_rows > 0 {
        log::warn!(
            "skipped {} unreadable rows in {STOP_TIMES_FILE}",
            result.skipped_rows
        );
    }
    log::debug!("read {} rows from {STOP_TIMES_FILE}", result.rows.len());
    Ok(result)
}
