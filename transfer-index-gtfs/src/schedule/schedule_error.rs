use itertools::Itertools;
use transfer_index_core::TransferError;

#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
    #[error("Failed to parse gtfs feed into `Gtfs` struct: {0}")]
    BundleRead(#[from] gtfs_structures::Error),
    #[error("failure reading stop_times.txt: {0}")]
    StopTimesRead(#[from] csv::Error),
    #[error("failure reading GTFS zip archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("failure downloading GTFS feed: {0}")]
    Download(String),
    #[error("error due to dataset contents: {0}")]
    InvalidData(String),
    #[error("GTFS archive is malformed: {0}")]
    MalformedGtfs(String),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error("errors encountered during batch processing: {0}")]
    BatchProcessing(String),
}

pub fn batch_processing_error(errors: &[ScheduleError]) -> ScheduleError {
    let concatenated = errors.iter().map(|e| e.to_string()).join("\n  ");
    ScheduleError::BatchProcessing(format!("[\n  {concatenated}\n]"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_batch_processing_error_lists_every_error() {
        let errors = vec![
            ScheduleError::InvalidData(String::from("first")),
            ScheduleError::MalformedGtfs(String::from("second")),
        ];
        let msg = batch_processing_error(&errors).to_string();
        assert!(msg.contains("error due to dataset contents: first"));
        assert!(msg.contains("GTFS archive is malformed: second"));
    }
}
