use std::path::PathBuf;

use transfer_index_core::TransferError;
use transfer_index_gtfs::schedule::ScheduleError;

#[derive(thiserror::Error, Debug)]
pub enum TransferAppError {
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error("failure building configuration: {0}")]
    Configuration(String),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error("Error writing to '{path}': {message}")]
    WriteError { path: PathBuf, message: String },
    #[error("{0}")]
    InternalError(String),
}

impl From<config::ConfigError> for TransferAppError {
    fn from(value: config::ConfigError) -> Self {
        TransferAppError::Configuration(value.to_string())
    }
}
