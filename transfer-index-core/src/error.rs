use crate::model::{EventKind, StopSide};

#[derive(thiserror::Error, Debug)]
pub enum TransferError {
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },
    #[error("stop_id '{stop_id}' appears more than once in the {side} stop set")]
    DuplicateStop { stop_id: String, side: StopSide },
    #[error("{side} event list must only contain {expected} events, found {found} at stop '{stop_id}'")]
    EventKindMismatch {
        side: StopSide,
        expected: EventKind,
        found: EventKind,
        stop_id: String,
    },
    #[error("malformed service time '{0}', expected H:MM:SS elapsed since service-day midnight")]
    InvalidServiceTime(String),
    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(String),
}

/// rejects radii that are negative, NaN or infinite.
pub fn validate_buffer_radius(buffer_radius: f64) -> Result<(), TransferError> {
    validate_non_negative("buffer_radius", buffer_radius)
}

/// rejects wait thresholds that are negative, NaN or infinite.
pub fn validate_max_transfer_minutes(max_transfer_minutes: f64) -> Result<(), TransferError> {
    validate_non_negative("max_transfer_minutes", max_transfer_minutes)
}

fn validate_non_negative(name: &'static str, value: f64) -> Result<(), TransferError> {
    if !value.is_finite() {
        Err(TransferError::InvalidParameter {
            name,
            message: format!("must be a finite number, found {value}"),
        })
    } else if value < 0.0 {
        Err(TransferError::InvalidParameter {
            name,
            message: format!("must be non-negative, found {value}"),
        })
    } else {
        Ok(())
    }
}
