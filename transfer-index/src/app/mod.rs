mod app_config;
mod app_error;
mod cli_args;
pub mod run_ops;
mod transfer_app;

pub use app_config::{SweepConfig, TransferAppConfig, DEFAULT_GTFS_URL};
pub use app_error::TransferAppError;
pub use cli_args::{AnalysisArgs, SweepArgs};
pub use transfer_app::{TransferApp, TransferOperation};
