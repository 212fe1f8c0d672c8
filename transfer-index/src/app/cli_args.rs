use chrono::NaiveDate;
use clap::Args;
use config::{builder::DefaultState, ConfigBuilder};
use serde::{Deserialize, Serialize};
use transfer_index_core::model::ServiceTime;

use super::TransferAppError;

/// options shared by every operation. each one, when given, overrides the same value
/// from the configuration file and the built-in defaults.
#[derive(Args, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisArgs {
    /// TOML file with any subset of the application configuration
    #[arg(short, long)]
    pub configuration_file: Option<String>,

    /// GTFS feed: http(s) URL, local zip archive or extracted directory
    #[arg(short, long)]
    pub gtfs: Option<String>,

    /// service date to analyze, YYYY-MM-DD
    #[arg(short, long)]
    pub date: Option<String>,

    /// start of the time window, HH:MM:SS (hours may exceed 23)
    #[arg(long)]
    pub start_time: Option<String>,

    /// end of the time window, HH:MM:SS (hours may exceed 23)
    #[arg(long)]
    pub end_time: Option<String>,

    /// walking distance around each rail stop, in metres
    #[arg(short, long)]
    pub buffer: Option<f64>,

    /// longest wait after a rail arrival that still counts as a transfer, in minutes
    #[arg(short, long)]
    pub transfer_time: Option<f64>,

    /// comma-separated route ids of the rail line(s). if omitted, routes are split by route type.
    #[arg(long, value_delimiter = ',')]
    pub rail_route_ids: Option<Vec<String>>,

    /// location on disk to write output files
    #[arg(short, long)]
    pub output_directory: Option<String>,

    /// download the GTFS feed again even when a cached copy exists
    #[arg(long)]
    pub force_download: bool,

    /// replace existing output files
    #[arg(long)]
    pub overwrite: bool,
}

/// sweep-only options.
#[derive(Args, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepArgs {
    /// comma-separated walking distances in metres, e.g. 50,100,150
    #[arg(long, value_delimiter = ',')]
    pub radii: Option<Vec<f64>>,

    /// comma-separated wait thresholds in minutes, e.g. 3,6,9
    #[arg(long, value_delimiter = ',')]
    pub transfer_times: Option<Vec<f64>>,
}

impl AnalysisArgs {
    /// layers the command line values over a configuration builder.
    pub fn apply_overrides(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, TransferAppError> {
        if let Some(date) = &self.date {
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
                TransferAppError::InvalidUserInput(format!(
                    "invalid date '{date}', expected YYYY-MM-DD: {e}"
                ))
            })?;
        }
        for time in [&self.start_time, &self.end_time].into_iter().flatten() {
            if ServiceTime::parse(time).is_none() {
                return Err(TransferAppError::InvalidUserInput(format!(
                    "invalid time '{time}', expected HH:MM:SS"
                )));
            }
        }
        let mut builder = builder
            .set_override_option("gtfs", self.gtfs.clone())?
            .set_override_option("analysis.service_date", self.date.clone())?
            .set_override_option("analysis.time_window.start_time", self.start_time.clone())?
            .set_override_option("analysis.time_window.end_time", self.end_time.clone())?
            .set_override_option("analysis.buffer_radius", self.buffer)?
            .set_override_option("analysis.max_transfer_minutes", self.transfer_time)?
            .set_override_option("mode_split.rail_route_ids", self.rail_route_ids.clone())?
            .set_override_option("output_directory", self.output_directory.clone())?;
        // flags only ever switch these on
        if self.force_download {
            builder = builder.set_override("force_download", true)?;
        }
        if self.overwrite {
            builder = builder.set_override("overwrite", true)?;
        }
        Ok(builder)
    }
}

impl SweepArgs {
    pub fn apply_overrides(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, TransferAppError> {
        let builder = builder
            .set_override_option("sweep.radii", self.radii.clone())?
            .set_override_option("sweep.transfer_times", self.transfer_times.clone())?;
        Ok(builder)
    }
}
