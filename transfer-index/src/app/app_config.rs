use config::{Config, File};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use transfer_index_core::{AnalysisConfig, SweepPoint};
use transfer_index_gtfs::schedule::{FeedSource, ModeSplitConfig};

use super::{AnalysisArgs, SweepArgs, TransferAppError};

pub const DEFAULT_GTFS_URL: &str = "https://www.regionofwaterloo.ca/opendatadownloads/GRT_GTFS.zip";

/// everything one invocation of the application needs. assembled from three layers:
/// built-in defaults, then an optional TOML configuration file, then command line
/// arguments. every field falls back to its default, since the `config` crate drops
/// tables whose values are all empty lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferAppConfig {
    /// GTFS feed location: http(s) URL, local zip archive or directory
    pub gtfs: String,
    /// where a downloaded feed is cached
    pub gtfs_cache_path: PathBuf,
    pub force_download: bool,
    pub analysis: AnalysisConfig,
    pub mode_split: ModeSplitConfig,
    pub sweep: SweepConfig,
    pub output_directory: PathBuf,
    /// if true, allow overwriting files in output directory
    pub overwrite: bool,
}

impl Default for TransferAppConfig {
    fn default() -> Self {
        Self {
            gtfs: DEFAULT_GTFS_URL.to_string(),
            gtfs_cache_path: PathBuf::from("data/gtfs.zip"),
            force_download: false,
            analysis: AnalysisConfig::default(),
            mode_split: ModeSplitConfig::default(),
            sweep: SweepConfig::default(),
            output_directory: PathBuf::from("output"),
            overwrite: false,
        }
    }
}

/// parameter grid for the `sweep` operation. an empty list falls back to the single
/// value from [`AnalysisConfig`]; when both lists are empty the default radii are used.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default)]
    pub radii: Vec<f64>,
    #[serde(default)]
    pub transfer_times: Vec<f64>,
}

impl SweepConfig {
    /// 50, 100, ..., 500 metres
    pub fn default_radii() -> Vec<f64> {
        (1..=10).map(|i| i as f64 * 50.0).collect()
    }

    /// every distinct (radius, wait threshold) combination to evaluate, radius-major.
    /// repeated values keep their first position.
    pub fn points(&self, analysis: &AnalysisConfig) -> Vec<SweepPoint> {
        let radii = match (self.radii.is_empty(), self.transfer_times.is_empty()) {
            (true, true) => Self::default_radii(),
            (true, false) => vec![analysis.buffer_radius],
            (false, _) => self.radii.clone(),
        };
        let times = if self.transfer_times.is_empty() {
            vec![analysis.max_transfer_minutes]
        } else {
            self.transfer_times.clone()
        };
        radii
            .iter()
            .flat_map(|r| times.iter().map(move |t| SweepPoint::new(*r, *t)))
            .unique_by(|p| (OrderedFloat(p.buffer_radius), OrderedFloat(p.max_transfer_minutes)))
            .collect()
    }
}

impl TransferAppConfig {
    /// builds the configuration for an operation from the three layers.
    pub fn build(
        args: &AnalysisArgs,
        sweep_args: Option<&SweepArgs>,
    ) -> Result<TransferAppConfig, TransferAppError> {
        let defaults = Config::try_from(&TransferAppConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);
        if let Some(configuration_file) = &args.configuration_file {
            let filepath = Path::new(configuration_file);
            if !filepath.is_file() {
                return Err(TransferAppError::InvalidUserInput(format!(
                    "configuration file '{configuration_file}' not found"
                )));
            }
            builder = builder.add_source(File::from(filepath));
        }
        builder = args.apply_overrides(builder)?;
        if let Some(sweep_args) = sweep_args {
            builder = sweep_args.apply_overrides(builder)?;
        }
        let config = builder.build()?;
        let conf = config.try_deserialize::<TransferAppConfig>().map_err(|e| {
            TransferAppError::Configuration(format!("invalid application configuration: {e}"))
        })?;
        conf.analysis.validate()?;
        Ok(conf)
    }

    pub fn feed_source(&self) -> FeedSource {
        FeedSource::new(&self.gtfs, &self.gtfs_cache_path)
    }
}
