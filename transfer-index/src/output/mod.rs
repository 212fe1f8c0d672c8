mod fs_ops;
mod geojson_ops;
mod summary;
mod sweep_csv;
mod transfer_index_csv;

pub use fs_ops::{create_dirs, create_output_file, write_json, write_toml};
pub use geojson_ops::{transfer_index_features, write_transfer_index_geojson};
pub use summary::{
    AnalysisSummary, StationSummary, SweepPointSummary, SweepSummary, TOP_STATION_COUNT,
};
pub use sweep_csv::{sweep_label, write_sweep_csv};
pub use transfer_index_csv::{write_transfer_index_csv, TransferIndexRow};
