mod engine_ops;
mod sweep;
mod transfer_inputs;

pub use engine_ops::compute_transfer_index;
pub use sweep::{
    compute_transfer_index_sweep, compute_transfer_minutes_sweep, RouteCounts, SweepPoint,
};
pub use transfer_inputs::TransferInputs;
