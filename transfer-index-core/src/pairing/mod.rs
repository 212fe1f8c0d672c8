mod event_index;
pub mod pairing_ops;

pub use event_index::{Departure, EventIndex};
pub use pairing_ops::{pair_transfers, within_transfer_window};
