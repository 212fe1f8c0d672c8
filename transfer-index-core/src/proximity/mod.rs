mod bus_stop_node;
pub mod proximity_ops;

pub use bus_stop_node::BusStopNode;
pub use proximity_ops::{match_candidate_pairs, within_buffer, ProximityMatch};
