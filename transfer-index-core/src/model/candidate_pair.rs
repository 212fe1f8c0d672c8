use serde::{Deserialize, Serialize};

/// a bus stop found inside the walking buffer of a rail stop.
///
/// the relation is many-to-many: one bus stop may pair with several rail stops.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidatePair {
    pub rail_stop_id: String,
    pub bus_stop_id: String,
}

impl CandidatePair {
    pub fn new(rail_stop_id: &str, bus_stop_id: &str) -> CandidatePair {
        CandidatePair {
            rail_stop_id: rail_stop_id.to_string(),
            bus_stop_id: bus_stop_id.to_string(),
        }
    }
}
