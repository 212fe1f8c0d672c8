use serde::{Deserialize, Serialize};

/// one (arrival, departure) combination that satisfies the wait-time rule. records
/// are not deduplicated; a route with three qualifying departures yields three records.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransferOpportunity {
    pub rail_stop_id: String,
    pub bus_route_id: String,
}

impl TransferOpportunity {
    pub fn new(rail_stop_id: &str, bus_route_id: &str) -> TransferOpportunity {
        TransferOpportunity {
            rail_stop_id: rail_stop_id.to_string(),
            bus_route_id: bus_route_id.to_string(),
        }
    }
}
