mod candidate_pair;
mod excluded_stop;
mod schedule_coverage;
mod service_time;
mod stop_point;
mod stop_side;
mod timetable_event;
mod transfer_index;
mod transfer_opportunity;

pub use candidate_pair::CandidatePair;
pub use excluded_stop::{ExcludedStop, ExclusionReason};
pub use schedule_coverage::ScheduleCoverage;
pub use service_time::ServiceTime;
pub use stop_point::StopPoint;
pub use stop_side::StopSide;
pub use timetable_event::{EventKind, TimetableEvent};
pub use transfer_index::{TransferIndex, TransferIndexEntry};
pub use transfer_opportunity::TransferOpportunity;
