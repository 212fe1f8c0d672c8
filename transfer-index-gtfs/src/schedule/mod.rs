mod feed_source;
pub mod mode_split;
mod projection;
mod raw_stop_time;
mod schedule_error;
mod schedule_ops;
pub mod service_day;

pub use feed_source::{download, FeedSource};
pub use mode_split::{ModeSplitConfig, TransitMode};
pub use projection::LocalProjection;
pub use raw_stop_time::{read_stop_times, ClockField, RawStopTime, StopTimeRows};
pub use schedule_error::{batch_processing_error, ScheduleError};
pub use schedule_ops::{load_schedule, LoadSummary, LoadedSchedule};
