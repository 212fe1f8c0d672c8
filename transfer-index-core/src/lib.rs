//! Transfer opportunity engine for a fixed-guideway line and its feeder bus routes.
//!
//! Given rail and bus stops in a common planar projection and the rail arrivals / bus
//! departures of one service-day time window, the engine answers: for each rail station,
//! how many distinct bus routes can be boarded within some walking radius and some
//! post-arrival waiting window?
//!
//! The computation runs in three stages:
//!   1. [`proximity`] finds (rail stop, bus stop) candidate pairs inside the walking buffer
//!   2. [`pairing`] emits a transfer opportunity per qualifying (arrival, departure) combination
//!   3. [`aggregate`] reduces opportunities to a distinct bus route count per rail stop
//!
//! [`engine`] ties the stages together and provides radius / wait-time sweeps.
pub mod aggregate;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod pairing;
pub mod proximity;

pub use config::{AnalysisConfig, TimeWindow};
pub use engine::{
    compute_transfer_index, compute_transfer_index_sweep, compute_transfer_minutes_sweep,
    RouteCounts, SweepPoint, TransferInputs,
};
pub use error::TransferError;
