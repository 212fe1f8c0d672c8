//! Loads a GTFS feed into the inputs of the transfer index engine.
//!
//! [`schedule::load_schedule`] resolves the service day from calendar.txt and
//! calendar_dates.txt, splits routes into rail and bus, restricts stop times to the
//! analysis window and projects stops onto a local planar coordinate system.
pub mod schedule;
