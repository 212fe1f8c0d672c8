use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{validate_buffer_radius, validate_max_transfer_minutes, TransferError},
    model::ServiceTime,
};

/// the parameters of one analysis run. passed by value into every stage; nothing here
/// is process-wide state, so sweep points can be evaluated concurrently.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// the single service day to analyze (YYYY-MM-DD)
    pub service_date: NaiveDate,
    /// inclusive time-of-day window applied to rail arrivals and bus departures
    pub time_window: TimeWindow,
    /// walking buffer around each rail stop, in planar metres
    pub buffer_radius: f64,
    /// longest wait after a rail arrival that still counts as a transfer, in minutes
    pub max_transfer_minutes: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            service_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap_or_default(),
            time_window: TimeWindow::default(),
            buffer_radius: 100.0,
            max_transfer_minutes: 6.0,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), TransferError> {
        validate_buffer_radius(self.buffer_radius)?;
        validate_max_transfer_minutes(self.max_transfer_minutes)?;
        self.time_window.validate()
    }
}

/// a closed interval [start_time, end_time] of elapsed service time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_time: ServiceTime,
    pub end_time: ServiceTime,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start_time: ServiceTime::from_seconds(7 * 3600),
            end_time: ServiceTime::from_seconds(9 * 3600),
        }
    }
}

impl TimeWindow {
    pub fn new(start_time: ServiceTime, end_time: ServiceTime) -> Result<TimeWindow, TransferError> {
        let window = TimeWindow {
            start_time,
            end_time,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), TransferError> {
        if self.start_time > self.end_time {
            Err(TransferError::InvalidConfig(format!(
                "time window start {} is after end {}",
                self.start_time, self.end_time
            )))
        } else {
            Ok(())
        }
    }

    pub fn contains(&self, time: &ServiceTime) -> bool {
        &self.start_time <= time && time <= &self.end_time
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start_time, self.end_time)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn t(s: &str) -> ServiceTime {
        ServiceTime::parse(s).expect("test invariant failed: bad time literal")
    }

    #[test]
    fn test_window_is_inclusive() {
        let window = TimeWindow::new(t("07:00:00"), t("09:00:00")).expect("valid window");
        assert!(window.contains(&t("07:00:00")));
        assert!(window.contains(&t("09:00:00")));
        assert!(!window.contains(&t("09:00:01")));
        assert!(!window.contains(&t("06:59:59")));
    }

    #[test]
    fn test_window_past_midnight() {
        let window = TimeWindow::new(t("23:30:00"), t("25:00:00")).expect("valid window");
        assert!(window.contains(&t("24:15:00")));
        assert!(!window.contains(&t("00:15:00")));
    }

    #[test]
    fn test_reversed_window_is_rejected() {
        assert!(TimeWindow::new(t("09:00:00"), t("07:00:00")).is_err());
    }

    #[test]
    fn test_config_rejects_negative_values() {
        let conf = AnalysisConfig {
            buffer_radius: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            conf.validate(),
            Err(TransferError::InvalidParameter { name: "buffer_radius", .. })
        ));
        let conf = AnalysisConfig {
            max_transfer_minutes: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            conf.validate(),
            Err(TransferError::InvalidParameter { name: "max_transfer_minutes", .. })
        ));
        let conf = AnalysisConfig {
            buffer_radius: f64::NAN,
            ..Default::default()
        };
        assert!(conf.validate().is_err());
    }

    #[test]
    fn test_config_deserializes_from_clock_strings() {
        let json = r#"{
            "service_date": "2025-06-10",
            "time_window": { "start_time": "07:00:00", "end_time": "09:00:00" },
            "buffer_radius": 150.0,
            "max_transfer_minutes": 6.0
        }"#;
        let conf: AnalysisConfig = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(conf.time_window, TimeWindow::default());
        assert_eq!(conf.buffer_radius, 150.0);
        assert!(conf.validate().is_ok());
    }
}
