use chrono::{Datelike, NaiveDate, Weekday};
use gtfs_structures::{Calendar, CalendarDate, Exception, Gtfs};
use std::collections::BTreeSet;

use super::schedule_error::ScheduleError;

/// format used when writing dates into log and error messages
pub const APP_DATE_FORMAT: &str = "%Y-%m-%d";

/// finds every service_id running on `target`, looking at both calendar.txt and
/// calendar_dates.txt.
pub fn active_service_ids(gtfs: &Gtfs, target: &NaiveDate) -> BTreeSet<String> {
    let service_ids = gtfs
        .calendar
        .keys()
        .chain(gtfs.calendar_dates.keys())
        .collect::<BTreeSet<_>>();
    service_ids
        .into_iter()
        .filter(|service_id| {
            let calendar = gtfs.calendar.get(*service_id);
            let calendar_dates = gtfs.calendar_dates.get(*service_id).map(Vec::as_slice);
            is_service_active(target, calendar, calendar_dates)
        })
        .cloned()
        .collect()
}

/// a service runs on `target` when either
///   1) calendar.txt covers the date and weekday and calendar_dates.txt does not delete it, or
///   2) calendar_dates.txt adds the date.
pub fn is_service_active(
    target: &NaiveDate,
    calendar: Option<&Calendar>,
    calendar_dates: Option<&[CalendarDate]>,
) -> bool {
    match (calendar, calendar_dates) {
        (None, None) => false,
        (Some(c), None) => find_in_calendar(target, c).is_ok(),
        (None, Some(cd)) => confirm_add_exception(target, cd).is_ok(),
        (Some(c), Some(cd)) => match find_in_calendar(target, c) {
            Ok(_) => confirm_no_delete_exception(target, cd),
            Err(_) => confirm_add_exception(target, cd).is_ok(),
        },
    }
}

/// helper function to find some expected date in the calendar.txt of a GTFS archive.
/// the date must fall inside the (inclusive) date range and on a weekday the calendar
/// entry runs.
pub fn find_in_calendar(
    target: &NaiveDate,
    calendar: &Calendar,
) -> Result<NaiveDate, ScheduleError> {
    let start = &calendar.start_date;
    let end = &calendar.end_date;
    let within_service_date_range = start <= target && target <= end;
    if !within_service_date_range {
        let msg = error_msg_suffix(target, start, end);
        return Err(ScheduleError::InvalidData(format!(
            "no calendar.txt dates match {msg}"
        )));
    }
    if !runs_on_weekday(calendar, target.weekday()) {
        return Err(ScheduleError::InvalidData(format!(
            "service '{}' does not run on {} ({})",
            calendar.id,
            target.weekday(),
            target.format(APP_DATE_FORMAT)
        )));
    }
    Ok(*target)
}

/// helper function to find some expected target date in the calendar_dates.txt of a
/// GTFS archive where the entry should have an exception_type of "Added".
pub fn confirm_add_exception(
    target: &NaiveDate,
    calendar_dates: &[CalendarDate],
) -> Result<NaiveDate, ScheduleError> {
    match calendar_dates
        .iter()
        .find(|cd| &cd.date == target && cd.exception_type == Exception::Added)
    {
        Some(_) => Ok(*target),
        None => {
            let msg = format!(
                "no calendar_dates match target date '{}' with exception_type as 'added'",
                target.format(APP_DATE_FORMAT),
            );
            Err(ScheduleError::InvalidData(msg))
        }
    }
}

/// helper function to find some expected target date in the calendar_dates.txt of a
/// GTFS archive where the entry should
///   1) not exist, or
///   2) NOT have an exception_type of "Deleted".
pub fn confirm_no_delete_exception(target: &NaiveDate, calendar_dates: &[CalendarDate]) -> bool {
    !calendar_dates
        .iter()
        .any(|cd| &cd.date == target && cd.exception_type == Exception::Deleted)
}

fn runs_on_weekday(calendar: &Calendar, weekday: Weekday) -> bool {
    match weekday {
        Weekday::Mon => calendar.monday,
        Weekday::Tue => calendar.tuesday,
        Weekday::Wed => calendar.wednesday,
        Weekday::Thu => calendar.thursday,
        Weekday::Fri => calendar.friday,
        Weekday::Sat => calendar.saturday,
        Weekday::Sun => calendar.sunday,
    }
}

/// helper function for returning errors that reference some target date and date range
pub fn error_msg_suffix(target: &NaiveDate, start: &NaiveDate, end: &NaiveDate) -> String {
    format!(
        "for target date '{}' and date range [{},{}]",
        target.format(APP_DATE_FORMAT),
        start.format(APP_DATE_FORMAT),
        end.format(APP_DATE_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("test invariant failed: invalid date")
    }

    fn weekday_calendar() -> Calendar {
        Calendar {
            id: String::from("WKDY"),
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
            start_date: date(2025, 1, 1),
            end_date: date(2025, 12, 31),
        }
    }

    fn create_calendar_date(date: NaiveDate, exception_type: Exception) -> CalendarDate {
        CalendarDate {
            service_id: String::from("WKDY"),
            date,
            exception_type,
        }
    }

    #[test]
    fn test_find_in_calendar_weekday() {
        let c = weekday_calendar();
        // 2025-06-10 is a tuesday, 2025-06-15 a sunday
        assert!(find_in_calendar(&date(2025, 6, 10), &c).is_ok());
        assert!(find_in_calendar(&date(2025, 6, 15), &c).is_err());
    }

    #[test]
    fn test_find_in_calendar_out_of_range() {
        let c = weekday_calendar();
        let result = find_in_calendar(&date(2026, 1, 6), &c);
        if let Err(ScheduleError::InvalidData(msg)) = result {
            assert!(msg.contains("2026-01-06"));
            assert!(msg.contains("[2025-01-01,2025-12-31]"));
        } else {
            panic!("expected InvalidData error");
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let c = weekday_calendar();
        // 2025-01-01 is a wednesday, 2025-12-31 a wednesday
        assert!(find_in_calendar(&date(2025, 1, 1), &c).is_ok());
        assert!(find_in_calendar(&date(2025, 12, 31), &c).is_ok());
    }

    #[test]
    fn test_deleted_exception_removes_service() {
        let c = weekday_calendar();
        let target = date(2025, 7, 1);
        let cd = vec![create_calendar_date(target, Exception::Deleted)];
        assert!(!is_service_active(&target, Some(&c), Some(&cd)));
        assert!(is_service_active(&date(2025, 7, 2), Some(&c), Some(&cd)));
    }

    #[test]
    fn test_added_exception_outside_calendar() {
        let c = weekday_calendar();
        let sunday = date(2025, 6, 15);
        let cd = vec![create_calendar_date(sunday, Exception::Added)];
        assert!(is_service_active(&sunday, Some(&c), Some(&cd)));
        assert!(is_service_active(&sunday, None, Some(&cd)));
        assert!(!is_service_active(&date(2025, 6, 22), None, Some(&cd)));
    }

    #[test]
    fn test_no_calendar_entries() {
        assert!(!is_service_active(&date(2025, 6, 10), None, None));
    }

    #[test]
    fn test_confirm_no_delete_exception_empty_calendar_dates() {
        let target = date(2023, 6, 15);
        assert!(confirm_no_delete_exception(&target, &[]));
    }

    #[test]
    fn test_confirm_add_exception_not_found() {
        let target = date(2023, 6, 15);
        let calendar_dates = vec![
            create_calendar_date(date(2023, 6, 10), Exception::Added),
            create_calendar_date(target, Exception::Deleted),
        ];
        let result = confirm_add_exception(&target, &calendar_dates);
        if let Err(ScheduleError::InvalidData(msg)) = result {
            assert!(msg.contains("no calendar_dates match target date"));
            assert!(msg.contains("2023-06-15"));
        } else {
            panic!("expected InvalidData error");
        }
    }
}
