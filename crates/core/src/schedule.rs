//! Date and time-window rules for show runs and performances.

use crate::error::CoreError;
use crate::types::{Date, Timestamp};

/// Longest performance the agenda accepts, in hours.
pub const MAX_EVENT_HOURS: i64 = 24;

/// A show's closing date may not precede its premiere.
pub fn validate_run_dates(premiere: Option<Date>, closing: Option<Date>) -> Result<(), CoreError> {
    if let (Some(premiere), Some(closing)) = (premiere, closing) {
        if closing < premiere {
            return Err(CoreError::Validation(format!(
                "Closing date {closing} is before premiere date {premiere}"
            )));
        }
    }
    Ok(())
}

/// A performance must end after it starts and last at most [`MAX_EVENT_HOURS`].
pub fn validate_event_window(starts_at: Timestamp, ends_at: Option<Timestamp>) -> Result<(), CoreError> {
    let Some(ends_at) = ends_at else {
        return Ok(());
    };
    if ends_at <= starts_at {
        return Err(CoreError::Validation(
            "Event end time must be after its start time".to_string(),
        ));
    }
    if ends_at - starts_at > chrono::Duration::hours(MAX_EVENT_HOURS) {
        return Err(CoreError::Validation(format!(
            "Event must not last longer than {MAX_EVENT_HOURS} hours"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn run_dates_in_order_accepted() {
        assert!(validate_run_dates(Some(date(2025, 3, 1)), Some(date(2025, 3, 1))).is_ok());
        assert!(validate_run_dates(Some(date(2025, 3, 1)), Some(date(2025, 4, 1))).is_ok());
        assert!(validate_run_dates(None, Some(date(2025, 4, 1))).is_ok());
        assert!(validate_run_dates(Some(date(2025, 4, 1)), None).is_ok());
    }

    #[test]
    fn closing_before_premiere_rejected() {
        let err = validate_run_dates(Some(date(2025, 4, 2)), Some(date(2025, 4, 1))).unwrap_err();
        assert!(err.to_string().contains("before premiere"));
    }

    #[test]
    fn event_window_rules() {
        let start = Utc.with_ymd_and_hms(2025, 5, 10, 20, 0, 0).unwrap();
        assert!(validate_event_window(start, None).is_ok());
        assert!(validate_event_window(start, Some(start + chrono::Duration::hours(2))).is_ok());
        assert!(validate_event_window(start, Some(start)).is_err());
        assert!(validate_event_window(start, Some(start - chrono::Duration::minutes(1))).is_err());
        assert!(validate_event_window(start, Some(start + chrono::Duration::hours(25))).is_err());
    }
}
