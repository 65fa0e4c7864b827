use chrono::NaiveTime;

use crate::model::attendance::AttendanceStatus;
use crate::model::configuration::DailyConfiguration;

/// Classifies an arrival scanned at `now_time`.
///
/// Arrivals at or before `entry_time` are on time, everything later is late.
/// Arrivals past `late_threshold_time` are still `LATE`: `ABSENT` is never
/// produced by a scan.
pub fn classify_arrival(now_time: NaiveTime, config: &DailyConfiguration) -> AttendanceStatus {
    if now_time <= config.entry_time {
        AttendanceStatus::OnTime
    } else {
        AttendanceStatus::Late
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn config() -> DailyConfiguration {
        DailyConfiguration {
            entry_time: hms(8, 0, 0),
            late_threshold_time: hms(9, 0, 0),
            grace_minutes: 10,
        }
    }

    #[test]
    fn entry_time_itself_is_on_time() {
        assert_eq!(classify_arrival(hms(8, 0, 0), &config()), AttendanceStatus::OnTime);
        assert_eq!(classify_arrival(hms(6, 15, 0), &config()), AttendanceStatus::OnTime);
    }

    #[test]
    fn one_second_after_entry_is_late() {
        assert_eq!(classify_arrival(hms(8, 0, 1), &config()), AttendanceStatus::Late);
    }

    #[test]
    fn grace_minutes_do_not_extend_on_time() {
        assert_eq!(classify_arrival(hms(8, 5, 0), &config()), AttendanceStatus::Late);
    }

    #[test]
    fn arrivals_past_late_threshold_stay_late() {
        assert_eq!(classify_arrival(hms(9, 0, 0), &config()), AttendanceStatus::Late);
        assert_eq!(classify_arrival(hms(11, 30, 0), &config()), AttendanceStatus::Late);
    }
}
