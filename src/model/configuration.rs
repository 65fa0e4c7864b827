use chrono::NaiveTime;

/// Thresholds shared by every date. Edited by the administration dashboard.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct DailyConfiguration {
    /// Scans at or before this time are on time.
    pub entry_time: NaiveTime,
    pub late_threshold_time: NaiveTime,
    /// Declared but not consulted by classification.
    pub grace_minutes: u32,
}
