//! Display formatting for item fields

use chrono::Local;
use chrono::TimeZone;

use crate::model::Budget;
use crate::model::Timestamp;

/// Which part of a timestamp to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateMode {
    /// Day, month and year.
    #[default]
    Date,
    /// Hours and minutes.
    Time,
    /// Both.
    DateTime,
}

impl DateMode {
    fn pattern(self) -> &'static str {
        match self {
            DateMode::Date => "%d/%m/%Y",
            DateMode::Time => "%H:%M",
            DateMode::DateTime => "%d/%m/%Y %H:%M",
        }
    }
}

/// Renders a timestamp in the local time zone.
pub fn format_date(timestamp: Timestamp, mode: DateMode) -> String {
    format_date_in(timestamp, mode, &Local)
}

/// Renders a timestamp in the given time zone. Out-of-range values render as `-`.
pub fn format_date_in<Tz>(timestamp: Timestamp, mode: DateMode, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match timestamp.to_datetime() {
        Some(utc) => utc.with_timezone(tz).format(mode.pattern()).to_string(),
        None => "-".to_string(),
    }
}

/// `$200`, `$12.5`
pub fn format_budget(budget: Budget) -> String {
    format!("${budget}")
}

/// `Completed` or `Pending`.
pub fn format_status(status: bool) -> &'static str {
    if status { "Completed" } else { "Pending" }
}
