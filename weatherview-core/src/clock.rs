use chrono::{DateTime, TimeZone};

/// Formats a wall-clock reading as "Weekday, Month DD H:MM AM/PM".
pub fn format_clock<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    now.format("%A, %B %d %-I:%M %p").to_string()
}
