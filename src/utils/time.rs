use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ApiError;

/// Parses a 24h "HH:MM" clock time and pins it to `day`.
pub fn parse_assigned_time(input: &str, day: NaiveDate) -> Result<NaiveDateTime, ApiError> {
    NaiveTime::parse_from_str(input, "%H:%M")
        .map(|time| day.and_time(time))
        .map_err(|_| ApiError::validation("Time must be in HH:MM format"))
}
