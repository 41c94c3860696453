use chrono::{TimeZone, Utc};

use super::ArchiveError;

/// Prefix of every post directory.
pub const FOLDER_PREFIX: &str = "post_";

/// `strftime` format of the timestamp part of a post directory.
pub const FOLDER_DATE_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Returns the directory name for a post sent at `date` (Unix seconds),
/// e.g. `post_2024-03-01_12-30-05`. The timestamp is rendered in UTC.
pub fn folder_name(date: i64) -> Result<String, ArchiveError> {
    let datetime = Utc
        .timestamp_opt(date, 0)
        .single()
        .ok_or(ArchiveError::InvalidDate(date))?;

    Ok(format!(
        "{}{}",
        FOLDER_PREFIX,
        datetime.format(FOLDER_DATE_FORMAT)
    ))
}
