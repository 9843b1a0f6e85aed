use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// e.g. `31 May 2001 09:45:54 AM`
const TIMESTAMP_FORMAT: &str = "%d %B %Y %I:%M:%S %p";

pub fn format_timestamp<Tz>(when: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    when.format(TIMESTAMP_FORMAT).to_string()
}

/// The current local date and time.
pub fn timestamp_string() -> String {
    format_timestamp(&Local::now())
}

/// Prints the current local date and time to stdout.
pub fn timestamp() {
    println!("{}", timestamp_string());
}
