use chrono::{Local, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// The only accepted textual form, `yyyy-MM-dd HH:mm`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

// chrono accepts single-digit fields and signed years; the shape is pinned here first.
static TIMESTAMP_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").expect("compile regex"));

/// Parses a naive (timezone-free) timestamp. Returns `None` for any text
/// that is not exactly `yyyy-MM-dd HH:mm` or that names a date or time
/// that does not exist.
pub fn parse(text: &str) -> Option<NaiveDateTime> {
    if !TIMESTAMP_SHAPE.is_match(text) {
        return None;
    }

    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

/// Current local wall-clock time in the accepted form.
pub fn now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
