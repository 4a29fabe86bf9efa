//! Utility functions for string processing.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Fold a string for matching: lowercase only.
///
/// No diacritic stripping, no whitespace collapsing. A query must be a literal
/// substring of the folded field, so anything beyond case folding would let
/// results through that do not contain the query.
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reduce a front-matter date to `YYYY-MM-DD`.
///
/// Accepts a bare date, an RFC 3339 timestamp, or the
/// `YYYY-MM-DD HH:MM:SS +ZZZZ` form most static site generators write.
/// Timestamps keep their local calendar date; there is no conversion to UTC.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let day = format_description!("[year]-[month]-[day]");
    let generator = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
    );
    let naive = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

    let date = Date::parse(raw, day)
        .ok()
        .or_else(|| OffsetDateTime::parse(raw, &Rfc3339).ok().map(|t| t.date()))
        .or_else(|| OffsetDateTime::parse(raw, generator).ok().map(|t| t.date()))
        .or_else(|| PrimitiveDateTime::parse(raw, naive).ok().map(|t| t.date()))?;

    date.format(day).ok()
}
