use time::Date;
use time::macros::format_description;

/// Parse a `YYYY-MM-DD` calendar date.
///
/// The value is read as a plain calendar day, so no offset can move it onto
/// the previous or next day. Anything else, including a date carrying a time
/// component (`2024-12-31T18:00:00`) or surrounding whitespace, is `None`:
/// only exact dates survive the trip through a day index and back.
pub fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).ok()
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| {
            format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                date.month() as u8,
                date.day()
            )
        })
}
