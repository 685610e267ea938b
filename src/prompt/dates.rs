use chrono::{Datelike, NaiveDate, Weekday};

/// Parses a `YYYY-MM-DD` form value. Empty or malformed values yield `None`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Korean long date with weekday, e.g. `2024년 1월 1일 (월)`.
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}년 {}월 {}일 ({})",
        date.year(),
        date.month(),
        date.day(),
        weekday_short(date.weekday())
    )
}

/// Renders a form date value: formatted when valid, verbatim when not, `None` when empty.
pub fn render_date(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(parse_date(trimmed).map_or_else(|| trimmed.to_string(), format_long_date))
}

/// Days covered by a range, counting both ends: `(end - start) + 1`.
///
/// `None` if either end is empty or malformed, or if the range runs backwards.
pub fn inclusive_days(start: &str, end: &str) -> Option<i64> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let days = (end - start).num_days() + 1;
    if days < 1 {
        tracing::debug!(%start, %end, "End date precedes start date, omitting duration");
        return None;
    }
    Some(days)
}

const fn weekday_short(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
        Weekday::Sun => "일",
    }
}
