//! Formatting helpers shared across views.

/// Format an integer with thousands separators (e.g., "23,530").
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a rating out of ten (e.g., "7.82/10").
pub fn format_rating(rating: f64) -> String {
    format!("{:.2}/10", rating)
}

/// Format a rating with one decimal (e.g., "8.5/10"), used in lists.
pub fn format_rating_short(rating: f64) -> String {
    format!("{:.1}/10", rating)
}

/// Join a multi-valued genre field for display.
pub fn join_genres(genres: &[String]) -> String {
    genres.join(", ")
}

/// Label for a calendar month (e.g., "Mar 2015"). Falls back to a
/// numeric form for out-of-range input.
pub fn month_label(year: i32, month: i32) -> String {
    u32::try_from(month)
        .ok()
        .and_then(|m| chrono::NaiveDate::from_ymd_opt(year, m, 1))
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{:04}-{:02}", year, month))
}
