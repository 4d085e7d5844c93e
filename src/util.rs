use chrono::{DateTime, Utc};

/// Truncate `text` to at most `max` bytes for list previews.
///
/// Collapses whitespace runs to single spaces, cuts on a char boundary and
/// appends "..." when anything was dropped.
pub fn preview(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.len() <= max {
        return collapsed;
    }
    // Don't split in the middle of a multi-byte char
    let mut end = max;
    while !collapsed.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", collapsed[..end].trim_end())
}

/// Case-insensitive substring match. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Timestamp as shown in message headers and quoted bodies.
pub fn display_time(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("Hello there", 80), "Hello there");
    }

    #[test]
    fn test_preview_collapses_whitespace() {
        assert_eq!(preview("Hello\n\n  there", 80), "Hello there");
    }

    #[test]
    fn test_preview_truncates() {
        let long = "a".repeat(100);
        assert_eq!(preview(&long, 10), format!("{}...", "a".repeat(10)));
    }

    #[test]
    fn test_preview_multibyte_boundary() {
        let text = "é".repeat(10);
        let p = preview(&text, 5);
        assert_eq!(p, "éé...");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Interview confirmed", "INTERVIEW"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("Offer letter", "referral"));
    }

    #[test]
    fn test_display_time() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap();
        assert_eq!(display_time(&ts), "Mar 5, 2024 09:07");
    }
}
