use once_cell::sync::Lazy;
use regex::Regex;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Removes HTML tags and decodes the handful of entities the API emits.
pub fn strip_markup(raw: &str) -> String {
    let without_tags = TAG_PATTERN.replace_all(raw, "");
    without_tags
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Formats a count with thousands separators, e.g. `1234567` -> `1,234,567`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_read_more_link() {
        let raw = r#"Cher is a singer &amp; actress. <a href="https://www.last.fm/music/Cher">Read more on Last.fm</a>"#;
        assert_eq!(
            strip_markup(raw),
            "Cher is a singer & actress. Read more on Last.fm"
        );
    }

    #[test]
    fn formats_counts() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
