//! Numeric formatting and markup escaping
//!
//! Pure helpers used by the section composer. Escaping is applied to dynamic
//! fields only, before any literal template markup is assembled around them,
//! so provider-controlled text can never break or inject markup.

use crate::types::MarkupMode;

/// Characters that must be backslash-escaped in Telegram MarkdownV2
const MARKDOWN_V2_RESERVED: [char; 18] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Formats a non-negative magnitude with the largest applicable unit suffix
///
/// Checked top-down, first match wins: `>= 1e12` renders as `T`, `>= 1e9`
/// as `B`, `>= 1e6` as `M`, anything smaller as a comma-grouped 2-decimal
/// number with no suffix.
pub fn format_magnitude(value: f64) -> String {
    if value >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if value >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else {
        group_decimal(value)
    }
}

/// Formats a percent change with an explicit sign and 2 decimals
///
/// Non-negative values get a leading `+`. Rounding is Rust's `{:.2}` float
/// formatting (round-half-even on the stored binary value).
pub fn format_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

/// Comma-groups an integer count, e.g. `10234` -> `10,234`
pub fn group_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Comma-grouped fixed 2-decimal rendering, e.g. `950000.0` -> `950,000.00`
fn group_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    match fixed.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{}", group_digits(int_part), frac_part),
        None => group_digits(&fixed),
    }
}

/// Inserts a comma every three digits from the right
fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Escapes text for embedding in a Telegram HTML message body
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escapes text for embedding in a Telegram MarkdownV2 message body
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        if MARKDOWN_V2_RESERVED.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

impl MarkupMode {
    /// Escapes a dynamic text field for this dialect
    ///
    /// Must be called on raw field values before they are placed inside
    /// literal template markup; never on the assembled template.
    pub fn escape(&self, text: &str) -> String {
        match self {
            MarkupMode::Plain => text.to_string(),
            MarkupMode::Html => escape_html(text),
            MarkupMode::MarkdownV2 => escape_markdown_v2(text),
        }
    }

    /// Wraps already-escaped text in this dialect's bold markers
    pub fn bold(&self, escaped: &str) -> String {
        match self {
            MarkupMode::Plain => escaped.to_string(),
            MarkupMode::Html => format!("<b>{}</b>", escaped),
            MarkupMode::MarkdownV2 => format!("*{}*", escaped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_below_a_million_is_comma_grouped() {
        assert_eq!(format_magnitude(0.0), "0.00");
        assert_eq!(format_magnitude(999.5), "999.50");
        assert_eq!(format_magnitude(950_000.0), "950,000.00");
        assert_eq!(format_magnitude(999_999.99), "999,999.99");
    }

    #[test]
    fn magnitude_suffixes_by_band() {
        assert_eq!(format_magnitude(4_000_000.0), "4.00M");
        assert_eq!(format_magnitude(2.3e9), "2.30B");
        assert_eq!(format_magnitude(1.5e12), "1.50T");
        assert_eq!(format_magnitude(95e9), "95.00B");
    }

    #[test]
    fn magnitude_boundaries_pick_the_larger_unit() {
        assert_eq!(format_magnitude(1e6), "1.00M");
        assert_eq!(format_magnitude(1e9), "1.00B");
        assert_eq!(format_magnitude(1e12), "1.00T");
    }

    #[test]
    fn percent_is_signed_with_two_decimals() {
        assert_eq!(format_percent(12.345), "+12.35%");
        assert_eq!(format_percent(0.0), "+0.00%");
        assert_eq!(format_percent(-3.2), "-3.20%");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(10_234), "10,234");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn html_escapes_markup_characters() {
        let escaped = escape_html("<script>alert(\"x&y\")</script>");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert_eq!(escape_html("a<b>c"), "a&lt;b&gt;c");
    }

    #[test]
    fn html_escape_is_idempotent_on_clean_text() {
        let clean = "Bitcoin is up 5 percent";
        assert_eq!(escape_html(&escape_html(clean)), escape_html(clean));
    }

    #[test]
    fn markdown_v2_escapes_every_reserved_character() {
        for ch in MARKDOWN_V2_RESERVED {
            let escaped = escape_markdown_v2(&ch.to_string());
            assert_eq!(escaped, format!("\\{}", ch));
        }
    }

    #[test]
    fn markdown_v2_handles_empty_and_mixed_input() {
        assert_eq!(escape_markdown_v2(""), "");
        assert_eq!(escape_markdown_v2("Bitcoin*Cash"), "Bitcoin\\*Cash");
        assert_eq!(escape_markdown_v2("a.b-c!"), "a\\.b\\-c\\!");
        // An inserted backslash is never itself escaped
        assert_eq!(escape_markdown_v2("._"), "\\.\\_");
    }

    #[test]
    fn template_markup_stays_active_around_escaped_fields() {
        let mode = MarkupMode::MarkdownV2;
        let field = mode.escape("user*data");
        let line = mode.bold(&field);
        assert_eq!(line, "*user\\*data*");
    }
}
