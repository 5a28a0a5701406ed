use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One listing row: share code and occasion date, then the occasion and
/// message trimmed to the terminal width.
pub(crate) fn format_wish_line(
    code: &str,
    date: &str,
    occasion: &str,
    message: &str,
    max_width: usize,
) -> String {
    if max_width == 0 {
        return String::new();
    }

    let prefix = format!("{}  {}  ", code, date);
    let prefix_width = UnicodeWidthStr::width(prefix.as_str());
    let body = sanitize(&format!("{}: {}", occasion, message));
    if max_width <= prefix_width {
        return truncate_with_ellipsis(code, max_width);
    }

    let body_width = max_width.saturating_sub(prefix_width);
    format!("{}{}", prefix, truncate_with_ellipsis(&body, body_width))
}

fn sanitize(content: &str) -> String {
    content
        .replace(['\n', '\r', '\t'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_with_ellipsis(value: &str, max_width: usize) -> String {
    let value_width = UnicodeWidthStr::width(value);
    if value_width <= max_width {
        return value.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let mut current_width = 0;
    let mut result = String::new();
    for ch in value.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if current_width + ch_width > max_width - 3 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("...");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_fits_within_width() {
        let line = format_wish_line(
            "AB23CD",
            "2024-06-15",
            "birthday",
            "a message that goes on for quite a while and then some",
            40,
        );
        assert!(UnicodeWidthStr::width(line.as_str()) <= 40);
        assert!(line.starts_with("AB23CD  2024-06-15  "));
        assert!(line.ends_with("..."));
    }

    #[test]
    fn short_message_is_untouched() {
        let line = format_wish_line("AB23CD", "2024-06-15", "eid", "hi", 80);
        assert_eq!(line, "AB23CD  2024-06-15  eid: hi");
    }

    #[test]
    fn newlines_collapse_to_spaces() {
        let line = format_wish_line("AB23CD", "2024-06-15", "eid", "one\ntwo\tthree", 80);
        assert!(line.contains("one two three"));
    }

    #[test]
    fn tiny_width_degrades_to_code_only() {
        let line = format_wish_line("AB23CD", "2024-06-15", "eid", "hi", 6);
        assert_eq!(line, "AB23CD");
        assert_eq!(format_wish_line("AB23CD", "2024-06-15", "eid", "hi", 0), "");
    }
}
