use std::fmt::Write;

/// Quote `raw` as a single-quoted JavaScript string literal.
pub fn js_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Make `raw` safe to place after `//` on a single line.
pub fn comment_text(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_control() || c == '\u{2028}' || c == '\u{2029}' {
                ' '
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_wrapped() {
        assert_eq!(js_string("https://example.com"), "'https://example.com'");
    }

    #[test]
    fn test_quotes_and_backslashes() {
        assert_eq!(js_string("it's"), r"'it\'s'");
        assert_eq!(js_string(r#"[name="a\b"]"#), r#"'[name="a\\b"]'"#);
    }

    #[test]
    fn test_line_terminators() {
        assert_eq!(js_string("a\nb\r\tc"), r"'a\nb\r\tc'");
        assert_eq!(js_string("x\u{2028}y\u{2029}"), r"'x\u2028y\u2029'");
        assert_eq!(js_string("\u{0}"), r"'\x00'");
    }

    #[test]
    fn test_comment_text_stays_on_one_line() {
        assert_eq!(comment_text("bad\ntag\u{2028}"), "bad tag ");
    }
}
