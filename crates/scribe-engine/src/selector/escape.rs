/// Escape a CSS identifier (id or class name) for use after `#` or `.`.
///
/// Ordinary identifiers come back unchanged. A digit may not start the
/// identifier, even after a single leading `-`, and a lone `-` is not an
/// identifier at all.
pub fn css_ident(ident: &str) -> String {
    let mut escaped = String::with_capacity(ident.len());
    let leading_dash = ident.starts_with('-');
    for (index, c) in ident.chars().enumerate() {
        let plain = c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii();
        if c == '\0' {
            escaped.push('\u{FFFD}');
        } else if c.is_ascii_control()
            || (c.is_ascii_digit() && (index == 0 || (index == 1 && leading_dash)))
        {
            escaped.push_str(&format!("\\{:x} ", c as u32));
        } else if index == 0 && c == '-' && ident.len() == 1 {
            escaped.push_str("\\-");
        } else if plain {
            escaped.push(c);
        } else {
            escaped.push('\\');
            escaped.push(c);
        }
    }
    escaped
}

/// Escape a value placed inside a double-quoted CSS attribute selector.
pub fn attribute_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `limit` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_ident() {
        assert_eq!(css_ident("submit-btn_2"), "submit-btn_2");
        assert_eq!(css_ident("md:flex"), "md\\:flex");
        assert_eq!(css_ident("w-1/2"), "w-1\\/2");
        assert_eq!(css_ident("1col"), "\\31 col");
        assert_eq!(css_ident("-1"), "-\\31 ");
        assert_eq!(css_ident("-"), "\\-");
        assert_eq!(css_ident("--x"), "--x");
        assert_eq!(css_ident("-a1"), "-a1");
    }

    #[test]
    fn test_attribute_value() {
        assert_eq!(attribute_value(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(attribute_value(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_normalize_and_truncate() {
        assert_eq!(normalize_text("  Sign \n\t in  "), "Sign in");
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 30), "short");
    }
}
