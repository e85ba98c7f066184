use regex::Regex;
use std::sync::LazyLock;

/// All digits, or alphanumerics where a digit runs straight into a letter
/// (`a8f3kd`, `x7Yz`): the shape of bundler and CSS-in-JS hashes.
static HASH_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]+|[A-Za-z0-9]*[0-9][A-Za-z][A-Za-z0-9]*)$").unwrap()
});

/// Whether a class name looks generated rather than authored.
pub fn is_dynamic_class(class: &str, min_len: usize) -> bool {
    class.chars().count() < min_len
        || class.contains("__")
        || class.contains("--")
        || HASH_LIKE.is_match(class)
}

/// Classes worth building a selector from, in document order, without duplicates.
pub fn stable_classes(classes: &[String], min_len: usize) -> Vec<&str> {
    let mut kept: Vec<&str> = Vec::new();
    for class in classes {
        if !is_dynamic_class(class, min_len) && !kept.contains(&class.as_str()) {
            kept.push(class);
        }
    }
    kept
}
