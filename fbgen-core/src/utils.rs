//! Shared identifier helpers for code generation.

/// Convert a snake_case schema name to camel case, optionally upper-casing
/// the first character (e.g. `("test_type", true)` -> `"TestType"`).
///
/// A trailing underscore is kept as-is.
pub fn make_camel(s: &str, first_upper: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    let mut first = true;
    while let Some(c) = chars.next() {
        if first && first_upper {
            out.extend(c.to_uppercase());
        } else if c == '_' && chars.peek().is_some() {
            if let Some(next) = chars.next() {
                out.extend(next.to_uppercase());
            }
        } else {
            out.push(c);
        }
        first = false;
    }
    out
}

/// Upper-case the first character (`"getRootAs"` -> `"GetRootAs"`).
pub fn to_upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-case the first character (`"Mutate"` -> `"mutate"`).
pub fn to_lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}
