//! String conversion utilities.

/// Trims `value` and returns `None` when nothing is left.
///
/// Form fields arrive as raw strings; a display name of `"  "` is treated the
/// same as no display name at all.
///
/// # Examples
///
/// ```
/// use rolegate_domain::common::non_blank;
///
/// assert_eq!(non_blank(" Ann "), Some("Ann".to_string()));
/// assert_eq!(non_blank("   "), None);
/// ```
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extension trait for optional form input.
pub trait StringExt {
    /// Trims the string and converts it to `None` if blank.
    fn into_non_blank(self) -> Option<String>;
}

impl StringExt for String {
    fn into_non_blank(self) -> Option<String> {
        non_blank(&self)
    }
}

impl StringExt for Option<String> {
    fn into_non_blank(self) -> Option<String> {
        self.as_deref().and_then(non_blank)
    }
}
