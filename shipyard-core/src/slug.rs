//! URL-safe identifiers for published records.

/// Lowercase `text` and collapse every run of characters that are not ASCII
/// letters or digits into a single hyphen, trimming hyphens at either end.
///
/// # Examples
///
/// ```
/// use shipyard_core::slugify;
///
/// assert_eq!(
///     slugify("R01 Skirmish Battery (Advanced)!"),
///     "r01-skirmish-battery-advanced"
/// );
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}
