//! Resolution of values that may arrive in several shapes.
//!
//! The same logical field can be written as a bare string, as repeated lines
//! (an array) or as a block whose own tokens sit under `_value`. Consumers ask
//! a [`ScalarSource`] for the shape they need instead of inspecting values
//! themselves.

use serde_json::Value;

use crate::value::{FieldMap, WRAPPED_VALUE_KEY};

/// A field value classified by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarSource<'a> {
    /// A plain string.
    Text(&'a str),
    /// A number.
    Number(f64),
    /// Repeated occurrences or a multi-token line.
    List(&'a [Value]),
    /// A block, possibly carrying its own scalar under `_value`.
    Wrapped(&'a FieldMap),
    /// Missing, null or a presence marker.
    Absent,
}

impl<'a> ScalarSource<'a> {
    /// Classify an optional value.
    #[must_use]
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::String(text)) => Self::Text(text),
            Some(Value::Number(number)) => number.as_f64().map_or(Self::Absent, Self::Number),
            Some(Value::Array(items)) => Self::List(items),
            Some(Value::Object(map)) => Self::Wrapped(map),
            Some(Value::Bool(_) | Value::Null) | None => Self::Absent,
        }
    }

    /// Resolve a single string.
    ///
    /// A string is taken as-is; an array yields its first element; a block
    /// yields its first string-valued member.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use shipyard_core::ScalarSource;
    ///
    /// let thumb = json!(["thumbnail/a", "thumbnail/b"]);
    /// assert_eq!(
    ///     ScalarSource::of(Some(&thumb)).single_string().as_deref(),
    ///     Some("thumbnail/a")
    /// );
    /// ```
    #[must_use]
    pub fn single_string(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.to_owned()),
            Self::List(items) => items
                .first()
                .and_then(|first| Self::of(Some(first)).single_string()),
            Self::Wrapped(map) => map.values().find_map(|member| match member {
                Value::String(text) => Some(text.clone()),
                _ => None,
            }),
            Self::Number(_) | Self::Absent => None,
        }
    }

    /// Resolve an ordered list of strings.
    ///
    /// A string yields a one-element list. An array keeps every element that
    /// is a string or a block wrapping a string, skipping the rest.
    #[must_use]
    pub fn string_list(self) -> Vec<String> {
        match self {
            Self::Text(text) => vec![text.to_owned()],
            Self::List(items) => items.iter().filter_map(string_element).collect(),
            Self::Wrapped(map) => wrapped_string(map).into_iter().collect(),
            Self::Number(_) | Self::Absent => Vec::new(),
        }
    }
}

fn string_element(item: &Value) -> Option<String> {
    match item {
        Value::String(text) => Some(text.clone()),
        Value::Object(map) => wrapped_string(map),
        _ => None,
    }
}

fn wrapped_string(map: &FieldMap) -> Option<String> {
    match map.get(WRAPPED_VALUE_KEY) {
        Some(Value::String(text)) => Some(text.clone()),
        _ => None,
    }
}

/// Resolve the description lines of a record.
#[must_use]
pub fn description_list(value: Option<&Value>) -> Vec<String> {
    ScalarSource::of(value).string_list()
}

/// Resolve the licenses of a record.
///
/// Unlike descriptions, `None` is returned when no valid license string is
/// found, keeping "no licenses configured" distinct from an empty list.
#[must_use]
pub fn license_list(value: Option<&Value>) -> Option<Vec<String>> {
    let licenses = ScalarSource::of(value).string_list();
    (!licenses.is_empty()).then_some(licenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("A ship."), vec!["A ship."])]
    #[case(json!(["One.", 4, {"_value": "Two."}, {"other": "x"}, "Three."]), vec!["One.", "Two.", "Three."])]
    #[case(json!({"_value": "Wrapped."}), vec!["Wrapped."])]
    #[case(json!(true), Vec::<&str>::new())]
    fn resolves_description_shapes(#[case] raw: Value, #[case] expected: Vec<&str>) {
        assert_eq!(description_list(Some(&raw)), expected);
    }

    #[rstest]
    fn missing_descriptions_are_empty() {
        assert!(description_list(None).is_empty());
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(json!([1, 2])), None)]
    #[case(Some(json!("Navy")), Some(vec!["Navy".to_owned()]))]
    #[case(Some(json!(["Navy", "Militia"])), Some(vec!["Navy".to_owned(), "Militia".to_owned()]))]
    fn separates_missing_from_invalid_licenses(
        #[case] raw: Option<Value>,
        #[case] expected: Option<Vec<String>>,
    ) {
        assert_eq!(license_list(raw.as_ref()), expected);
    }

    #[rstest]
    #[case(json!("outfit/laser"), Some("outfit/laser"))]
    #[case(json!(["outfit/a", "outfit/b"]), Some("outfit/a"))]
    #[case(json!({"frame rate": 2, "_value": "ship/a"}), Some("ship/a"))]
    #[case(json!({"frame rate": 2}), None)]
    #[case(json!(12), None)]
    fn resolves_single_strings(#[case] raw: Value, #[case] expected: Option<&str>) {
        assert_eq!(
            ScalarSource::of(Some(&raw)).single_string().as_deref(),
            expected
        );
    }
}
