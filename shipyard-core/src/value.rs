//! Conversion of parsed nodes into dynamically shaped field maps.

use serde_json::{Map, Number, Value};

use crate::node::ParseNode;

/// Key under which a block's own tokens are stored when it also has children.
pub const WRAPPED_VALUE_KEY: &str = "_value";

/// Ordered field map used for raw and partially transformed records.
pub type FieldMap = Map<String, Value>;

/// Convert a single token into a JSON scalar.
///
/// Tokens that read as integers or finite floats become numbers; everything
/// else, including `NaN` and `inf`, stays a string.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use shipyard_core::token_scalar;
///
/// assert_eq!(token_scalar("100"), json!(100));
/// assert_eq!(token_scalar("-0.5"), json!(-0.5));
/// assert_eq!(token_scalar("NaN"), json!("NaN"));
/// ```
#[must_use]
pub fn token_scalar(token: &str) -> Value {
    if let Ok(integer) = token.parse::<i64>() {
        return Value::Number(integer.into());
    }
    token
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(token.to_owned()), Value::Number)
}

/// Convert a node's tokens into a value: a presence marker, a scalar or an
/// array of scalars.
#[must_use]
pub fn tokens_value(values: &[String]) -> Value {
    match values {
        [] => Value::Bool(true),
        [single] => token_scalar(single),
        many => Value::Array(many.iter().map(|token| token_scalar(token)).collect()),
    }
}

/// Convert a node (tokens and children) into a value.
///
/// A node with children becomes an object; its own tokens, if any, are kept
/// under [`WRAPPED_VALUE_KEY`]. Repeated child keys collect into an array of
/// occurrences in file order.
#[must_use]
pub fn node_value(node: &ParseNode) -> Value {
    if node.children.is_empty() {
        return tokens_value(&node.values);
    }
    let mut object = FieldMap::new();
    if !node.values.is_empty() {
        object.insert(WRAPPED_VALUE_KEY.to_owned(), tokens_value(&node.values));
    }
    for (key, occurrences) in group_children(&node.children) {
        object.insert(key.to_owned(), occurrences_value(&occurrences));
    }
    Value::Object(object)
}

/// Group sibling nodes by key, ordered by each key's first appearance.
#[must_use]
pub fn group_children(children: &[ParseNode]) -> Vec<(&str, Vec<&ParseNode>)> {
    let mut groups: Vec<(&str, Vec<&ParseNode>)> = Vec::new();
    for child in children {
        match groups.iter_mut().find(|(key, _)| *key == child.key) {
            Some((_, members)) => members.push(child),
            None => groups.push((child.key.as_str(), vec![child])),
        }
    }
    groups
}

/// Convert one or more occurrences of a key: a single occurrence stays a
/// plain value, repeats become an array.
#[must_use]
pub fn occurrences_value(occurrences: &[&ParseNode]) -> Value {
    match occurrences {
        [single] => node_value(single),
        many => Value::Array(many.iter().map(|node| node_value(node)).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use rstest::rstest;
    use serde_json::json;

    fn first_node(text: &str) -> ParseNode {
        parse(text)
            .expect("valid text")
            .into_iter()
            .next()
            .expect("one node")
    }

    #[rstest]
    #[case("12", json!(12))]
    #[case("1.25", json!(1.25))]
    #[case("1e3", json!(1000.0))]
    #[case("Heavy Laser", json!("Heavy Laser"))]
    #[case("inf", json!("inf"))]
    fn converts_tokens(#[case] token: &str, #[case] expected: Value) {
        assert_eq!(token_scalar(token), expected);
    }

    #[rstest]
    fn converts_blocks_with_wrapped_tokens() {
        let node = first_node("sprite \"ship/falcon\"\n\t\"frame rate\" 2\n\t\"no repeat\"\n");

        assert_eq!(
            node_value(&node),
            json!({"_value": "ship/falcon", "frame rate": 2, "no repeat": true})
        );
    }

    #[rstest]
    fn collects_repeated_keys() {
        let node = first_node(
            "ship A\n\tdescription \"One.\"\n\tdescription \"Two.\"\n\tdescription \"Three.\"\n",
        );

        assert_eq!(
            node_value(&node),
            json!({"_value": "A", "description": ["One.", "Two.", "Three."]})
        );
    }

    #[rstest]
    fn keeps_multi_token_occurrences_separate() {
        let node = first_node(
            "ship A\n\tleak leak 50 50\n\tleak flare 10 5\n\tleak spark 1 1\n",
        );
        let groups = group_children(&node.children);

        assert_eq!(groups.len(), 1);
        assert_eq!(
            occurrences_value(&groups[0].1),
            json!([["leak", 50, 50], ["flare", 10, 5], ["spark", 1, 1]])
        );
    }
}
