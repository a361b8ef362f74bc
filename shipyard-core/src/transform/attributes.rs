//! Guarantees every record carries a merged attributes object.

use serde_json::Value;

use super::{ATTRIBUTES_KEY, Transform, put_attributes};
use crate::record::RawRecord;
use crate::value::FieldMap;

const ADD_ATTRIBUTES_KEY: &str = "add attributes";
const CATEGORY_KEY: &str = "category";
const UNKNOWN_CATEGORY: &str = "Unknown";

/// Ensures `attributes` is an object, folds in `add attributes` and fills
/// `attributes.category`.
///
/// Repeated attribute blocks merge in file order. The top-level `category`
/// is copied, never moved.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributesNormalizer;

impl Transform for AttributesNormalizer {
    fn apply(&self, mut record: RawRecord) -> RawRecord {
        let mut attributes = FieldMap::new();
        for block in object_blocks(record.fields.get_mut(ATTRIBUTES_KEY).map(Value::take)) {
            merge_into(&mut attributes, block);
        }
        for block in object_blocks(record.fields.shift_remove(ADD_ATTRIBUTES_KEY)) {
            merge_into(&mut attributes, block);
        }

        if !attributes.contains_key(CATEGORY_KEY) {
            let category = record
                .fields
                .get(CATEGORY_KEY)
                .filter(|value| !value.is_null())
                .cloned()
                .unwrap_or_else(|| Value::String(UNKNOWN_CATEGORY.to_owned()));
            attributes.insert(CATEGORY_KEY.to_owned(), category);
        }

        put_attributes(&mut record.fields, attributes);
        record
    }
}

fn object_blocks(value: Option<Value>) -> Vec<FieldMap> {
    match value {
        Some(Value::Object(map)) => vec![map],
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Merge `source` into `target`: nested objects merge recursively, anything
/// else in `source` replaces the value in `target`.
pub(crate) fn merge_into(target: &mut FieldMap, source: FieldMap) {
    for (key, incoming) in source {
        if let Value::Object(nested) = incoming {
            if let Some(Value::Object(existing)) = target.get_mut(&key) {
                merge_into(existing, nested);
                continue;
            }
            target.insert(key, Value::Object(nested));
        } else {
            target.insert(key, incoming);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordKind;
    use rstest::rstest;
    use serde_json::json;

    fn normalize(fields: Value) -> FieldMap {
        let Value::Object(map) = fields else {
            panic!("fixture must be an object");
        };
        AttributesNormalizer
            .apply(RawRecord::new(RecordKind::Ship, map))
            .fields
    }

    #[rstest]
    #[case(json!({"name": "A"}))]
    #[case(json!({"name": "A", "attributes": true}))]
    fn synthesizes_missing_attributes(#[case] fields: Value) {
        let normalized = normalize(fields);
        assert_eq!(normalized["attributes"], json!({"category": "Unknown"}));
    }

    #[rstest]
    fn merges_add_attributes_recursively() {
        let normalized = normalize(json!({
            "attributes": {"mass": 10, "weapon": {"range": 5, "sound": "a"}, "tags": [1]},
            "add attributes": {"mass": 12, "weapon": {"range": 9}, "tags": [2, 3]}
        }));

        assert_eq!(
            normalized["attributes"],
            json!({
                "mass": 12,
                "weapon": {"range": 9, "sound": "a"},
                "tags": [2, 3],
                "category": "Unknown"
            })
        );
        assert!(!normalized.contains_key("add attributes"));
    }

    #[rstest]
    fn copies_top_level_category_without_moving_it() {
        let normalized = normalize(json!({"category": "Light Warship", "attributes": {}}));

        assert_eq!(normalized["attributes"]["category"], json!("Light Warship"));
        assert_eq!(normalized["category"], json!("Light Warship"));
    }

    #[rstest]
    fn keeps_own_category() {
        let normalized = normalize(json!({
            "category": "Light Warship",
            "attributes": {"category": "Interceptor"}
        }));

        assert_eq!(normalized["attributes"]["category"], json!("Interceptor"));
    }
}
