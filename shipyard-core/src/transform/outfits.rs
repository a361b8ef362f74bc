//! Reshaping of a ship's installed outfit block into an ordered list.

use serde_json::{Value, json};

use super::Transform;
use crate::record::RawRecord;
use crate::value::FieldMap;

const OUTFITS_KEY: &str = "outfits";

/// Converts the `outfits` block of a ship into `[{name, quantity}]`.
///
/// Numeric values are quantities; any other marker counts as one. A name
/// listed on several lines sums its quantities. A missing, null or empty
/// block yields an empty list.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutfitsListTransformer;

impl Transform for OutfitsListTransformer {
    fn apply(&self, mut record: RawRecord) -> RawRecord {
        let entries = match record.fields.get_mut(OUTFITS_KEY).map(Value::take) {
            Some(Value::Object(block)) => entries(block),
            Some(Value::Array(blocks)) => blocks
                .into_iter()
                .filter_map(|block| match block {
                    Value::Object(map) => Some(entries(map)),
                    _ => None,
                })
                .flatten()
                .collect(),
            _ => Vec::new(),
        };
        record
            .fields
            .insert(OUTFITS_KEY.to_owned(), Value::Array(entries));
        record
    }
}

fn entries(block: FieldMap) -> Vec<Value> {
    block
        .into_iter()
        .map(|(name, marker)| json!({"name": name, "quantity": quantity(&marker)}))
        .collect()
}

fn quantity(marker: &Value) -> i64 {
    match marker {
        Value::Number(number) => number.as_i64().unwrap_or_else(|| truncated(number)),
        Value::Array(occurrences) => occurrences.iter().map(quantity).sum(),
        _ => 1,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "fractional quantities truncate toward zero, saturating at the i64 range"
)]
fn truncated(number: &serde_json::Number) -> i64 {
    number.as_f64().map_or(1, |float| float as i64)
}
