//! Coercion of declared numeric fields to finite numbers.

use std::collections::BTreeSet;

use serde_json::{Number, Value};

use super::{ATTRIBUTES_KEY, Transform};
use crate::record::RawRecord;
use crate::schema::RecordSchema;
use crate::value::{FieldMap, WRAPPED_VALUE_KEY};

/// Coerces declared numeric keys, at the top level and inside `attributes`,
/// to finite numbers. Keys that cannot be coerced are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericNormalizer {
    keys: BTreeSet<String>,
}

impl NumericNormalizer {
    /// A normalizer over the numeric keys declared by `schema`.
    #[must_use]
    pub fn new(schema: &RecordSchema) -> Self {
        Self {
            keys: schema.numeric_attributes.clone(),
        }
    }

    /// Normalize the declared keys of a single map in place.
    pub fn normalize(&self, map: &mut FieldMap) {
        map.retain(|key, value| {
            if !self.keys.contains(key) {
                return true;
            }
            match coerce_number(value) {
                Some(number) => {
                    *value = Value::Number(number);
                    true
                }
                None => false,
            }
        });
    }
}

impl Transform for NumericNormalizer {
    fn apply(&self, mut record: RawRecord) -> RawRecord {
        // Attributes are skipped by the top-level pass as the key is never numeric.
        self.normalize(&mut record.fields);
        if let Some(Value::Object(attributes)) = record.fields.get_mut(ATTRIBUTES_KEY) {
            self.normalize(attributes);
        }
        record
    }
}

/// Coerce `value` to a finite number.
///
/// Numbers pass through, strings are parsed after trimming (an empty string
/// reads as zero) and wrapped blocks are unwrapped. Anything else, or any
/// result that is not finite, yields `None`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use shipyard_core::transform::coerce_number;
///
/// assert_eq!(coerce_number(&json!(" 42 ")), Some(42.into()));
/// assert_eq!(coerce_number(&json!("")), Some(0.into()));
/// assert_eq!(coerce_number(&json!("NaN")), None);
/// assert_eq!(coerce_number(&json!({"_value": "1.5"})).and_then(|n| n.as_f64()), Some(1.5));
/// ```
#[must_use]
pub fn coerce_number(value: &Value) -> Option<Number> {
    let mut current = value;
    loop {
        match current {
            Value::Number(number) => {
                return number
                    .as_f64()
                    .filter(|float| float.is_finite())
                    .map(|_| number.clone());
            }
            Value::String(text) => return parse_number(text.trim()),
            Value::Object(map) => current = map.get(WRAPPED_VALUE_KEY)?,
            Value::Null | Value::Bool(_) | Value::Array(_) => return None,
        }
    }
}

fn parse_number(text: &str) -> Option<Number> {
    if text.is_empty() {
        return Some(Number::from(0));
    }
    if let Ok(integer) = text.parse::<i64>() {
        return Some(Number::from(integer));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}
