//! Description and license extraction.

use serde_json::Value;

use super::Transform;
use crate::record::RawRecord;
use crate::scalar::{description_list, license_list};

const DESCRIPTION_KEY: &str = "description";
const DESCRIPTIONS_KEY: &str = "descriptions";
const LICENSES_KEY: &str = "licenses";

/// Resolves `description` lines into a `descriptions` list and `licenses`
/// into a string list, removing `licenses` when no valid entry remains.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor;

impl Transform for TextExtractor {
    fn apply(&self, mut record: RawRecord) -> RawRecord {
        let source = record
            .fields
            .shift_remove(DESCRIPTION_KEY)
            .or_else(|| record.fields.shift_remove(DESCRIPTIONS_KEY));
        let descriptions = description_list(source.as_ref());
        record.fields.insert(
            DESCRIPTIONS_KEY.to_owned(),
            Value::Array(descriptions.into_iter().map(Value::String).collect()),
        );

        match license_list(record.fields.get(LICENSES_KEY)) {
            Some(licenses) => {
                record.fields.insert(
                    LICENSES_KEY.to_owned(),
                    Value::Array(licenses.into_iter().map(Value::String).collect()),
                );
            }
            None => {
                record.fields.shift_remove(LICENSES_KEY);
            }
        }
        record
    }
}
