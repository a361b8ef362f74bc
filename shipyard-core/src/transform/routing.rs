//! Allow-list routing of top-level fields into `attributes`.

use serde_json::Value;

use super::{Transform, put_attributes, take_attributes};
use crate::record::{FINAL_EXPLODE_KEY, POSITION_KEYS, RawRecord};
use crate::scalar::ScalarSource;
use crate::value::FieldMap;

const SHIP_FIELDS: &[&str] = &[
    "name",
    "variantOf",
    "plural",
    "noun",
    "sprite",
    "thumbnail",
    "attributes",
    "add attributes",
    "outfits",
    "description",
    "descriptions",
    "licenses",
    "category",
    "positions",
    FINAL_EXPLODE_KEY,
];

const OUTFIT_FIELDS: &[&str] = &[
    "name",
    "plural",
    "category",
    "series",
    "index",
    "cost",
    "mass",
    "outfit space",
    "thumbnail",
    "attributes",
    "description",
    "descriptions",
    "licenses",
];

/// Moves ship fields outside the known set into `attributes`, never
/// overriding keys the attributes block already defines, and resolves the
/// ship's string fields to plain strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShipFieldRouter;

impl Transform for ShipFieldRouter {
    fn apply(&self, mut record: RawRecord) -> RawRecord {
        for key in ["plural", "noun", "sprite", "thumbnail"] {
            resolve_string(&mut record.fields, key);
        }
        record.fields = route(std::mem::take(&mut record.fields), |key| {
            SHIP_FIELDS.contains(&key) || POSITION_KEYS.contains(&key)
        });
        record
    }
}

/// Keeps the known outfit fields at the top level and moves every other
/// field into `attributes`.
///
/// `thumbnail` is resolved to a single string and a non-numeric `index` is
/// dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutfitTransformer;

impl Transform for OutfitTransformer {
    fn apply(&self, mut record: RawRecord) -> RawRecord {
        for key in ["plural", "series", "thumbnail"] {
            resolve_string(&mut record.fields, key);
        }
        if record.fields.get("index").is_some_and(|index| !index.is_number()) {
            record.fields.shift_remove("index");
        }
        record.fields = route(std::mem::take(&mut record.fields), |key| {
            OUTFIT_FIELDS.contains(&key)
        });
        record
    }
}

/// Split `fields` by `is_known`; the complement joins `attributes`.
fn route(fields: FieldMap, is_known: impl Fn(&str) -> bool) -> FieldMap {
    let (mut known, unknown): (FieldMap, FieldMap) =
        fields.into_iter().partition(|(key, _)| is_known(key.as_str()));
    if unknown.is_empty() {
        return known;
    }
    let mut attributes = take_attributes(&mut known);
    for (key, value) in unknown {
        attributes.entry(key).or_insert(value);
    }
    put_attributes(&mut known, attributes);
    known
}

/// Replace a multi-shape value with its single string, removing the field
/// when none can be found.
fn resolve_string(fields: &mut FieldMap, key: &str) {
    let Some(value) = fields.get_mut(key) else {
        return;
    };
    if value.is_string() {
        return;
    }
    match ScalarSource::of(Some(&*value)).single_string() {
        Some(text) => *value = Value::String(text),
        None => {
            fields.shift_remove(key);
        }
    }
}
