//! Schema enforcement for fully transformed records.
//!
//! Validation is per record: a record that fails is dropped and reported to
//! a [`WarningSink`], and the rest of the batch carries on. The sink is passed
//! in by the caller so that no global logger is needed to observe drops.

use serde::de::DeserializeOwned;
use serde_json::{Number, Value};
use thiserror::Error;

use crate::model::{NormalizedOutfit, NormalizedShip};
use crate::record::{RawRecord, RecordKind};
use crate::schema::RecordSchema;
use crate::slug::slugify;
use crate::transform::ATTRIBUTES_KEY;
use crate::value::FieldMap;

/// Species tag of records whose origin could not be determined.
pub const DEFAULT_SPECIES: &str = "unknown";

/// Receives one message per dropped record.
pub trait WarningSink: Sync {
    /// Record a warning.
    fn warn(&self, message: &str);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogWarnings;

impl WarningSink for LogWarnings {
    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }
}

/// Why a record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{kind} \"{}\" failed validation: {}",
    .name.as_deref().unwrap_or("unknown"),
    .reasons.join("; ")
)]
pub struct ValidationError {
    /// Kind of the rejected record.
    pub kind: RecordKind,
    /// Name of the rejected record, when it had one.
    pub name: Option<String>,
    /// Every failed rule, in check order.
    pub reasons: Vec<String>,
}

/// A publishable record type built from a transformed [`RawRecord`].
pub trait Normalized: Sized {
    /// Record kind this type is built from.
    const KIND: RecordKind;

    /// Validate `record` against `schema`.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] listing every failed rule.
    fn from_record(record: RawRecord, schema: &RecordSchema) -> Result<Self, ValidationError>;
}

impl Normalized for NormalizedShip {
    const KIND: RecordKind = RecordKind::Ship;

    fn from_record(record: RawRecord, schema: &RecordSchema) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(Self::KIND, record.fields);
        let name = reader.name();
        let ship = Self {
            slug: slugify(&name),
            variant_of: reader.optional_string("variantOf"),
            plural: reader.optional_string("plural"),
            noun: reader.optional_string("noun"),
            sprite: reader.optional_string("sprite"),
            thumbnail: reader.optional_string("thumbnail"),
            attributes: reader.attributes(schema),
            outfits: reader.list("outfits"),
            positions: reader.list("positions"),
            descriptions: reader.list("descriptions"),
            licenses: reader.optional_list("licenses"),
            name,
        };
        reader.finish().map(|()| ship)
    }
}

impl Normalized for NormalizedOutfit {
    const KIND: RecordKind = RecordKind::Outfit;

    fn from_record(record: RawRecord, schema: &RecordSchema) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(Self::KIND, record.fields);
        let name = reader.name();
        let outfit = Self {
            slug: slugify(&name),
            plural: reader.optional_string("plural"),
            category: reader.optional_string("category"),
            series: reader.optional_string("series"),
            index: reader.optional_number("index"),
            cost: reader.optional_number("cost"),
            mass: reader.optional_number("mass"),
            outfit_space: reader.optional_number("outfit space"),
            thumbnail: reader.optional_string("thumbnail"),
            attributes: reader.attributes(schema),
            descriptions: reader.list("descriptions"),
            licenses: reader.optional_list("licenses"),
            name,
        };
        reader.finish().map(|()| outfit)
    }
}

/// Validate a batch, keeping passing records in order.
///
/// Each rejected record produces exactly one warning, prefixed with
/// `[species]` unless `species` is `None` or [`DEFAULT_SPECIES`].
#[must_use]
pub fn validate_batch<T: Normalized>(
    records: Vec<RawRecord>,
    schema: &RecordSchema,
    species: Option<&str>,
    sink: &dyn WarningSink,
) -> Vec<T> {
    let prefix = species
        .filter(|tag| *tag != DEFAULT_SPECIES)
        .map(|tag| format!("[{tag}] "))
        .unwrap_or_default();
    records
        .into_iter()
        .filter_map(|record| match T::from_record(record, schema) {
            Ok(valid) => Some(valid),
            Err(err) => {
                sink.warn(&format!("{prefix}dropping {err}"));
                None
            }
        })
        .collect()
}

struct FieldReader {
    kind: RecordKind,
    fields: FieldMap,
    name: Option<String>,
    reasons: Vec<String>,
}

impl FieldReader {
    const fn new(kind: RecordKind, fields: FieldMap) -> Self {
        Self {
            kind,
            fields,
            name: None,
            reasons: Vec::new(),
        }
    }

    fn name(&mut self) -> String {
        match self.fields.get("name") {
            Some(Value::String(name)) if !name.trim().is_empty() => {
                self.name = Some(name.clone());
                name.clone()
            }
            Some(Value::String(_)) => {
                self.reasons.push("name must not be empty".to_owned());
                String::new()
            }
            _ => {
                self.reasons.push("name is required".to_owned());
                String::new()
            }
        }
    }

    fn optional_string(&mut self, key: &str) -> Option<String> {
        match self.fields.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(_) => {
                self.reasons.push(format!("`{key}` must be a string"));
                None
            }
        }
    }

    fn optional_number(&mut self, key: &str) -> Option<Number> {
        match self.fields.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::Number(number)) => Some(number.clone()),
            Some(_) => {
                self.reasons.push(format!("`{key}` must be a number"));
                None
            }
        }
    }

    fn attributes(&mut self, schema: &RecordSchema) -> FieldMap {
        let attributes = match self.fields.get_mut(ATTRIBUTES_KEY).map(Value::take) {
            None | Some(Value::Null) => FieldMap::new(),
            Some(Value::Object(map)) => map,
            Some(_) => {
                self.reasons.push("`attributes` must be an object".to_owned());
                return FieldMap::new();
            }
        };
        for (key, value) in &attributes {
            if schema.is_numeric(key) && !value.is_number() {
                self.reasons
                    .push(format!("attribute `{key}` must be a number"));
            }
        }
        attributes
    }

    fn list<T: DeserializeOwned>(&mut self, key: &str) -> Vec<T> {
        self.optional_list(key).unwrap_or_default()
    }

    fn optional_list<T: DeserializeOwned>(&mut self, key: &str) -> Option<Vec<T>> {
        match self.fields.get_mut(key).map(Value::take) {
            None | Some(Value::Null) => None,
            Some(value) => match serde_json::from_value(value) {
                Ok(items) => Some(items),
                Err(err) => {
                    self.reasons.push(format!("`{key}` is malformed: {err}"));
                    None
                }
            },
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.reasons.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                kind: self.kind,
                name: self.name,
                reasons: self.reasons,
            })
        }
    }
}
