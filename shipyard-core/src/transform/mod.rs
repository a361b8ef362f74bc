//! Composable reshaping stages applied to raw records.
//!
//! Each stage implements [`Transform`] and takes ownership of a record,
//! returning the reshaped record. A [`TransformChain`] applies its stages left
//! to right; later stages rely on the shape produced by earlier ones, so the
//! stock chains built by [`TransformChain::ships`] and
//! [`TransformChain::outfits`] fix the order.

mod attributes;
mod numeric;
mod outfits;
mod positions;
mod routing;
mod text;

pub use attributes::AttributesNormalizer;
pub use numeric::{NumericNormalizer, coerce_number};
pub use outfits::OutfitsListTransformer;
pub use positions::PositionExtractor;
pub use routing::{OutfitTransformer, ShipFieldRouter};
pub use text::TextExtractor;

use serde_json::Value;

use crate::record::{RawRecord, RecordKind};
use crate::schema::RecordSchema;
use crate::value::FieldMap;

/// Key of the attributes block on every record.
pub const ATTRIBUTES_KEY: &str = "attributes";

/// A pure reshaping step over one raw record.
pub trait Transform: Send + Sync {
    /// Reshape `record`.
    fn apply(&self, record: RawRecord) -> RawRecord;
}

/// An ordered sequence of [`Transform`] stages.
#[derive(Default)]
pub struct TransformChain {
    stages: Vec<Box<dyn Transform>>,
}

impl TransformChain {
    /// An empty chain that returns records unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `stage` to the end of the chain.
    #[must_use]
    pub fn then(mut self, stage: impl Transform + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// The stock chain for ship records.
    #[must_use]
    pub fn ships(schema: &RecordSchema) -> Self {
        Self::new()
            .then(AttributesNormalizer)
            .then(ShipFieldRouter)
            .then(OutfitsListTransformer)
            .then(PositionExtractor)
            .then(NumericNormalizer::new(schema))
            .then(TextExtractor)
    }

    /// The stock chain for outfit records.
    #[must_use]
    pub fn outfits(schema: &RecordSchema) -> Self {
        Self::new()
            .then(OutfitTransformer)
            .then(AttributesNormalizer)
            .then(NumericNormalizer::new(schema))
            .then(TextExtractor)
    }

    /// The stock chain for `kind`.
    #[must_use]
    pub fn for_kind(kind: RecordKind, schema: &RecordSchema) -> Self {
        match kind {
            RecordKind::Ship => Self::ships(schema),
            RecordKind::Outfit => Self::outfits(schema),
        }
    }

    /// Number of stages in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run `record` through every stage in order.
    #[must_use]
    pub fn apply(&self, record: RawRecord) -> RawRecord {
        self.stages
            .iter()
            .fold(record, |current, stage| stage.apply(current))
    }
}

impl Transform for TransformChain {
    fn apply(&self, record: RawRecord) -> RawRecord {
        Self::apply(self, record)
    }
}

/// Remove the attributes object from `fields`, leaving its slot in place.
///
/// Anything other than an object yields an empty map.
pub(crate) fn take_attributes(fields: &mut FieldMap) -> FieldMap {
    match fields.get_mut(ATTRIBUTES_KEY).map(Value::take) {
        Some(Value::Object(map)) => map,
        _ => FieldMap::new(),
    }
}

/// Store `attributes` back on `fields`.
pub(crate) fn put_attributes(fields: &mut FieldMap, attributes: FieldMap) {
    fields.insert(ATTRIBUTES_KEY.to_owned(), Value::Object(attributes));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn record(kind: RecordKind, fields: Value) -> RawRecord {
        match fields {
            Value::Object(map) => RawRecord::new(kind, map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[rstest]
    fn empty_chain_is_identity() {
        let raw = record(RecordKind::Ship, json!({"name": "A", "mass": "x"}));
        let chain = TransformChain::new();

        assert!(chain.is_empty());
        assert_eq!(chain.apply(raw.clone()), raw);
    }

    #[rstest]
    fn ship_chain_produces_validatable_shape() {
        let raw = record(
            RecordKind::Ship,
            json!({
                "name": "Shuttle",
                "category": "Transport",
                "attributes": {"mass": "70", "drag": "NaN"},
                "outfits": {"Ion Engine": 1, "Hyperdrive": true},
                "gun": [[-5, 10]],
                "description": "A small ship.",
                "thumbnail": ["thumbnail/shuttle"],
                "crew": 1
            }),
        );

        let shaped = TransformChain::ships(&RecordSchema::default()).apply(raw);

        assert_eq!(
            shaped.fields["attributes"],
            json!({"mass": 70, "category": "Transport", "crew": 1, "gun ports": 1})
        );
        assert_eq!(
            shaped.fields["outfits"],
            json!([{"name": "Ion Engine", "quantity": 1}, {"name": "Hyperdrive", "quantity": 1}])
        );
        assert_eq!(shaped.fields["positions"], json!([{"kind": "gun", "x": -5.0, "y": 10.0}]));
        assert_eq!(shaped.fields["descriptions"], json!(["A small ship."]));
        assert_eq!(shaped.fields["thumbnail"], json!("thumbnail/shuttle"));
        assert!(!shaped.fields.contains_key("crew"));
    }

    #[rstest]
    fn outfit_chain_routes_unknown_fields_into_attributes() {
        let raw = record(
            RecordKind::Outfit,
            json!({
                "name": "Laser",
                "category": "Guns",
                "cost": "12000",
                "index": "first",
                "weapon": {"shield damage": 4},
                "licenses": ["Navy"]
            }),
        );

        let shaped = TransformChain::for_kind(RecordKind::Outfit, &RecordSchema::default())
            .apply(raw);

        assert_eq!(shaped.fields["cost"], json!(12000));
        assert!(!shaped.fields.contains_key("index"));
        assert_eq!(
            shaped.fields["attributes"],
            json!({"weapon": {"shield damage": 4}, "category": "Guns"})
        );
        assert_eq!(shaped.fields["licenses"], json!(["Navy"]));
    }
}
