//! Normalized records and the batch envelope written to disk.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::value::FieldMap;

/// A hardpoint, bay or effect anchor on a ship hull.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Position {
    /// An engine flare.
    Engine {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
        /// Optional flare zoom.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        z: Option<f64>,
    },
    /// A fixed gun port.
    Gun {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
        /// Outfit installed in the port.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outfit: Option<String>,
    },
    /// A turret mount.
    Turret {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
        /// Outfit installed in the mount.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        outfit: Option<String>,
    },
    /// A carried-craft bay.
    Bay {
        /// Category of craft the bay holds.
        bay_type: String,
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
        /// Effect played when a craft launches.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        launch_effect: Option<String>,
    },
    /// A damage leak emitter.
    Leak {
        /// Effect emitted.
        effect: String,
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
    },
    /// An explosion played on destruction.
    Explode {
        /// Effect played.
        effect: String,
        /// How many times it is played.
        count: u32,
    },
    /// The single final explosion.
    FinalExplode {
        /// Effect played.
        effect: String,
    },
}

impl Position {
    /// The tagged JSON form of this position, as stored on raw records.
    ///
    /// Matches the serde representation field for field. Non-finite
    /// coordinates become `null`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut fields = FieldMap::new();
        let mut put = |key: &str, value: Value| {
            fields.insert(key.to_owned(), value);
        };
        let kind = match self {
            Self::Engine { x, y, z } => {
                put("x", Value::from(*x));
                put("y", Value::from(*y));
                if let Some(zoom) = z {
                    put("z", Value::from(*zoom));
                }
                "engine"
            }
            Self::Gun { x, y, outfit } | Self::Turret { x, y, outfit } => {
                put("x", Value::from(*x));
                put("y", Value::from(*y));
                if let Some(name) = outfit {
                    put("outfit", Value::from(name.as_str()));
                }
                if matches!(self, Self::Gun { .. }) { "gun" } else { "turret" }
            }
            Self::Bay {
                bay_type,
                x,
                y,
                launch_effect,
            } => {
                put("bayType", Value::from(bay_type.as_str()));
                put("x", Value::from(*x));
                put("y", Value::from(*y));
                if let Some(effect) = launch_effect {
                    put("launchEffect", Value::from(effect.as_str()));
                }
                "bay"
            }
            Self::Leak { effect, x, y } => {
                put("effect", Value::from(effect.as_str()));
                put("x", Value::from(*x));
                put("y", Value::from(*y));
                "leak"
            }
            Self::Explode { effect, count } => {
                put("effect", Value::from(effect.as_str()));
                put("count", Value::from(*count));
                "explode"
            }
            Self::FinalExplode { effect } => {
                put("effect", Value::from(effect.as_str()));
                "finalExplode"
            }
        };
        let mut tagged = FieldMap::new();
        tagged.insert("kind".to_owned(), Value::from(kind));
        tagged.append(&mut fields);
        Value::Object(tagged)
    }
}

/// One installed outfit in a ship's loadout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitEntry {
    /// Outfit name.
    pub name: String,
    /// Number installed.
    pub quantity: i64,
}

/// A ship ready for publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedShip {
    /// Display name.
    pub name: String,
    /// URL-safe identifier derived from the name.
    pub slug: String,
    /// Base ship this one is a variant of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_of: Option<String>,
    /// Plural form of the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    /// Noun used in conversation text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noun: Option<String>,
    /// Sprite path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    /// Thumbnail path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Physical and economic attributes.
    pub attributes: FieldMap,
    /// Installed outfits.
    #[serde(default)]
    pub outfits: Vec<OutfitEntry>,
    /// Hardpoints, bays and effects.
    #[serde(default)]
    pub positions: Vec<Position>,
    /// Description paragraphs.
    #[serde(default)]
    pub descriptions: Vec<String>,
    /// Licenses required to buy the ship.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<String>>,
}

/// An outfit ready for publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOutfit {
    /// Display name.
    pub name: String,
    /// URL-safe identifier derived from the name.
    pub slug: String,
    /// Plural form of the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    /// Outfitter category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Outfitter series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    /// Sort index within the series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<Number>,
    /// Price in credits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Number>,
    /// Mass in tons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<Number>,
    /// Outfit space consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outfit_space: Option<Number>,
    /// Thumbnail path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Remaining fields, including weapon blocks.
    pub attributes: FieldMap,
    /// Description paragraphs.
    #[serde(default)]
    pub descriptions: Vec<String>,
    /// Licenses required to buy the outfit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<String>>,
}

/// Provenance stamped on every published batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMetadata {
    /// Game version the data was read from.
    pub version: String,
    /// Format version combined with the game version.
    pub schema_version: String,
    /// Species the batch belongs to.
    pub species: String,
    /// ISO-8601 UTC generation timestamp.
    pub generated_at: String,
    /// Number of records in the batch.
    pub item_count: usize,
}

/// A published artefact: metadata plus validated records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch<T> {
    /// Batch provenance.
    pub metadata: BatchMetadata,
    /// Validated records.
    pub data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(
        Position::Bay { bay_type: "Fighter".into(), x: 1.0, y: 2.0, launch_effect: None },
        json!({"kind": "bay", "bayType": "Fighter", "x": 1.0, "y": 2.0})
    )]
    #[case(
        Position::FinalExplode { effect: "final explosion small".into() },
        json!({"kind": "finalExplode", "effect": "final explosion small"})
    )]
    #[case(
        Position::Gun { x: -5.0, y: 3.5, outfit: Some("Laser".into()) },
        json!({"kind": "gun", "x": -5.0, "y": 3.5, "outfit": "Laser"})
    )]
    fn positions_serialise_with_kind_tags(#[case] position: Position, #[case] expected: serde_json::Value) {
        assert_eq!(serde_json::to_value(&position).expect("serialise"), expected);
        assert_eq!(position.to_value(), expected);
    }

    #[rstest]
    #[case(Position::Engine { x: 1.0, y: -2.0, z: Some(0.5) })]
    #[case(Position::Engine { x: 1.0, y: -2.0, z: None })]
    #[case(Position::Turret { x: 0.0, y: 4.0, outfit: None })]
    #[case(Position::Bay {
        bay_type: "Drone".into(),
        x: 3.0,
        y: 4.0,
        launch_effect: Some("human internal".into()),
    })]
    #[case(Position::Leak { effect: "leak".into(), x: 5.0, y: 6.0 })]
    #[case(Position::Explode { effect: "tiny explosion".into(), count: 3 })]
    fn built_values_read_back_as_the_same_position(#[case] position: Position) {
        let restored: Position =
            serde_json::from_value(position.to_value()).expect("tagged position");
        assert_eq!(restored, position);
    }

    #[rstest]
    fn ships_omit_unset_optionals() {
        let ship = NormalizedShip {
            name: "Shuttle".into(),
            slug: "shuttle".into(),
            variant_of: None,
            plural: None,
            noun: None,
            sprite: None,
            thumbnail: None,
            attributes: FieldMap::new(),
            outfits: Vec::new(),
            positions: Vec::new(),
            descriptions: Vec::new(),
            licenses: None,
        };

        assert_eq!(
            serde_json::to_value(&ship).expect("serialise"),
            json!({
                "name": "Shuttle",
                "slug": "shuttle",
                "attributes": {},
                "outfits": [],
                "positions": [],
                "descriptions": []
            })
        );
    }
}
