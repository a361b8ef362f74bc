//! Extraction of hardpoints, bays and effect anchors from ship records.

use serde_json::Value;

use super::{Transform, coerce_number, put_attributes, take_attributes};
use crate::model::Position;
use crate::record::{FINAL_EXPLODE_KEY, POSITION_KEYS, RawRecord};
use crate::scalar::ScalarSource;
use crate::value::WRAPPED_VALUE_KEY;

const POSITIONS_KEY: &str = "positions";
const LAUNCH_EFFECT_KEY: &str = "launch effect";
const GUN_PORTS_KEY: &str = "gun ports";
const TURRET_MOUNTS_KEY: &str = "turret mounts";

/// Replaces the position blocks of a ship with a typed `positions` list and
/// records `gun ports` and `turret mounts` counts in `attributes`.
///
/// Counts are only written for blocks that occur at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionExtractor;

impl Transform for PositionExtractor {
    fn apply(&self, mut record: RawRecord) -> RawRecord {
        let mut positions = Vec::new();
        let mut counts = Vec::new();

        for key in POSITION_KEYS {
            let Some(block) = record.fields.shift_remove(key) else {
                continue;
            };
            let occurrences = match block {
                Value::Array(items) => items,
                single => vec![single],
            };
            match key {
                "gun" => counts.push((GUN_PORTS_KEY, occurrences.len())),
                "turret" => counts.push((TURRET_MOUNTS_KEY, occurrences.len())),
                _ => {}
            }
            positions.extend(
                occurrences
                    .iter()
                    .filter_map(|occurrence| position(key, occurrence)),
            );
        }

        if let Some(effect) = record
            .fields
            .shift_remove(FINAL_EXPLODE_KEY)
            .and_then(|value| ScalarSource::of(Some(&value)).single_string())
        {
            positions.push(Position::FinalExplode { effect });
        }

        if !counts.is_empty() {
            let mut attributes = take_attributes(&mut record.fields);
            for (key, count) in counts {
                attributes.insert(key.to_owned(), Value::from(count));
            }
            put_attributes(&mut record.fields, attributes);
        }

        record.fields.insert(
            POSITIONS_KEY.to_owned(),
            Value::Array(positions.iter().map(Position::to_value).collect()),
        );
        record
    }
}

fn position(key: &str, occurrence: &Value) -> Option<Position> {
    let values = tokens(occurrence);
    let mut fields = values.iter().copied();
    let position = match key {
        "engine" => Position::Engine {
            x: coordinate(fields.next()),
            y: coordinate(fields.next()),
            z: fields.next().and_then(finite),
        },
        "gun" => Position::Gun {
            x: coordinate(fields.next()),
            y: coordinate(fields.next()),
            outfit: fields.next().and_then(text),
        },
        "turret" => Position::Turret {
            x: coordinate(fields.next()),
            y: coordinate(fields.next()),
            outfit: fields.next().and_then(text),
        },
        "bay" => Position::Bay {
            bay_type: fields.next().and_then(text).unwrap_or_default(),
            x: coordinate(fields.next()),
            y: coordinate(fields.next()),
            launch_effect: match occurrence {
                Value::Object(block) => {
                    ScalarSource::of(block.get(LAUNCH_EFFECT_KEY)).single_string()
                }
                _ => None,
            },
        },
        "leak" => Position::Leak {
            effect: fields.next().and_then(text).unwrap_or_default(),
            x: coordinate(fields.next()),
            y: coordinate(fields.next()),
        },
        "explode" => Position::Explode {
            effect: fields.next().and_then(text).unwrap_or_default(),
            count: fields
                .next()
                .and_then(coerce_number)
                .and_then(|number| number.as_u64())
                .and_then(|count| u32::try_from(count).ok())
                .unwrap_or(1),
        },
        _ => return None,
    };
    Some(position)
}

/// The positional tokens of one occurrence.
fn tokens(occurrence: &Value) -> Vec<&Value> {
    match occurrence {
        Value::Array(items) => items.iter().collect(),
        Value::Object(block) => block.get(WRAPPED_VALUE_KEY).map_or_else(Vec::new, tokens),
        Value::Bool(_) | Value::Null => Vec::new(),
        scalar @ (Value::Number(_) | Value::String(_)) => vec![scalar],
    }
}

fn finite(token: &Value) -> Option<f64> {
    coerce_number(token).and_then(|number| number.as_f64())
}

fn coordinate(token: Option<&Value>) -> f64 {
    token.and_then(finite).unwrap_or_default()
}

fn text(token: &Value) -> Option<String> {
    match token {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
