//! Extraction of raw ship and outfit records from a parsed file.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::ParseNode;
use crate::value::{FieldMap, group_children, node_value, occurrences_value};

/// Keys of the repeatable hardpoint and effect blocks on a ship.
pub const POSITION_KEYS: [&str; 6] = ["engine", "gun", "turret", "bay", "leak", "explode"];

/// Key of the single death-effect line on a ship.
pub const FINAL_EXPLODE_KEY: &str = "final explode";

/// Kind of record a top-level node introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A `ship` definition.
    Ship,
    /// An `outfit` definition.
    Outfit,
}

impl RecordKind {
    /// Every record kind, in output order.
    pub const ALL: [Self; 2] = [Self::Ship, Self::Outfit];

    /// Key of the top-level node introducing this kind.
    #[must_use]
    pub const fn node_key(self) -> &'static str {
        match self {
            Self::Ship => "ship",
            Self::Outfit => "outfit",
        }
    }

    /// Plural label used for artefact names and log lines.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Ship => "ships",
            Self::Outfit => "outfits",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_key())
    }
}

/// A record as found in the source, before any normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Kind of the originating node.
    pub kind: RecordKind,
    /// Line of the originating node.
    pub source_line: usize,
    /// Every field found beneath the node.
    pub fields: FieldMap,
}

impl RawRecord {
    /// Build a record directly from a field map.
    #[must_use]
    pub const fn new(kind: RecordKind, fields: FieldMap) -> Self {
        Self {
            kind,
            source_line: 0,
            fields,
        }
    }

    /// The record's name, when it has a string one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }
}

/// Extract one raw record per top-level node of `kind`.
///
/// An unquoted header names the record with its whole remainder, as does a
/// single quoted token. A quoted header of two or more tokens declares a
/// variant: the second is the name and the first is recorded as `variantOf`.
///
/// # Examples
///
/// ```
/// use shipyard_core::{RecordKind, extract_records, parse};
///
/// # fn main() -> Result<(), shipyard_core::ParseError> {
/// let forest = parse("ship Shuttle\n\tgun 1 2\n\tgun 3 4\noutfit Laser\n")?;
/// let ships = extract_records(&forest, RecordKind::Ship);
/// assert_eq!(ships.len(), 1);
/// assert_eq!(ships[0].name(), Some("Shuttle"));
/// assert_eq!(ships[0].fields["gun"].as_array().map(Vec::len), Some(2));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn extract_records(forest: &[ParseNode], kind: RecordKind) -> Vec<RawRecord> {
    forest
        .iter()
        .filter(|node| node.key == kind.node_key())
        .map(|node| extract_record(node, kind))
        .collect()
}

fn extract_record(node: &ParseNode, kind: RecordKind) -> RawRecord {
    let mut fields = FieldMap::new();
    match (node.value.as_ref(), node.values.as_slice()) {
        (Some(name), _) => {
            fields.insert("name".to_owned(), Value::String(name.clone()));
        }
        (None, [base, variant, ..]) => {
            fields.insert("name".to_owned(), Value::String(variant.clone()));
            fields.insert("variantOf".to_owned(), Value::String(base.clone()));
        }
        (None, _) => {}
    }

    for (key, occurrences) in group_children(&node.children) {
        if fields.contains_key(key) {
            continue;
        }
        let value = if POSITION_KEYS.contains(&key) {
            Value::Array(occurrences.iter().map(|occurrence| node_value(occurrence)).collect())
        } else if key == "licenses" {
            Value::Array(license_tokens(&occurrences))
        } else {
            occurrences_value(&occurrences)
        };
        fields.insert(key.to_owned(), value);
    }

    RawRecord {
        kind,
        source_line: node.source_line,
        fields,
    }
}

fn license_tokens(occurrences: &[&ParseNode]) -> Vec<Value> {
    occurrences
        .iter()
        .flat_map(|block| {
            let own = block.values.iter();
            let nested = block
                .children
                .iter()
                .flat_map(|child| std::iter::once(&child.key).chain(child.values.iter()));
            own.chain(nested)
        })
        .map(|token| Value::String(token.clone()))
        .collect()
}
