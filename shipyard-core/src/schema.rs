//! Declared numeric field set shared by normalization and validation.

use std::collections::BTreeSet;

/// Attributes that are coerced to numbers and must validate as numbers.
const DEFAULT_NUMERIC_ATTRIBUTES: &[&str] = &[
    "acceleration multiplier",
    "afterburner thrust",
    "bunks",
    "capture attack",
    "capture defense",
    "cargo space",
    "cooling",
    "cost",
    "drag",
    "energy capacity",
    "energy consumption",
    "energy generation",
    "engine capacity",
    "fuel capacity",
    "gun ports",
    "heat dissipation",
    "heat generation",
    "hull",
    "hull repair rate",
    "index",
    "inertia reduction",
    "mass",
    "outfit space",
    "required crew",
    "reverse thrust",
    "shield generation",
    "shields",
    "thrust",
    "turn",
    "turn multiplier",
    "turret mounts",
    "weapon capacity",
];

/// Schema applied to every record before publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    /// Keys whose values must be finite numbers when present.
    pub numeric_attributes: BTreeSet<String>,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            numeric_attributes: DEFAULT_NUMERIC_ATTRIBUTES
                .iter()
                .map(|&key| key.to_owned())
                .collect(),
        }
    }
}

impl RecordSchema {
    /// Build a schema over an explicit numeric key set.
    #[must_use]
    pub fn with_numeric<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            numeric_attributes: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `key` is declared numeric.
    #[must_use]
    pub fn is_numeric(&self, key: &str) -> bool {
        self.numeric_attributes.contains(key)
    }
}
