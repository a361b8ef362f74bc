//! Display figures for a ship's speed, acceleration and turning.
//!
//! The formulas reproduce the in-game ship info panel: speed scales with
//! thrust over drag, while acceleration and turning scale inversely with mass
//! after inertia reduction. Generic hulls (no fixed cargo load) report
//! acceleration and turning as a range from fully laden to empty.

use serde::Serialize;
use serde_json::Value;

use crate::model::NormalizedShip;
use crate::value::FieldMap;

/// Error reported for ships that cannot move.
pub const NO_THRUSTER: &str = "no thruster!";
/// Error reported for ships that cannot turn.
pub const NO_STEERING: &str = "no steering!";

/// Movement-related attributes, with missing or non-numeric values read as
/// zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementAttributes {
    /// Forward thrust.
    pub thrust: f64,
    /// Reverse thrust.
    pub reverse_thrust: f64,
    /// Afterburner thrust.
    pub afterburner_thrust: f64,
    /// Turning force.
    pub turn: f64,
    /// Fractional reduction of effective mass.
    pub inertia_reduction: f64,
    /// Cargo capacity in tons.
    pub cargo_space: f64,
    /// Bonus applied to acceleration.
    pub acceleration_multiplier: f64,
    /// Bonus applied to turning.
    pub turn_multiplier: f64,
}

impl MovementAttributes {
    /// Read the movement attributes out of an attributes map.
    #[must_use]
    pub fn from_attributes(attributes: &FieldMap) -> Self {
        let read = |key: &str| attribute(attributes, key).unwrap_or_default();
        Self {
            thrust: read("thrust"),
            reverse_thrust: read("reverse thrust"),
            afterburner_thrust: read("afterburner thrust"),
            turn: read("turn"),
            inertia_reduction: read("inertia reduction"),
            cargo_space: read("cargo space"),
            acceleration_multiplier: read("acceleration multiplier"),
            turn_multiplier: read("turn multiplier"),
        }
    }

    fn has_thruster(&self) -> bool {
        self.thrust > 0.0 || self.reverse_thrust > 0.0 || self.afterburner_thrust > 0.0
    }

    fn forward_thrust(&self) -> f64 {
        if self.thrust > 0.0 {
            self.thrust
        } else {
            self.afterburner_thrust
        }
    }
}

/// Display-ready movement figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementStats {
    /// Whether any thruster is fitted.
    pub has_thruster: bool,
    /// Whether steering is fitted; unknown when there is no thruster.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_steering: Option<bool>,
    /// Why the ship cannot move, if it cannot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Top speed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<String>,
    /// Acceleration, or a `low - high` range for generic hulls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<String>,
    /// Turning rate, or a `low - high` range for generic hulls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turning: Option<String>,
}

impl MovementStats {
    /// Movement figures for a validated ship, reading `mass` and `drag`
    /// from its attributes.
    #[must_use]
    pub fn for_ship(ship: &NormalizedShip, is_generic: bool) -> Self {
        movement_stats(
            &ship.attributes,
            attribute(&ship.attributes, "mass").unwrap_or_default(),
            attribute(&ship.attributes, "drag"),
            is_generic,
        )
    }

    fn immobile(has_steering: Option<bool>, error: &str) -> Self {
        Self {
            has_thruster: has_steering.is_some(),
            has_steering,
            error: Some(error.to_owned()),
            max_speed: None,
            acceleration: None,
            turning: None,
        }
    }
}

/// Compute movement figures from `attributes`, total `mass` and `drag`.
///
/// Without drag every figure is `"0"`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use shipyard_core::movement_stats;
///
/// let attributes = json!({"thrust": 100, "turn": 0});
/// let stats = movement_stats(attributes.as_object().unwrap(), 100.0, Some(1.0), false);
/// assert!(stats.has_thruster);
/// assert_eq!(stats.has_steering, Some(false));
/// assert_eq!(stats.error.as_deref(), Some("no steering!"));
/// ```
#[must_use]
pub fn movement_stats(
    attributes: &FieldMap,
    mass: f64,
    drag: Option<f64>,
    is_generic: bool,
) -> MovementStats {
    let stats = MovementAttributes::from_attributes(attributes);
    if !stats.has_thruster() {
        return MovementStats::immobile(None, NO_THRUSTER);
    }
    if stats.turn <= 0.0 {
        return MovementStats::immobile(Some(false), NO_STEERING);
    }

    let (max_speed, acceleration, turning) = match drag.filter(|value| *value > 0.0) {
        Some(drag) => figures(&stats, mass, drag, is_generic),
        None => ("0".to_owned(), "0".to_owned(), "0".to_owned()),
    };
    MovementStats {
        has_thruster: true,
        has_steering: Some(true),
        error: None,
        max_speed: Some(max_speed),
        acceleration: Some(acceleration),
        turning: Some(turning),
    }
}

#[expect(clippy::float_arithmetic, reason = "movement formulas are floating point")]
fn figures(
    stats: &MovementAttributes,
    mass: f64,
    drag: f64,
    is_generic: bool,
) -> (String, String, String) {
    let forward = stats.forward_thrust();
    let reduction = 1.0 + stats.inertia_reduction;
    let empty_mass = mass / reduction;
    let full_mass = (empty_mass + stats.cargo_space) / reduction;
    let current_mass = mass / reduction;

    let acceleration = |divisor: f64| 3600.0 * forward * (1.0 + stats.acceleration_multiplier) / divisor;
    let turning = |divisor: f64| 60.0 * stats.turn * (1.0 + stats.turn_multiplier) / divisor;

    let max_speed = format_stat(60.0 * forward / drag);
    if is_generic {
        (
            max_speed,
            range(acceleration(full_mass), acceleration(empty_mass)),
            range(turning(full_mass), turning(empty_mass)),
        )
    } else {
        (
            max_speed,
            format_stat(acceleration(current_mass)),
            format_stat(turning(current_mass)),
        )
    }
}

fn range(low: f64, high: f64) -> String {
    format!("{} - {}", format_stat(low), format_stat(high))
}

/// Format a movement figure for display.
///
/// Magnitudes of 1000 or more are rounded to whole numbers; smaller values
/// keep up to two decimal places with trailing zeros removed. Non-finite
/// values (from a zero mass) display as `"0"`.
///
/// # Examples
///
/// ```
/// use shipyard_core::format_stat;
///
/// assert_eq!(format_stat(1234.56), "1235");
/// assert_eq!(format_stat(12.5), "12.5");
/// assert_eq!(format_stat(3.14159), "3.14");
/// assert_eq!(format_stat(7.0), "7");
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "rounding to display precision")]
pub fn format_stat(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let text = if value.abs() >= 1000.0 {
        format!("{:.0}", value.round())
    } else {
        let rounded = format!("{:.2}", (value * 100.0).round() / 100.0);
        rounded
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_owned()
    };
    if text == "-0" { "0".to_owned() } else { text }
}

fn attribute(attributes: &FieldMap, key: &str) -> Option<f64> {
    attributes.get(key).and_then(Value::as_f64)
}
