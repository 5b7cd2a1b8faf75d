use std::fmt;
use std::str::FromStr;

use crate::error::BuildError;

/// Conversion factor from pounds-per-square-inch to kilopascals.
pub const PSI_TO_KPA: f64 = 6.894_757_29;

/// Unit label carried by every series in the output artifact.
pub const OUTPUT_UNIT: &str = "kPa";

// ── PressureUnit ──────────────────────────────────────────────────────────────

/// The physical unit assumed for raw pressure values before conversion.
///
/// Raw `.dat` files carry no unit metadata, so the source unit is a single
/// process-wide setting. Output is always kilopascals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureUnit {
    /// Pounds per square inch; converted with [`PSI_TO_KPA`].
    Psi,
    /// Already kilopascals; conversion is the identity.
    KiloPascal,
}

impl PressureUnit {
    /// Convert a raw value in this unit into kilopascals.
    pub fn to_kilopascals(self, value: f64) -> f64 {
        match self {
            PressureUnit::Psi => value * PSI_TO_KPA,
            PressureUnit::KiloPascal => value,
        }
    }

    /// The linear factor applied by [`to_kilopascals`](Self::to_kilopascals).
    pub fn factor_to_kilopascals(self) -> f64 {
        match self {
            PressureUnit::Psi => PSI_TO_KPA,
            PressureUnit::KiloPascal => 1.0,
        }
    }
}

impl FromStr for PressureUnit {
    type Err = BuildError;

    /// Accepts `"psi"` and `"kPa"` case-insensitively; anything else is an
    /// error (never guessed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "psi" => Ok(PressureUnit::Psi),
            "kpa" => Ok(PressureUnit::KiloPascal),
            _ => Err(BuildError::UnknownUnit(s.to_string())),
        }
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PressureUnit::Psi => write!(f, "psi"),
            PressureUnit::KiloPascal => write!(f, "kPa"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
