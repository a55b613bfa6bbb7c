//! Load categories reported by the takeoff

use serde::{Deserialize, Serialize};

/// Gravity load categories per ASCE 7-22 Section 2 that the takeoff derives.
///
/// All of them act downward on the building totals. Lateral wind force and
/// seismic base shear are reported separately and never enter a
/// combination.
///
/// # Example
/// ```
/// use takeoff_core::loads::LoadType;
///
/// assert_eq!(LoadType::Ice.code(), "Di");
/// assert_eq!(LoadType::Dead.description(), "Dead load");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoadType {
    /// D - structure self-weight from the model's weight quantities
    Dead,
    /// L - floor live load from the per-floor entries
    Live,
    /// S - roof snow load
    Snow,
    /// Di - atmospheric ice weight on the roof
    Ice,
}

impl LoadType {
    /// All load types in reporting order
    pub const ALL: [LoadType; 4] = [LoadType::Dead, LoadType::Live, LoadType::Snow, LoadType::Ice];

    /// Abbreviation used in combination equations
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Dead => "D",
            LoadType::Live => "L",
            LoadType::Snow => "S",
            LoadType::Ice => "Di",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LoadType::Dead => "Dead load",
            LoadType::Live => "Live load",
            LoadType::Snow => "Snow load",
            LoadType::Ice => "Ice load",
        }
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
