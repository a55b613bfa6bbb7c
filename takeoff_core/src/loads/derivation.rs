//! Load derivation from takeoff quantities and user inputs.
//!
//! Every function here is pure and infallible. Weights, loads and moments
//! are rounded to 2 decimals; the simplified seismic value is returned as
//! computed.

use serde::{Deserialize, Serialize};

use crate::units::{parse_or_zero, round_weight, Feet, Pounds, PlF, Psf, SqFt};

/// Site class amplification for the simplified seismic load
const SITE_AMPLIFICATION: [(f64, f64); 3] = [(0.0, 1.0), (1.0, 1.5), (2.0, 2.0)];

/// Amplification used for site classes outside the table
const DEFAULT_AMPLIFICATION: f64 = 1.0;

/// User-entered design inputs.
///
/// Every field defaults to `0.0`. [`LoadInputs::from_text`] applies the
/// permissive text contract: empty or malformed entries become `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadInputs {
    pub site_class: f64,
    pub importance_factor: f64,
    pub spectral_response_acceleration: f64,
    /// Wind force on the building (lb)
    pub wind_force: f64,
    /// Ground snow load (psf)
    pub snow_load_per_area: f64,
    /// Ice load (psf)
    pub ice_load_per_area: f64,
    /// Building / wall height (ft)
    pub building_height: f64,
}

/// Raw text entries, one per [`LoadInputs`] field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadInputText {
    pub site_class: String,
    pub importance_factor: String,
    pub spectral_response_acceleration: String,
    pub wind_force: String,
    pub snow_load_per_area: String,
    pub ice_load_per_area: String,
    pub building_height: String,
}

impl LoadInputs {
    /// Parse text entries; anything that is not a number becomes `0.0`
    ///
    /// ```rust
    /// use takeoff_core::loads::{LoadInputText, LoadInputs};
    ///
    /// let text = LoadInputText {
    ///     snow_load_per_area: "25".into(),
    ///     wind_force: "".into(),
    ///     building_height: "ten".into(),
    ///     ..Default::default()
    /// };
    /// let inputs = LoadInputs::from_text(&text);
    /// assert_eq!(inputs.snow_load_per_area, 25.0);
    /// assert_eq!(inputs.wind_force, 0.0);
    /// assert_eq!(inputs.building_height, 0.0);
    /// ```
    pub fn from_text(text: &LoadInputText) -> Self {
        LoadInputs {
            site_class: parse_or_zero(&text.site_class),
            importance_factor: parse_or_zero(&text.importance_factor),
            spectral_response_acceleration: parse_or_zero(&text.spectral_response_acceleration),
            wind_force: parse_or_zero(&text.wind_force),
            snow_load_per_area: parse_or_zero(&text.snow_load_per_area),
            ice_load_per_area: parse_or_zero(&text.ice_load_per_area),
            building_height: parse_or_zero(&text.building_height),
        }
    }
}

/// Live load share of one floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveLoadEntry {
    /// 1-based floor number
    pub floor: u32,
    /// Percent of the area load that acts as live load
    pub percentage_load: f64,
    pub area_load: f64,
}

/// Dead, live, snow and ice totals (lb)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedLoads {
    pub dead: f64,
    pub live: f64,
    pub snow: f64,
    pub ice: f64,
}

/// Wind pressure along the roof edge and the wall moment it causes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindLoadResult {
    pub wind_force: f64,
    pub building_height: f64,
    pub roof_perimeter: f64,
    /// Force per foot of roof perimeter (lb/ft)
    pub wind_pressure: f64,
    /// ft-lb
    pub wall_moment: f64,
}

/// Total snow load on the roof (lb)
pub fn snow_load(roof_area: f64, snow_load_per_area: f64) -> f64 {
    (SqFt(roof_area) * Psf(snow_load_per_area)).rounded(2).value()
}

/// Total ice load on the roof (lb)
pub fn ice_load(roof_area: f64, ice_load_per_area: f64) -> f64 {
    (SqFt(roof_area) * Psf(ice_load_per_area)).rounded(2).value()
}

/// Simplified seismic load: importance x spectral acceleration x site
/// amplification.
///
/// Site classes 0, 1 and 2 amplify by 1.0, 1.5 and 2.0; any other value
/// (including non-integers) uses 1.0.
///
/// ```rust
/// use takeoff_core::loads::seismic_load_simplified;
///
/// assert_eq!(seismic_load_simplified(1.0, 1.25, 1.0), 1.875);
/// assert_eq!(seismic_load_simplified(7.0, 1.0, 0.4), 0.4);
/// ```
pub fn seismic_load_simplified(site_class: f64, importance_factor: f64, spectral_response_acceleration: f64) -> f64 {
    let amplification = SITE_AMPLIFICATION
        .iter()
        .find(|(class, _)| *class == site_class)
        .map_or(DEFAULT_AMPLIFICATION, |(_, factor)| *factor);
    importance_factor * spectral_response_acceleration * amplification
}

/// Net roof pressure times perimeter (lb)
pub fn linear_load(perimeter: f64, down_pressure: f64, uplift_pressure: f64) -> f64 {
    (PlF(down_pressure - uplift_pressure) * Feet(perimeter)).rounded(2).value()
}

/// Wind force times height (ft-lb)
pub fn wall_moment(wind_force: f64, height: f64) -> f64 {
    (Pounds(wind_force) * Feet(height)).rounded(2).value()
}

/// Spread the wind force over the roof perimeter.
///
/// A zero perimeter gives an infinite (or NaN) pressure; callers check the
/// perimeter first.
pub fn wind_pressure_from_perimeter(wind_force: f64, building_height: f64, roof_perimeter: f64) -> WindLoadResult {
    let pressure = wind_force / roof_perimeter;
    let moment = pressure * building_height;
    WindLoadResult {
        wind_force,
        building_height,
        roof_perimeter,
        wind_pressure: round_weight(pressure),
        wall_moment: round_weight(moment),
    }
}

/// Sum of `area_load x percentage_load / 100` over floors with an area load
pub fn live_load_total(entries: &[LiveLoadEntry]) -> f64 {
    entries
        .iter()
        .filter(|entry| entry.area_load != 0.0)
        .map(|entry| entry.area_load * entry.percentage_load / 100.0)
        .sum()
}

/// Dead load with the live, snow and ice totals for the same building.
///
/// `dead` is passed through; live is [`live_load_total`] (unrounded); snow
/// and ice use `roof_area`.
pub fn dead_and_live_combined(
    dead: f64,
    live_loads: &[LiveLoadEntry],
    roof_area: f64,
    snow_load_per_area: f64,
    ice_load_per_area: f64,
) -> CombinedLoads {
    CombinedLoads {
        dead,
        live: live_load_total(live_loads),
        snow: snow_load(roof_area, snow_load_per_area),
        ice: ice_load(roof_area, ice_load_per_area),
    }
}
