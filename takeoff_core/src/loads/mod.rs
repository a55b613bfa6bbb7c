//! Load derivation and load combinations per ASCE 7-22
//!
//! Turns takeoff quantities (roof area, perimeters, dead load) and user
//! inputs into building-level load totals, then runs the gravity totals
//! through the ASD or LRFD combination tables.
//!
//! # Overview
//!
//! - [`derivation`] - snow, ice, seismic, linear, wall-moment and live loads
//! - [`seismic`] - base shear by equivalent static, SRSS, time history, modal
//!   superposition, capacity spectrum and ASCE 7 design methods
//! - [`LoadType`] / [`LoadCase`] - the gravity totals keyed by category
//! - [`LoadCombination`] / [`DesignMethod`] - combination tables
//!
//! # Example
//!
//! ```
//! use takeoff_core::loads::{dead_and_live_combined, DesignMethod, LoadCase, LiveLoadEntry};
//!
//! let live = [LiveLoadEntry { floor: 1, percentage_load: 40.0, area_load: 500.0 }];
//! let totals = dead_and_live_combined(1200.0, &live, 72.0, 20.0, 0.0);
//! let case = LoadCase::from_totals("Building", &totals);
//!
//! let governing = case.governing(DesignMethod::Lrfd);
//! assert_eq!(governing.max_combo, "LRFD-3");
//! ```

pub mod combinations;
pub mod derivation;
pub mod load_types;
pub mod seismic;

pub use combinations::{asd_combinations, find_governing, lrfd_combinations, GoverningCombination, LoadCombination};
pub use derivation::{
    dead_and_live_combined, ice_load, linear_load, live_load_total, seismic_load_simplified, snow_load, wall_moment,
    wind_pressure_from_perimeter, CombinedLoads, LiveLoadEntry, LoadInputText, LoadInputs, WindLoadResult,
};
pub use load_types::LoadType;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};

/// Design methodology selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DesignMethod {
    /// Allowable Stress Design
    #[default]
    Asd,
    /// Load and Resistance Factor Design
    Lrfd,
}

impl DesignMethod {
    /// Short abbreviation
    pub fn code(&self) -> &'static str {
        match self {
            DesignMethod::Asd => "ASD",
            DesignMethod::Lrfd => "LRFD",
        }
    }

    /// Combination table for this method
    pub fn combinations(&self) -> Vec<LoadCombination> {
        match self {
            DesignMethod::Asd => asd_combinations(),
            DesignMethod::Lrfd => lrfd_combinations(),
        }
    }
}

impl std::fmt::Display for DesignMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unfactored load totals by category.
///
/// # JSON Format
/// ```json
/// {
///   "label": "Building",
///   "loads": { "Dead": 1250.5, "Snow": 1440.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    pub label: String,
    pub loads: BTreeMap<LoadType, f64>,
}

impl LoadCase {
    pub fn new(label: impl Into<String>) -> Self {
        LoadCase {
            label: label.into(),
            loads: BTreeMap::new(),
        }
    }

    /// Building totals: dead, live, snow and ice from `totals`
    pub fn from_totals(label: impl Into<String>, totals: &CombinedLoads) -> Self {
        LoadCase::new(label)
            .with_load(LoadType::Dead, totals.dead)
            .with_load(LoadType::Live, totals.live)
            .with_load(LoadType::Snow, totals.snow)
            .with_load(LoadType::Ice, totals.ice)
    }

    /// Add or update a load value (builder pattern)
    pub fn with_load(mut self, load_type: LoadType, value: f64) -> Self {
        self.loads.insert(load_type, value);
        self
    }

    /// Load value for a type, 0.0 if not set
    pub fn get(&self, load_type: LoadType) -> f64 {
        self.loads.get(&load_type).copied().unwrap_or(0.0)
    }

    /// Reject negative totals.
    ///
    /// [`analyze`](crate::analysis::analyze) passes negative inputs through
    /// unchanged; callers that want to refuse them check here first.
    pub fn validate(&self) -> TakeoffResult<()> {
        for (load_type, value) in &self.loads {
            if *value < 0.0 {
                return Err(TakeoffError::invalid_input(
                    format!("load_{}", load_type.code()),
                    value.to_string(),
                    format!("{} cannot be negative", load_type.description()),
                ));
            }
        }
        Ok(())
    }

    /// Unfactored sum of every category
    pub fn total_gravity(&self) -> f64 {
        LoadType::ALL.iter().map(|load_type| self.get(*load_type)).sum()
    }

    /// Extremes over the method's combination table
    pub fn governing(&self, method: DesignMethod) -> GoverningCombination {
        find_governing(self, &method.combinations())
    }
}

impl Default for LoadCase {
    fn default() -> Self {
        LoadCase::new("Building")
    }
}
