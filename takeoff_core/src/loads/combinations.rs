//! ASCE 7-22 gravity load combinations for the building totals.
//!
//! Only the vertical categories (D, L, S, Di) are combined. The lateral
//! wind force and seismic base shear act horizontally, so the wind and
//! earthquake rows of Sections 2.3 and 2.4 are not tabulated. The ice rows
//! drop their wind-on-ice term for the same reason.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::load_types::LoadType;
use super::load_types::LoadType::{Dead as D, Ice as DI, Live as L, Snow as S};
use super::LoadCase;

type Row = (&'static str, &'static str, &'static [(LoadType, f64)]);

const ASD_TABLE: &[Row] = &[
    ("ASD-1", "D", &[(D, 1.0)]),
    ("ASD-2", "D + L", &[(D, 1.0), (L, 1.0)]),
    ("ASD-3", "D + S", &[(D, 1.0), (S, 1.0)]),
    ("ASD-4", "D + 0.75L + 0.75S", &[(D, 1.0), (L, 0.75), (S, 0.75)]),
    ("ASD-Di1", "D + L + 0.7Di", &[(D, 1.0), (L, 1.0), (DI, 0.7)]),
    ("ASD-Di2", "D + 0.7Di + S", &[(D, 1.0), (DI, 0.7), (S, 1.0)]),
];

const LRFD_TABLE: &[Row] = &[
    ("LRFD-1", "1.4D", &[(D, 1.4)]),
    ("LRFD-2", "1.2D + 1.6L + 0.5S", &[(D, 1.2), (L, 1.6), (S, 0.5)]),
    ("LRFD-3", "1.2D + 1.6S + L", &[(D, 1.2), (S, 1.6), (L, 1.0)]),
    ("LRFD-Di1", "1.2D + 1.6L + 0.2Di + 0.5S", &[(D, 1.2), (L, 1.6), (DI, 0.2), (S, 0.5)]),
    ("LRFD-Di2", "1.2D + L + Di + 0.5S", &[(D, 1.2), (L, 1.0), (DI, 1.0), (S, 0.5)]),
];

/// A named set of load factors.
///
/// # Example
/// ```
/// use takeoff_core::loads::{LoadCase, LoadCombination, LoadType};
///
/// let combo = LoadCombination::new("ASD-2", "D + L")
///     .with_factor(LoadType::Dead, 1.0)
///     .with_factor(LoadType::Live, 1.0);
/// let case = LoadCase::new("Building")
///     .with_load(LoadType::Dead, 2000.0)
///     .with_load(LoadType::Live, 500.0);
/// assert_eq!(combo.apply(&case), 2500.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Identifier, e.g. "ASD-Di2"
    pub name: String,

    /// Display equation, e.g. "D + 0.7Di + S"
    pub equation: String,

    pub factors: BTreeMap<LoadType, f64>,
}

impl LoadCombination {
    pub fn new(name: impl Into<String>, equation: impl Into<String>) -> Self {
        LoadCombination {
            name: name.into(),
            equation: equation.into(),
            factors: BTreeMap::new(),
        }
    }

    /// Add a load factor (builder pattern)
    pub fn with_factor(mut self, load_type: LoadType, factor: f64) -> Self {
        self.factors.insert(load_type, factor);
        self
    }

    /// Factored total; load types missing from either side count as zero
    pub fn apply(&self, case: &LoadCase) -> f64 {
        self.factors
            .iter()
            .map(|(load_type, factor)| factor * case.get(*load_type))
            .sum()
    }

    /// Factor for a load type (0.0 if absent)
    pub fn get_factor(&self, load_type: LoadType) -> f64 {
        self.factors.get(&load_type).copied().unwrap_or(0.0)
    }
}

fn build(table: &[Row]) -> Vec<LoadCombination> {
    table
        .iter()
        .map(|(name, equation, factors)| {
            factors
                .iter()
                .fold(LoadCombination::new(*name, *equation), |combo, (load_type, factor)| {
                    combo.with_factor(*load_type, *factor)
                })
        })
        .collect()
}

/// ASD combinations (Section 2.4)
pub fn asd_combinations() -> Vec<LoadCombination> {
    build(ASD_TABLE)
}

/// LRFD combinations (Section 2.3)
pub fn lrfd_combinations() -> Vec<LoadCombination> {
    build(LRFD_TABLE)
}

/// Largest and smallest factored totals over a set of combinations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoverningCombination {
    /// Strength case
    pub max_load: f64,
    pub max_combo: String,
    /// Lightest factored total
    pub min_load: f64,
    pub min_combo: String,
}

/// Apply every combination and keep the extremes.
///
/// Ties keep the earlier combination. An empty table gives zero loads and
/// empty names.
pub fn find_governing(case: &LoadCase, combinations: &[LoadCombination]) -> GoverningCombination {
    let results: Vec<(f64, &str)> = combinations
        .iter()
        .map(|combo| (combo.apply(case), combo.name.as_str()))
        .collect();

    let mut max: Option<(f64, &str)> = None;
    let mut min: Option<(f64, &str)> = None;
    for &(load, name) in &results {
        if max.map_or(true, |(best, _)| load > best) {
            max = Some((load, name));
        }
        if min.map_or(true, |(best, _)| load < best) {
            min = Some((load, name));
        }
    }

    let (max_load, max_combo) = max.unwrap_or((0.0, ""));
    let (min_load, min_combo) = min.unwrap_or((0.0, ""));
    GoverningCombination {
        max_load,
        max_combo: max_combo.to_string(),
        min_load,
        min_combo: min_combo.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_table_sizes() {
        assert_eq!(asd_combinations().len(), 6);
        assert_eq!(lrfd_combinations().len(), 5);
    }

    #[test]
    fn test_names_are_unique() {
        for combos in [asd_combinations(), lrfd_combinations()] {
            let mut names: Vec<&str> = combos.iter().map(|c| c.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), combos.len());
        }
    }

    #[test]
    fn test_lrfd_dead_only_factor() {
        let combos = lrfd_combinations();
        let lrfd1 = combos.iter().find(|c| c.name == "LRFD-1").unwrap();
        assert_eq!(lrfd1.get_factor(LoadType::Dead), 1.4);
        assert_eq!(lrfd1.get_factor(LoadType::Ice), 0.0);
    }

    #[test]
    fn test_governing_gravity() {
        let case = LoadCase::new("Building")
            .with_load(LoadType::Dead, 20.0)
            .with_load(LoadType::Live, 50.0);

        let asd = find_governing(&case, &asd_combinations());
        assert_relative_eq!(asd.max_load, 70.0, epsilon = 1e-9);
        assert_eq!(asd.max_combo, "ASD-2");

        let lrfd = find_governing(&case, &lrfd_combinations());
        // 1.2D + 1.6L
        assert_relative_eq!(lrfd.max_load, 104.0, epsilon = 1e-9);
        assert_eq!(lrfd.max_combo, "LRFD-2");
    }

    #[test]
    fn test_lightest_combination() {
        let case = LoadCase::new("Roof")
            .with_load(LoadType::Dead, 10.0)
            .with_load(LoadType::Live, 30.0);

        // D and D + S tie with no snow; the earlier row is kept
        let asd = find_governing(&case, &asd_combinations());
        assert_relative_eq!(asd.min_load, 10.0, epsilon = 1e-9);
        assert_eq!(asd.min_combo, "ASD-1");

        let lrfd = find_governing(&case, &lrfd_combinations());
        assert_relative_eq!(lrfd.min_load, 14.0, epsilon = 1e-9);
        assert_eq!(lrfd.min_combo, "LRFD-1");
    }

    #[test]
    fn test_every_row_is_gravity_only() {
        for combo in asd_combinations().into_iter().chain(lrfd_combinations()) {
            assert!(combo.factors.values().all(|factor| *factor > 0.0), "{}", combo.name);
            assert!(combo.get_factor(LoadType::Dead) > 0.0, "{}", combo.name);
        }
    }

    #[test]
    fn test_ice_combination_governs_heavy_ice() {
        let case = LoadCase::new("Iced roof")
            .with_load(LoadType::Dead, 100.0)
            .with_load(LoadType::Ice, 400.0);
        let lrfd = find_governing(&case, &lrfd_combinations());
        // 1.2D + Di = 520
        assert_relative_eq!(lrfd.max_load, 520.0, epsilon = 1e-9);
        assert_eq!(lrfd.max_combo, "LRFD-Di2");
    }

    #[test]
    fn test_empty_table() {
        let result = find_governing(&LoadCase::default(), &[]);
        assert_eq!(result.max_load, 0.0);
        assert!(result.max_combo.is_empty());
    }

    #[test]
    fn test_combination_serialization() {
        let combo = LoadCombination::new("ASD-Di1", "D + 0.7Di")
            .with_factor(LoadType::Dead, 1.0)
            .with_factor(LoadType::Ice, 0.7);
        let json = serde_json::to_string(&combo).unwrap();
        let parsed: LoadCombination = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, combo);
    }
}
