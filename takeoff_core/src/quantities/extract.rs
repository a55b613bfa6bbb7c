//! Model-level quantity extractions used by the analysis.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{element_quantities, name_matches, property_definitions, sum_named_quantity, QuantityNames};
use crate::model::{Entity, ModelAccess};
use crate::units::round_weight;

/// Quantity types that can carry a wind pressure value
const WIND_PRESSURE_TYPES: [&str; 5] = [
    "IfcQuantityArea",
    "IfcQuantityLength",
    "IfcQuantityVolume",
    "IfcQuantityForce",
    "IfcQuantityPressure",
];

/// Quantity types that can carry a wall moment value
const WALL_MOMENT_TYPES: [&str; 5] = [
    "IfcQuantityArea",
    "IfcQuantityLength",
    "IfcQuantityVolume",
    "IfcQuantityForce",
    "IfcQuantityMoment",
];

/// Number of beams and columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCounts {
    pub beams: usize,
    pub columns: usize,
}

/// Wind quantities found in the model's quantity sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindQuantities {
    pub wind_pressure: f64,
    pub wall_moment: f64,
}

/// Roof pressure properties keyed by the roof's `GlobalId`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoofPressures {
    pub uplift: BTreeMap<String, f64>,
    pub down: BTreeMap<String, f64>,
}

impl RoofPressures {
    /// Sum of all uplift pressures
    pub fn total_uplift(&self) -> f64 {
        self.uplift.values().sum()
    }

    /// Sum of all downward pressures
    pub fn total_down(&self) -> f64 {
        self.down.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.uplift.is_empty() && self.down.is_empty()
    }
}

fn quantity_sets<M: ModelAccess + ?Sized>(model: &M) -> Vec<&Entity> {
    model.by_type("IfcElementQuantity")
}

/// Total dead load: weight quantities in any quantity set whose name
/// matches a dead-load alias, 2 decimals.
pub fn dead_load<M: ModelAccess + ?Sized>(model: &M, names: &QuantityNames) -> f64 {
    let total = sum_named_quantity(
        &quantity_sets(model),
        |set| model.related(set, "Quantities"),
        |quantity| quantity.is_a("IfcQuantityWeight"),
        &names.dead_load,
    );
    tracing::debug!(total, "dead load");
    total
}

/// Gross weight of every beam and column, 2 decimals.
///
/// Only quantities reached through the element's own quantity sets count.
/// A quantity is taken when it is a weight quantity or is named exactly
/// `Gross Weight`; its value is `GrossWeight`, falling back to
/// `WeightValue` when that is absent or zero.
pub fn beam_column_weight<M: ModelAccess + ?Sized>(model: &M) -> f64 {
    let mut total = 0.0;
    for type_name in ["IfcBeam", "IfcColumn"] {
        for element in model.by_type(type_name) {
            for quantity in element_quantities(model, element) {
                if quantity.is_a("IfcQuantityWeight") || quantity.name() == Some("Gross Weight") {
                    total += gross_weight(quantity);
                }
            }
        }
    }
    round_weight(total)
}

fn gross_weight(quantity: &Entity) -> f64 {
    quantity
        .number("GrossWeight")
        .filter(|value| *value != 0.0)
        .or_else(|| quantity.number("WeightValue"))
        .unwrap_or(0.0)
}

/// Wind pressure and wall moment quantities, summed over all matches.
pub fn wind_loads<M: ModelAccess + ?Sized>(model: &M, names: &QuantityNames) -> WindQuantities {
    let sets = quantity_sets(model);
    let traverse = |set: &Entity| model.related(set, "Quantities");

    let wind_pressure = sum_named_quantity(
        &sets,
        traverse,
        |q| WIND_PRESSURE_TYPES.iter().any(|t| q.is_a(t)),
        &names.wind_pressure,
    );
    let wall_moment = sum_named_quantity(
        &sets,
        traverse,
        |q| WALL_MOMENT_TYPES.iter().any(|t| q.is_a(t)),
        &names.wall_moment,
    );

    WindQuantities {
        wind_pressure,
        wall_moment,
    }
}

/// Beam and column counts
pub fn element_counts<M: ModelAccess + ?Sized>(model: &M) -> ElementCounts {
    ElementCounts {
        beams: model.by_type("IfcBeam").len(),
        columns: model.by_type("IfcColumn").len(),
    }
}

/// Number of building storeys
pub fn floor_count<M: ModelAccess + ?Sized>(model: &M) -> usize {
    model.by_type("IfcBuildingStorey").len()
}

/// Sum of every weight quantity in the model, 2 decimals
pub fn total_weight<M: ModelAccess + ?Sized>(model: &M) -> f64 {
    let total: f64 = model
        .by_type("IfcQuantityWeight")
        .iter()
        .filter_map(|quantity| quantity.number("WeightValue"))
        .sum();
    round_weight(total)
}

/// Unique profile names, sorted
pub fn section_types<M: ModelAccess + ?Sized>(model: &M) -> BTreeSet<String> {
    ["IfcStructuralProfileProperties", "IfcCShapeProfileDef"]
        .iter()
        .flat_map(|type_name| model.by_type(type_name))
        .filter_map(|profile| profile.text("ProfileName"))
        .map(str::to_string)
        .collect()
}

/// Uplift and downward pressure properties of every roof.
///
/// Walks `IsDefinedBy` to the roof's property sets and reads the
/// `NominalValue` of single-value properties whose name contains an uplift
/// or down-pressure alias. When several properties match for one roof, the
/// last one wins.
pub fn roof_pressures<M: ModelAccess + ?Sized>(model: &M, names: &QuantityNames) -> RoofPressures {
    let mut pressures = RoofPressures::default();

    for roof in model.by_type("IfcRoof") {
        let Some(global_id) = roof.text("GlobalId") else {
            tracing::warn!(entity = roof.id, "roof without GlobalId");
            continue;
        };
        for set in property_definitions(model, roof, "IfcPropertySet") {
            for property in model.related(set, "HasProperties") {
                if !property.is_a("IfcPropertySingleValue") {
                    continue;
                }
                let (Some(name), Some(value)) = (property.name(), property.number("NominalValue")) else {
                    continue;
                };
                if name_matches(name, &names.uplift) {
                    pressures.uplift.insert(global_id.to_string(), value);
                }
                if name_matches(name, &names.down_pressure) {
                    pressures.down.insert(global_id.to_string(), value);
                }
            }
        }
    }

    tracing::debug!(uplift = pressures.uplift.len(), down = pressures.down.len(), "roof pressures");
    pressures
}
