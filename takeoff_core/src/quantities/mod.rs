//! # Quantity Aggregator
//!
//! Sums and tallies of quantities attached to model entities. Every
//! aggregation here follows the same shape: pick a set of entities, walk a
//! relation to their quantities, filter by type and by name, and sum a
//! numeric value. The name heuristics (which quantity names count as dead
//! load, wind pressure, ...) are data in [`QuantityNames`], not code.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::model::{Entity, Model, ModelAccess};
//! use takeoff_core::quantities::{dead_load, QuantityNames};
//!
//! let model = Model::new(
//!     "IFC4",
//!     vec![
//!         Entity::new(1, "IfcElementQuantity").with_relation("Quantities", [2]),
//!         Entity::new(2, "IfcQuantityWeight")
//!             .with_attribute("Name", "Gross Weight")
//!             .with_attribute("WeightValue", 1250.0),
//!     ],
//! );
//! assert_eq!(dead_load(&model, &QuantityNames::default()), 1250.0);
//! ```

pub mod auxiliary;
pub mod extract;

pub use auxiliary::{auxiliary_aggregate, NamedQuantityAggregate, SectionTally};
pub use extract::{
    beam_column_weight, dead_load, element_counts, floor_count, roof_pressures, section_types,
    total_weight, wind_loads, ElementCounts, RoofPressures, WindQuantities,
};

use serde::{Deserialize, Serialize};

use crate::model::{Entity, ModelAccess};
use crate::units::round_weight;

/// Value attribute for each IFC quantity type
const MEASURE_ATTRIBUTES: [(&str, &str); 9] = [
    ("IfcQuantityWeight", "WeightValue"),
    ("IfcQuantityArea", "AreaValue"),
    ("IfcQuantityLength", "LengthValue"),
    ("IfcQuantityVolume", "VolumeValue"),
    ("IfcQuantityCount", "CountValue"),
    ("IfcQuantityTime", "TimeValue"),
    ("IfcQuantityForce", "ForceValue"),
    ("IfcQuantityPressure", "PressureValue"),
    ("IfcQuantityMoment", "MomentValue"),
];

/// Numeric value of a quantity, read from the attribute matching its type.
///
/// Returns `None` for entities that are not a known quantity type or whose
/// value attribute is missing.
pub fn quantity_value(quantity: &Entity) -> Option<f64> {
    MEASURE_ATTRIBUTES
        .iter()
        .find(|(type_name, _)| quantity.is_a(type_name))
        .and_then(|(_, attribute)| quantity.number(attribute))
}

/// True when `name` contains any filter (case-sensitive). An empty filter
/// list matches nothing.
pub fn name_matches(name: &str, filters: &[String]) -> bool {
    filters.iter().any(|filter| name.contains(filter.as_str()))
}

/// Sum the values of matching quantities reached from `entities`.
///
/// For each entity, `traverse` yields its quantities. A quantity counts when
/// `quantity_predicate` accepts it and its `Name` contains one of
/// `name_filters`; its value comes from [`quantity_value`]. The total is
/// rounded to 2 decimals.
pub fn sum_named_quantity<'m, T, P>(
    entities: &[&'m Entity],
    traverse: T,
    quantity_predicate: P,
    name_filters: &[String],
) -> f64
where
    T: Fn(&'m Entity) -> Vec<&'m Entity>,
    P: Fn(&Entity) -> bool,
{
    let mut total = 0.0;
    let mut matched = 0usize;
    for &entity in entities {
        for quantity in traverse(entity) {
            if !quantity_predicate(quantity) {
                continue;
            }
            if !name_matches(quantity.name().unwrap_or_default(), name_filters) {
                continue;
            }
            if let Some(value) = quantity_value(quantity) {
                total += value;
                matched += 1;
            }
        }
    }
    tracing::trace!(entities = entities.len(), matched, total, "sum_named_quantity");
    round_weight(total)
}

/// Quantities attached to an element through its property definitions:
/// `IsDefinedBy` -> `IfcRelDefinesByProperties.RelatingPropertyDefinition`
/// -> `IfcElementQuantity.Quantities`.
pub fn element_quantities<'m, M: ModelAccess + ?Sized>(model: &'m M, element: &Entity) -> Vec<&'m Entity> {
    property_definitions(model, element, "IfcElementQuantity")
        .into_iter()
        .flat_map(|definition| model.related(definition, "Quantities"))
        .collect()
}

/// Property definitions of a given type attached to an element
pub(crate) fn property_definitions<'m, M: ModelAccess + ?Sized>(
    model: &'m M,
    element: &Entity,
    definition_type: &str,
) -> Vec<&'m Entity> {
    model
        .related(element, "IsDefinedBy")
        .into_iter()
        .filter(|rel| rel.is_a("IfcRelDefinesByProperties"))
        .flat_map(|rel| model.related(rel, "RelatingPropertyDefinition"))
        .filter(|definition| definition.is_a(definition_type))
        .collect()
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn default_dead_load() -> Vec<String> {
    strings(&["Dead Load", "DeadLoad", "Gross Weight", "GrossWeight"])
}

fn default_wind_pressure() -> Vec<String> {
    strings(&["Wind Pressure", "WindPressure", "Wind Load", "WindLoad", "Wind_Pressure", "Wind_Load"])
}

fn default_wall_moment() -> Vec<String> {
    strings(&["Wall Moment", "WallMoment", "Wind Moment", "WindMoment", "Wall_Moment", "Wind_Moment"])
}

fn default_uplift() -> Vec<String> {
    strings(&["UpliftPressure"])
}

fn default_down_pressure() -> Vec<String> {
    strings(&["DownPressure"])
}

/// Name substrings that identify each kind of quantity or property.
///
/// Loaded from the `[extraction.names]` table of the configuration file;
/// any list left out keeps its default. An empty list disables that lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityNames {
    #[serde(default = "default_dead_load")]
    pub dead_load: Vec<String>,

    #[serde(default = "default_wind_pressure")]
    pub wind_pressure: Vec<String>,

    #[serde(default = "default_wall_moment")]
    pub wall_moment: Vec<String>,

    /// Roof property names carrying uplift pressure
    #[serde(default = "default_uplift")]
    pub uplift: Vec<String>,

    /// Roof property names carrying downward pressure
    #[serde(default = "default_down_pressure")]
    pub down_pressure: Vec<String>,
}

impl Default for QuantityNames {
    fn default() -> Self {
        QuantityNames {
            dead_load: default_dead_load(),
            wind_pressure: default_wind_pressure(),
            wall_moment: default_wall_moment(),
            uplift: default_uplift(),
            down_pressure: default_down_pressure(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    fn weight(id: u64, name: &str, value: f64) -> Entity {
        Entity::new(id, "IfcQuantityWeight")
            .with_attribute("Name", name)
            .with_attribute("WeightValue", value)
    }

    fn model() -> Model {
        Model::new(
            "IFC4",
            vec![
                Entity::new(1, "IfcElementQuantity").with_relation("Quantities", [2, 3, 4]),
                weight(2, "Dead Load - slab", 100.125),
                weight(3, "Paint", 40.0),
                Entity::new(4, "IfcQuantityLength")
                    .with_attribute("Name", "Dead Load length")
                    .with_attribute("LengthValue", 12.0),
                Entity::new(5, "IfcElementQuantity").with_relation("Quantities", [6]),
                weight(6, "DeadLoad", 0.5),
            ],
        )
    }

    #[test]
    fn test_quantity_value_by_type() {
        assert_eq!(quantity_value(&weight(1, "x", 3.5)), Some(3.5));
        let area = Entity::new(2, "IFCQUANTITYAREA").with_attribute("AreaValue", 9.0);
        assert_eq!(quantity_value(&area), Some(9.0));
        let property = Entity::new(3, "IfcPropertySingleValue").with_attribute("WeightValue", 1.0);
        assert_eq!(quantity_value(&property), None);
    }

    #[test]
    fn test_sum_with_filters_and_predicate() {
        let model = model();
        let sets = model.by_type("IfcElementQuantity");
        let filters = strings(&["Dead Load", "DeadLoad"]);
        let total = sum_named_quantity(
            &sets,
            |set| model.related(set, "Quantities"),
            |q| q.is_a("IfcQuantityWeight"),
            &filters,
        );
        // 100.125 + 0.5, rounded once at the end
        assert_eq!(total, 100.63);
    }

    #[test]
    fn test_empty_filters_match_nothing() {
        let model = model();
        let sets = model.by_type("IfcElementQuantity");
        let total = sum_named_quantity(&sets, |set| model.related(set, "Quantities"), |_| true, &[]);
        assert_eq!(total, 0.0);
        assert!(!name_matches("Dead Load", &[]));
    }

    #[test]
    fn test_filters_are_case_sensitive() {
        assert!(name_matches("Gross Weight", &strings(&["Gross"])));
        assert!(!name_matches("gross weight", &strings(&["Gross"])));
        assert!(!name_matches("", &[]));
        assert!(name_matches("Gross Weight", &strings(&[""])));
    }

    #[test]
    fn test_partial_names_keep_defaults() {
        let names: QuantityNames = serde_json::from_str(r#"{"dead_load": ["Eigengewicht"]}"#).unwrap();
        assert_eq!(names.dead_load, vec!["Eigengewicht".to_string()]);
        assert_eq!(names.wind_pressure.len(), 6);
        assert_eq!(names.uplift, vec!["UpliftPressure".to_string()]);
    }
}
