//! # Analysis
//!
//! One pass over a model that produces every takeoff quantity and derived
//! load the report needs.
//!
//! Stages run in a fixed order: coordinates, plane areas, storeys,
//! force/moment vectors, roof pressures, hull and roof perimeters, element
//! counts, wind quantities, dead load, beam/column weight, then the loads
//! derived from those (snow, ice, seismic, linear, wall moment, wind
//! pressure) and finally the governing combination.
//!
//! ```rust
//! use takeoff_core::analysis::{analyze, AnalysisOptions};
//! use takeoff_core::loads::LoadInputs;
//! use takeoff_core::model::Model;
//!
//! let model = Model::new("IFC2X3", Vec::new());
//! let report = analyze(&model, &LoadInputs::default(), &[], &AnalysisOptions::default()).unwrap();
//! assert_eq!(report.story_message, "The building is a single story.");
//! assert_eq!(report.areas.xy, 0.0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TakeoffResult;
use crate::forces::{extract_forces_moments, FloorForces, FloorTotals};
use crate::geometry::{coordinates_from_model, footing_perimeter_polygon, perimeter, plane_areas, roof_perimeter};
use crate::geometry::{PlaneAreas, Point3D};
use crate::loads::{
    dead_and_live_combined, linear_load, seismic_load_simplified, wall_moment, wind_pressure_from_perimeter,
    CombinedLoads, DesignMethod, GoverningCombination, LiveLoadEntry, LoadCase, LoadInputs, WindLoadResult,
};
use crate::model::ModelAccess;
use crate::quantities::{
    auxiliary_aggregate, beam_column_weight, dead_load, element_counts, floor_count, roof_pressures, section_types,
    total_weight, wind_loads, ElementCounts, NamedQuantityAggregate, QuantityNames, RoofPressures, WindQuantities,
};

/// Points echoed into the report for a quick sanity check
pub const SAMPLE_POINTS: usize = 10;

/// Knobs for one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Drop raw `(0, 0, 0)` points before any geometry
    pub remove_origin: bool,
    /// Name aliases for the quantity lookups
    pub names: QuantityNames,
    /// Combination table used for the governing load
    pub design_method: DesignMethod,
}

/// Section counts and weights by profile name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuxiliarySummary {
    pub total_count: u32,
    pub sections: NamedQuantityAggregate,
}

/// Everything one analysis produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub schema: String,

    // Model summary
    pub element_counts: ElementCounts,
    pub floor_count: usize,
    pub story_message: String,
    pub total_weight: f64,
    pub beam_column_weight: f64,
    pub section_types: Vec<String>,
    pub auxiliary: AuxiliarySummary,

    // Geometry (feet)
    pub point_count: usize,
    pub sample_points: Vec<Point3D>,
    pub areas: PlaneAreas,
    pub perimeter: f64,
    pub roof_perimeter: f64,
    pub footing_polygon: Vec<Point3D>,

    // Vectors and pressures from the model
    pub floors: FloorForces,
    pub floor_totals: Vec<FloorTotals>,
    pub roof_pressures: RoofPressures,
    pub wind_quantities: WindQuantities,

    // Derived loads
    pub inputs: LoadInputs,
    pub live_loads: Vec<LiveLoadEntry>,
    pub loads: CombinedLoads,
    pub seismic_load: f64,
    pub linear_load: f64,
    pub wall_moment: f64,
    /// Absent when the roof perimeter is zero
    pub wind_pressure: Option<WindLoadResult>,

    pub design_method: DesignMethod,
    pub governing: GoverningCombination,
}

/// Storey summary line
pub fn story_message(floors: usize) -> String {
    if floors <= 1 {
        "The building is a single story.".to_string()
    } else {
        format!("The building has {} stories.", floors)
    }
}

/// Run the full takeoff and load derivation.
///
/// Fails only when the schema has no force/moment strategy, a vector
/// component is not a number, or the hull of the points is degenerate.
/// Missing quantities, pressures and storeys fall back to zero or empty.
pub fn analyze<M: ModelAccess>(
    model: &M,
    inputs: &LoadInputs,
    live_loads: &[LiveLoadEntry],
    options: &AnalysisOptions,
) -> TakeoffResult<AnalysisReport> {
    let names = &options.names;

    let coordinates = coordinates_from_model(model, options.remove_origin);
    let points = coordinates.as_slice();
    let areas = plane_areas(points);
    tracing::debug!(xy = areas.xy, yz = areas.yz, xz = areas.xz, "plane areas");

    let floors_found = floor_count(model);
    let floors = extract_forces_moments(model)?;
    let pressures = roof_pressures(model, names);

    let hull_perimeter = perimeter(points)?;
    let roof_edge = roof_perimeter(points);
    let footing_polygon = footing_perimeter_polygon(points)?;
    tracing::debug!(perimeter = hull_perimeter, roof_perimeter = roof_edge, "perimeters");

    let counts = element_counts(model);
    let wind_quantities = wind_loads(model, names);
    let dead = dead_load(model, names);
    let frame_weight = beam_column_weight(model);

    let seismic = seismic_load_simplified(
        inputs.site_class,
        inputs.importance_factor,
        inputs.spectral_response_acceleration,
    );
    let linear = linear_load(hull_perimeter, pressures.total_down(), pressures.total_uplift());
    let moment = wall_moment(inputs.wind_force, inputs.building_height);
    let wind_pressure = if roof_edge != 0.0 {
        Some(wind_pressure_from_perimeter(inputs.wind_force, inputs.building_height, roof_edge))
    } else {
        tracing::debug!("zero roof perimeter, wind pressure skipped");
        None
    };

    // Snow and ice act on the plan area
    let loads = dead_and_live_combined(
        dead,
        live_loads,
        areas.roof_area(),
        inputs.snow_load_per_area,
        inputs.ice_load_per_area,
    );
    let governing = LoadCase::from_totals("Building", &loads).governing(options.design_method);

    let weight_entities = model.by_type("IfcQuantityWeight");
    let (total_count, sections) =
        auxiliary_aggregate(&model.by_type("IfcStructuralProfileProperties"), &weight_entities);

    tracing::info!(
        schema = model.schema(),
        points = coordinates.len(),
        floors = floors_found,
        dead,
        governing = %governing.max_combo,
        "analysis complete"
    );

    Ok(AnalysisReport {
        generated_at: Utc::now(),
        schema: model.schema().to_string(),
        element_counts: counts,
        floor_count: floors_found,
        story_message: story_message(floors_found),
        total_weight: total_weight(model),
        beam_column_weight: frame_weight,
        section_types: section_types(model).into_iter().collect(),
        auxiliary: AuxiliarySummary { total_count, sections },
        point_count: coordinates.len(),
        sample_points: coordinates.first_n(SAMPLE_POINTS).to_vec(),
        areas,
        perimeter: hull_perimeter,
        roof_perimeter: roof_edge,
        footing_polygon,
        floor_totals: floors.totals(),
        floors,
        roof_pressures: pressures,
        wind_quantities,
        inputs: *inputs,
        live_loads: live_loads.to_vec(),
        loads,
        seismic_load: seismic,
        linear_load: linear,
        wall_moment: moment,
        wind_pressure,
        design_method: options.design_method,
        governing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Model, SourceDocument};
    use approx::assert_relative_eq;

    fn point(id: u64, raw: [f64; 3]) -> Entity {
        Entity::new(id, "IfcCartesianPoint").with_attribute("Coordinates", raw.to_vec())
    }

    /// 10 ft x 20 ft x 12 ft box, raw inches, with a roof and a dead load set
    fn box_model() -> Model {
        let mut entities = Vec::new();
        let mut id = 1;
        for z in [0.0, 144.0] {
            for (x, y) in [(0.0, 0.0), (120.0, 0.0), (120.0, 240.0), (0.0, 240.0)] {
                entities.push(point(id, [x, y, z]));
                id += 1;
            }
        }
        entities.extend([
            Entity::new(20, "IfcBuildingStorey").with_attribute("Name", "Level 1"),
            Entity::new(21, "IfcBuildingStorey").with_attribute("Name", "Level 2"),
            Entity::new(30, "IfcBeam"),
            Entity::new(31, "IfcColumn"),
            Entity::new(32, "IfcColumn"),
            Entity::new(40, "IfcElementQuantity")
                .with_attribute("Name", "Dead Load")
                .with_relation("Quantities", [41]),
            Entity::new(41, "IfcQuantityWeight")
                .with_attribute("Name", "Dead Load")
                .with_attribute("WeightValue", 1000.0),
            Entity::new(42, "IfcQuantityWeight")
                .with_attribute("Name", "2x4")
                .with_attribute("WeightValue", 75.5),
            Entity::new(50, "IfcStructuralProfileProperties").with_attribute("ProfileName", "2x4"),
            Entity::new(51, "IfcStructuralProfileProperties").with_attribute("ProfileName", "2x4"),
        ]);
        Model::new("IFC2X3", entities)
    }

    fn inputs() -> LoadInputs {
        LoadInputs {
            site_class: 1.0,
            importance_factor: 1.0,
            spectral_response_acceleration: 0.4,
            wind_force: 500.0,
            snow_load_per_area: 20.0,
            ice_load_per_area: 0.0,
            building_height: 12.0,
        }
    }

    #[test]
    fn test_box_geometry_and_loads() {
        let live = [LiveLoadEntry { floor: 1, percentage_load: 50.0, area_load: 400.0 }];
        let report = analyze(&box_model(), &inputs(), &live, &AnalysisOptions::default()).unwrap();

        assert_eq!(report.point_count, 8);
        assert_eq!(report.areas.xy, 200.0);
        assert_eq!(report.areas.yz, 240.0);
        assert_eq!(report.areas.xz, 120.0);
        assert_eq!(report.roof_perimeter, 60.0);
        assert_eq!(report.footing_polygon.len(), 8);
        assert!(report.perimeter > 0.0);

        assert_eq!(report.floor_count, 2);
        assert_eq!(report.story_message, "The building has 2 stories.");
        assert_eq!(report.element_counts, ElementCounts { beams: 1, columns: 2 });

        assert_eq!(report.loads.dead, 1000.0);
        assert_eq!(report.loads.live, 200.0);
        assert_eq!(report.loads.snow, 4000.0);
        assert_relative_eq!(report.seismic_load, 0.6, epsilon = 1e-12);
        assert_eq!(report.wall_moment, 6000.0);

        let wind = report.wind_pressure.unwrap();
        assert_eq!(wind.wind_pressure, 8.33);
        assert_eq!(wind.wall_moment, 100.0);

        assert_eq!(report.auxiliary.total_count, 2);
        assert_eq!(report.auxiliary.sections["2x4"].total_weight, 75.5);
        assert_eq!(report.total_weight, 1075.5);
        assert_eq!(report.section_types, vec!["2x4".to_string()]);
    }

    #[test]
    fn test_governing_uses_design_method() {
        let options = AnalysisOptions { design_method: DesignMethod::Lrfd, ..Default::default() };
        let report = analyze(&box_model(), &inputs(), &[], &options).unwrap();
        // 1.2D + 1.6S + L = 1200 + 6400 + 0; the 500 lb wind force stays out
        assert_eq!(report.governing.max_combo, "LRFD-3");
        assert_relative_eq!(report.governing.max_load, 7600.0, epsilon = 1e-9);
        assert_eq!(report.design_method, DesignMethod::Lrfd);
    }

    #[test]
    fn test_negative_inputs_propagate() {
        let inputs = LoadInputs {
            snow_load_per_area: -5.0,
            ice_load_per_area: -2.0,
            ..inputs()
        };
        let live = [LiveLoadEntry { floor: 1, percentage_load: -10.0, area_load: 400.0 }];
        let report = analyze(&box_model(), &inputs, &live, &AnalysisOptions::default()).unwrap();

        assert_eq!(report.loads.snow, -1000.0);
        assert_eq!(report.loads.ice, -400.0);
        assert_eq!(report.loads.live, -40.0);
        assert_eq!(report.inputs.snow_load_per_area, -5.0);

        // D + 0.7Di + S = 1000 - 280 - 1000
        assert_eq!(report.governing.max_combo, "ASD-1");
        assert_eq!(report.governing.min_combo, "ASD-Di2");
        assert_relative_eq!(report.governing.min_load, -280.0, epsilon = 1e-9);
    }

    #[test]
    fn test_coincident_origin_placements() {
        let model = Model::new(
            "IFC2X3",
            vec![point(1, [0.0, 0.0, 0.0]), point(2, [0.0, 0.0, 0.0]), point(3, [0.0, 0.0, 0.0])],
        );
        let report = analyze(&model, &inputs(), &[], &AnalysisOptions::default()).unwrap();
        assert_eq!(report.point_count, 3);
        assert_eq!(report.perimeter, 0.0);
        assert!(report.footing_polygon.is_empty());
        assert_eq!(report.areas, PlaneAreas::default());
    }

    #[test]
    fn test_flat_roof_without_perimeter_skips_wind_pressure() {
        let model = Model::new("IFC2X3", vec![point(1, [0.0, 0.0, 0.0]), point(2, [12.0, 0.0, 0.0])]);
        let report = analyze(&model, &inputs(), &[], &AnalysisOptions::default()).unwrap();
        assert_eq!(report.roof_perimeter, 0.0);
        assert_eq!(report.perimeter, 0.0);
        assert!(report.wind_pressure.is_none());
        assert_eq!(report.story_message, "The building is a single story.");
    }

    #[test]
    fn test_ifc4_text_feeds_floor_forces() {
        let text = "FILE_SCHEMA(('IFC4'));\n#5= IFCFORCEVECTOR(10.,20.,30.);\n";
        let model = Model::new("", Vec::new()).with_source(SourceDocument::from_step_text(text));
        let report = analyze(&model, &LoadInputs::default(), &[], &AnalysisOptions::default()).unwrap();
        assert_eq!(report.schema, "IFC4");
        assert_eq!(report.floor_totals.len(), 1);
        assert_eq!(report.floor_totals[0].total_force, 60.0);
    }

    #[test]
    fn test_unknown_schema_fails() {
        let model = Model::new("IFC5", Vec::new());
        let err = analyze(&model, &LoadInputs::default(), &[], &AnalysisOptions::default()).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_SCHEMA");
    }

    #[test]
    fn test_report_serializes() {
        let report = analyze(&box_model(), &inputs(), &[], &AnalysisOptions::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["design_method"], "Asd");
        assert!(json["generated_at"].is_string());
        assert_eq!(json["areas"]["xy"], 200.0);
    }
}
