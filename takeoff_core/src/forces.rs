//! # Force and Moment Extraction
//!
//! Per-storey force and moment vectors read from the raw model text.
//!
//! How the vectors are found depends on the schema family:
//!
//! | Schema        | Strategy             | Result                        |
//! |---------------|----------------------|-------------------------------|
//! | `IFC2X3`      | [`NoVectorEntities`] | empty, the text is not read   |
//! | `IFC4*`       | [`Ifc4TextScan`]     | line scan of the STEP text    |
//! | anything else | none                 | [`TakeoffError::UnsupportedSchema`] |
//!
//! The IFC4 scan is a small state machine over lines. The current floor
//! starts as `"Foundation"`; a storey declaration switches it, and every
//! force or moment vector line is added to the current floor.
//!
//! ```rust
//! use takeoff_core::forces::{extract_forces_moments, FOUNDATION};
//! use takeoff_core::model::{Model, SourceDocument};
//!
//! let text = "FILE_SCHEMA(('IFC4'));\n#5= IFCFORCEVECTOR(10.,20.,30.);\n";
//! let model = Model::default().with_source(SourceDocument::from_step_text(text));
//! let floors = extract_forces_moments(&model).unwrap();
//! assert_eq!(floors.get(FOUNDATION).unwrap().force.as_slice(), &[10.0, 20.0, 30.0]);
//! ```

use nalgebra::Vector3;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};
use crate::model::ModelAccess;

/// Label of the floor that collects vectors declared before any storey
pub const FOUNDATION: &str = "Foundation";

static FORCE_VECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"IFCFORCEVECTOR\(([^,]+),([^,]+),([^,]+)\);").expect("static regex")
});

static MOMENT_VECTOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"IFCMOMENTVECTOR\(([^,]+),([^,]+),([^,]+)\);").expect("static regex")
});

static STOREY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\d+=\s*IFCBUILDINGSTOREY\(([^,]+),").expect("static regex"));

// ============================================================================
// Floor records
// ============================================================================

/// Accumulated force and moment for one floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorRecord {
    pub label: String,
    pub force: Vector3<f64>,
    pub moment: Vector3<f64>,
}

impl FloorRecord {
    fn new(label: impl Into<String>) -> Self {
        FloorRecord {
            label: label.into(),
            force: Vector3::zeros(),
            moment: Vector3::zeros(),
        }
    }
}

/// Component sums of one floor's force and moment vectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorTotals {
    pub label: String,
    pub total_force: f64,
    pub total_moment: f64,
}

/// Floors in first-seen order, each with its force and moment vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorForces {
    floors: Vec<FloorRecord>,
}

impl FloorForces {
    pub fn new() -> Self {
        FloorForces { floors: Vec::new() }
    }

    /// The record for `label`, created with zero vectors if new
    pub fn touch(&mut self, label: &str) -> &mut FloorRecord {
        let position = match self.floors.iter().position(|floor| floor.label == label) {
            Some(position) => position,
            None => {
                self.floors.push(FloorRecord::new(label));
                self.floors.len() - 1
            }
        };
        &mut self.floors[position]
    }

    pub fn get(&self, label: &str) -> Option<&FloorRecord> {
        self.floors.iter().find(|floor| floor.label == label)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FloorRecord> {
        self.floors.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.floors.iter().map(|floor| floor.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Per floor, the sum of the force components and of the moment components
    pub fn totals(&self) -> Vec<FloorTotals> {
        self.floors
            .iter()
            .map(|floor| FloorTotals {
                label: floor.label.clone(),
                total_force: floor.force.sum(),
                total_moment: floor.moment.sum(),
            })
            .collect()
    }
}

// ============================================================================
// Schema families and scan strategies
// ============================================================================

/// Schema families with different force/moment representations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaFamily {
    Ifc2x3,
    Ifc4,
}

impl SchemaFamily {
    /// Classify a schema identifier.
    ///
    /// `IFC2X3` exactly, or any identifier starting with `IFC4`
    /// (`IFC4`, `IFC4X3`, `IFC4X3_ADD2`, ...).
    pub fn detect(schema: &str) -> TakeoffResult<Self> {
        if schema == "IFC2X3" {
            Ok(SchemaFamily::Ifc2x3)
        } else if schema.starts_with("IFC4") {
            Ok(SchemaFamily::Ifc4)
        } else {
            Err(TakeoffError::unsupported_schema(schema))
        }
    }

    /// The scan strategy for this family
    pub fn strategy(self) -> Box<dyn VectorScan> {
        match self {
            SchemaFamily::Ifc2x3 => Box::new(NoVectorEntities),
            SchemaFamily::Ifc4 => Box::new(Ifc4TextScan),
        }
    }
}

/// A way of collecting per-floor force and moment vectors from a model
pub trait VectorScan {
    fn scan(&self, model: &dyn ModelAccess) -> TakeoffResult<FloorForces>;
}

/// IFC2X3 has no force or moment vector entities; always empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVectorEntities;

impl VectorScan for NoVectorEntities {
    fn scan(&self, _model: &dyn ModelAccess) -> TakeoffResult<FloorForces> {
        Ok(FloorForces::new())
    }
}

/// Line-by-line regex scan of the STEP text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ifc4TextScan;

impl Ifc4TextScan {
    /// Scan raw STEP text
    pub fn scan_text(&self, text: &str) -> TakeoffResult<FloorForces> {
        let mut floors = FloorForces::new();
        let mut current = FOUNDATION.to_string();

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;

            if let Some(caps) = STOREY.captures(line) {
                current = caps[1].trim_matches('\'').to_string();
                floors.touch(&current);
            }
            if let Some(caps) = FORCE_VECTOR.captures(line) {
                let force = vector(&caps, line_number)?;
                floors.touch(&current).force += force;
            }
            if let Some(caps) = MOMENT_VECTOR.captures(line) {
                let moment = vector(&caps, line_number)?;
                floors.touch(&current).moment += moment;
            }
        }

        Ok(floors)
    }
}

impl VectorScan for Ifc4TextScan {
    fn scan(&self, model: &dyn ModelAccess) -> TakeoffResult<FloorForces> {
        match model.source_text() {
            Some(text) => self.scan_text(text),
            None => {
                tracing::warn!("no raw model text attached; force and moment scan skipped");
                Ok(FloorForces::new())
            }
        }
    }
}

fn vector(caps: &Captures<'_>, line: usize) -> TakeoffResult<Vector3<f64>> {
    let component = |group: usize| -> TakeoffResult<f64> {
        let raw = &caps[group];
        raw.trim()
            .parse::<f64>()
            .map_err(|err| TakeoffError::parse(line, raw, err.to_string()))
    };
    Ok(Vector3::new(component(1)?, component(2)?, component(3)?))
}

/// Per-floor force and moment vectors of a model.
///
/// The strategy is chosen from the model's schema; see the module docs.
pub fn extract_forces_moments<M: ModelAccess>(model: &M) -> TakeoffResult<FloorForces> {
    let family = SchemaFamily::detect(model.schema())?;
    let floors = family.strategy().scan(model)?;
    tracing::debug!(?family, floors = floors.len(), "extracted forces and moments");
    Ok(floors)
}
