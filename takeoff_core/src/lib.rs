//! # takeoff_core - Structural Quantity Takeoff Engine
//!
//! `takeoff_core` reads a BIM (IFC) model through the [`ModelAccess`] trait
//! and produces the quantities a structural estimate starts from: projected
//! plan and elevation areas, hull and roof perimeters, element counts,
//! section weights and per-storey force/moment vectors. From those and a
//! handful of user inputs it derives building loads and finds the governing
//! ASD or LRFD combination.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over a read-only model
//! - **JSON-First**: All result types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Zero over failure**: Missing data yields zero or empty results
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::geometry::{plane_areas, Point3D};
//!
//! let floor = [
//!     Point3D::from_raw([0.0, 0.0, 0.0]),
//!     Point3D::from_raw([12.0, 0.0, 0.0]),
//!     Point3D::from_raw([0.0, 12.0, 0.0]),
//! ];
//! let areas = plane_areas(&floor);
//! assert_eq!(areas.xy, 0.5);
//! assert_eq!(areas.yz, 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Entity graph, snapshots and the [`ModelAccess`] trait
//! - [`geometry`] - Coordinates, projected areas, hull and roof perimeters
//! - [`quantities`] - Named quantity sums, counts and section weights
//! - [`forces`] - Per-storey force and moment vectors
//! - [`loads`] - Load derivation, seismic methods and combinations
//! - [`analysis`] - The full pipeline producing an [`AnalysisReport`]
//! - [`units`] - Unit wrappers and rounding
//! - [`errors`] - Structured error types

pub mod analysis;
pub mod errors;
pub mod forces;
pub mod geometry;
pub mod loads;
pub mod model;
pub mod quantities;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use analysis::{analyze, AnalysisOptions, AnalysisReport};
pub use errors::{TakeoffError, TakeoffResult};
pub use model::{Model, ModelAccess, SourceDocument};
