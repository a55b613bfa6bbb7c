//! # Units and Rounding
//!
//! IFC models exported from US structural tools carry lengths in inches.
//! Everything this crate reports is in feet, square feet and pounds, so
//! point coordinates and hull perimeters are divided by [`INCHES_PER_FOOT`].
//!
//! Rounding is applied once, when a value leaves a public function:
//! - weights, loads, moments, roof perimeter: 2 decimals
//! - areas and the hull perimeter: 1 decimal
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::{round_to, Feet, Inches};
//!
//! let span: Feet = Inches(150.0).into();
//! assert_eq!(round_to(span.0, 2), 12.5);
//! assert_eq!(round_to(round_to(2.345, 2), 2), round_to(2.345, 2));
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Conversion factor between the model's base length unit and display feet
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Decimal places for weights, loads and moments
pub const WEIGHT_DECIMALS: u32 = 2;

/// Decimal places for areas and the hull perimeter
pub const AREA_DECIMALS: u32 = 1;

/// Round half away from zero to `decimals` places.
///
/// Idempotent: rounding an already rounded value to the same precision
/// returns it unchanged. Non-finite values pass through.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    // -0.0 prints badly in reports
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Round a weight, load or moment (2 decimals)
pub fn round_weight(value: f64) -> f64 {
    round_to(value, WEIGHT_DECIMALS)
}

/// Round an area (1 decimal)
pub fn round_area(value: f64) -> f64 {
    round_to(value, AREA_DECIMALS)
}

/// Round a hull length (1 decimal)
pub fn round_length(value: f64) -> f64 {
    round_to(value, AREA_DECIMALS)
}

/// Convert a raw model length to display feet, rounded to 2 decimals
pub fn to_display_feet(raw: f64) -> f64 {
    round_to(raw / INCHES_PER_FOOT, 2)
}

/// Parse a user-entered number; empty or malformed text becomes 0.0.
///
/// ```rust
/// use takeoff_core::units::parse_or_zero;
///
/// assert_eq!(parse_or_zero(" 1.25 "), 1.25);
/// assert_eq!(parse_or_zero(""), 0.0);
/// assert_eq!(parse_or_zero("twelve"), 0.0);
/// ```
pub fn parse_or_zero(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

// ============================================================================
// Length
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches (the model's base unit)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * INCHES_PER_FOOT)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / INCHES_PER_FOOT)
    }
}

// ============================================================================
// Area, force, moment and pressure
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

/// Force or weight in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Moment in foot-pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FtLb(pub f64);

/// Line load in pounds per linear foot
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlF(pub f64);

/// Area load in pounds per square foot
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psf(pub f64);

impl Mul<Psf> for SqFt {
    type Output = Pounds;
    fn mul(self, rhs: Psf) -> Pounds {
        Pounds(self.0 * rhs.0)
    }
}

impl Mul<Feet> for PlF {
    type Output = Pounds;
    fn mul(self, rhs: Feet) -> Pounds {
        Pounds(self.0 * rhs.0)
    }
}

impl Mul<Feet> for Pounds {
    type Output = FtLb;
    fn mul(self, rhs: Feet) -> FtLb {
        FtLb(self.0 * rhs.0)
    }
}

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Value rounded to `decimals` places
            pub fn rounded(self, decimals: u32) -> Self {
                Self(round_to(self.0, decimals))
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(SqFt);
impl_arithmetic!(Pounds);
impl_arithmetic!(FtLb);
impl_arithmetic!(PlF);
impl_arithmetic!(Psf);
