//! # Unit Types
//!
//! Type-safe wrappers for the SI units used in flexure work. These are plain
//! f64 newtypes so they serialize as bare numbers.
//!
//! ## Working Units
//!
//! The stress engine works in a single consistent set:
//! - Length / section coordinate: millimeters (mm)
//! - Bending moment: newton-millimeters (N·mm)
//! - Second moment of area: millimeters to the fourth (mm⁴)
//! - Stress: newtons per square millimeter (N/mm², equal to MPa)
//!
//! Engineers often quote moments in kN·m and inertia in cm⁴, so those
//! convert into the working units.
//!
//! ## Example
//!
//! ```rust
//! use stress_core::units::{KilonewtonMeters, NewtonMillimeters, CentimetersToFourth, MillimetersToFourth};
//!
//! let moment: NewtonMillimeters = KilonewtonMeters(2.5).into();
//! assert_eq!(moment.0, 2_500_000.0);
//!
//! let inertia: MillimetersToFourth = CentimetersToFourth(8360.0).into();
//! assert_eq!(inertia.0, 83_600_000.0);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

/// Moment in kilonewton-meters (1 kN·m = 10⁶ N·mm)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

impl From<KilonewtonMeters> for NewtonMillimeters {
    fn from(knm: KilonewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * 1.0e6)
    }
}

impl From<NewtonMillimeters> for KilonewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KilonewtonMeters(nmm.0 / 1.0e6)
    }
}

// ============================================================================
// Section Properties
// ============================================================================

/// Second moment of area in mm⁴
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MillimetersToFourth(pub f64);

/// Second moment of area in cm⁴ (1 cm⁴ = 10⁴ mm⁴)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CentimetersToFourth(pub f64);

impl From<CentimetersToFourth> for MillimetersToFourth {
    fn from(cm4: CentimetersToFourth) -> Self {
        MillimetersToFourth(cm4.0 * 1.0e4)
    }
}

impl From<MillimetersToFourth> for CentimetersToFourth {
    fn from(mm4: MillimetersToFourth) -> Self {
        CentimetersToFourth(mm4.0 / 1.0e4)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in newtons per square millimeter (N/mm² = MPa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonsPerSqMm(pub f64);

impl NewtonsPerSqMm {
    /// Flexure formula in typed form: σ = M·y / I
    pub fn from_flexure(
        moment: NewtonMillimeters,
        y: Millimeters,
        inertia: MillimetersToFourth,
    ) -> Self {
        NewtonsPerSqMm(moment.0 * y.0 / inertia.0)
    }
}
