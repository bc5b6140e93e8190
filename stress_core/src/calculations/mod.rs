//! # Stress Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Parameters` - Input parameters (JSON-serializable)
//! - `*Table` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Table, StressError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`flexure`] - Bending stress distribution over a section height

pub mod flexure;

// Re-export commonly used types
pub use flexure::{
    calculate, flexure_stress, BeamSectionParameters, StressExtremes, StressSample, StressTable,
    StressTableGenerator,
};
