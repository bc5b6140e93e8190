//! # stress_core - Bending Stress Distribution Engine
//!
//! `stress_core` computes how bending stress varies across the height of a
//! beam section using the flexure formula σ(y) = M·y / I, and produces the
//! ordered `(y, σ)` table that charts, listings and exports consume.
//!
//! ## Design Philosophy
//!
//! - **Pure core**: [`calculations::calculate`] is a function of its inputs
//! - **Explicit state**: [`StressTableGenerator`] knows whether it has been configured
//! - **JSON-First**: All inputs and results implement Serialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use stress_core::StressTableGenerator;
//!
//! let mut generator = StressTableGenerator::new();
//! generator.set_parameters(1000.0, 500.0, -50.0, 50.0, 10.0).unwrap();
//!
//! let table = generator.stress_table().unwrap();
//! assert_eq!(table.len(), 11);
//!
//! let json = serde_json::to_string_pretty(table).unwrap();
//! assert!(json.contains("stress_n_per_mm2"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Flexure stress tables
//! - [`project`] - Project container, metadata, and report settings
//! - [`export`] - CSV and text rendering of stress tables
//! - [`units`] - Type-safe SI unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic project saves and schema-checked loads

pub mod calculations;
pub mod errors;
pub mod export;
pub mod file_io;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{BeamSectionParameters, StressSample, StressTable, StressTableGenerator};
pub use errors::{StressError, StressResult};
pub use file_io::{load_project, save_project};
pub use project::{AnalysisItem, ReportSettings, StressProject};
