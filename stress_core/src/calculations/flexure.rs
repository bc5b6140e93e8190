//! # Bending Stress Across a Section
//!
//! Evaluates the elementary flexure formula σ(y) = M·y / I over a sampled
//! range of section coordinates and returns the result as an ordered table.
//!
//! ## Assumptions
//!
//! - Linear elastic material, plane sections remain plane
//! - y is measured from the neutral axis (y = 0), positive upward
//! - Units: N·mm for the moment, mm⁴ for the inertia, mm for y, N/mm² out
//!
//! ## Example
//!
//! ```rust
//! use stress_core::calculations::flexure::{calculate, BeamSectionParameters};
//!
//! let params = BeamSectionParameters::new(1000.0, 500.0, -50.0, 50.0, 10.0);
//! let table = calculate(&params).unwrap();
//!
//! assert_eq!(table.len(), 11);
//! assert_eq!(table.first().unwrap().stress_n_per_mm2, -100.0);
//! assert_eq!(table.last().unwrap().stress_n_per_mm2, 100.0);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{StressError, StressResult};
use crate::units::{Millimeters, MillimetersToFourth, NewtonMillimeters, NewtonsPerSqMm};

/// Upper bound on the number of samples a single table may hold.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Fraction of `step` within which a stepped coordinate counts as `max_y`.
const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Smallest step, in units in the last place of the largest bound, that
/// keeps every stepped coordinate distinct after rounding.
const MIN_STEP_ULPS: f64 = 4.0;

/// Input parameters for a bending stress table.
///
/// ## JSON Example
///
/// ```json
/// {
///   "bending_moment_nmm": 25000000.0,
///   "inertia_mm4": 83600000.0,
///   "min_y_mm": -150.0,
///   "max_y_mm": 150.0,
///   "step_mm": 10.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamSectionParameters {
    /// Applied bending moment in N·mm (sign gives the bending direction)
    pub bending_moment_nmm: f64,

    /// Second moment of area about the neutral axis in mm⁴
    pub inertia_mm4: f64,

    /// Lower bound of the section coordinate in mm
    pub min_y_mm: f64,

    /// Upper bound of the section coordinate in mm
    pub max_y_mm: f64,

    /// Sampling increment in mm
    pub step_mm: f64,
}

impl BeamSectionParameters {
    /// Create a parameter set. No validation happens here; see [`validate`](Self::validate).
    pub fn new(
        bending_moment_nmm: f64,
        inertia_mm4: f64,
        min_y_mm: f64,
        max_y_mm: f64,
        step_mm: f64,
    ) -> Self {
        BeamSectionParameters {
            bending_moment_nmm,
            inertia_mm4,
            min_y_mm,
            max_y_mm,
            step_mm,
        }
    }

    /// Validate input parameters.
    ///
    /// Checks run in a fixed order (inertia, bounds, step, moment) and the
    /// first violation is returned.
    pub fn validate(&self) -> StressResult<()> {
        if !self.inertia_mm4.is_finite() {
            return Err(StressError::invalid_argument(
                "inertia_mm4",
                self.inertia_mm4.to_string(),
                "Moment of inertia must be a finite number",
            ));
        }
        if self.inertia_mm4 <= 0.0 {
            return Err(StressError::invalid_argument(
                "inertia_mm4",
                self.inertia_mm4.to_string(),
                "Moment of inertia must be greater than 0",
            ));
        }

        if !self.min_y_mm.is_finite() || !self.max_y_mm.is_finite() {
            return Err(StressError::invalid_argument(
                "min_y_mm/max_y_mm",
                format!("{}..{}", self.min_y_mm, self.max_y_mm),
                "Section bounds must be finite numbers",
            ));
        }
        if self.min_y_mm >= self.max_y_mm {
            return Err(StressError::invalid_argument(
                "min_y_mm/max_y_mm",
                format!("{}..{}", self.min_y_mm, self.max_y_mm),
                "Lower bound must be less than the upper bound",
            ));
        }

        if !self.step_mm.is_finite() {
            return Err(StressError::invalid_argument(
                "step_mm",
                self.step_mm.to_string(),
                "Step must be a finite number",
            ));
        }
        if self.step_mm <= 0.0 {
            return Err(StressError::invalid_argument(
                "step_mm",
                self.step_mm.to_string(),
                "Step must be positive",
            ));
        }

        let resolution = ulp(self.min_y_mm.abs().max(self.max_y_mm.abs()));
        if self.step_mm < MIN_STEP_ULPS * resolution {
            return Err(StressError::invalid_argument(
                "step_mm",
                self.step_mm.to_string(),
                format!(
                    "Step is below the floating-point resolution ({}) of the section bounds",
                    resolution
                ),
            ));
        }

        let intervals = (self.height_mm() / self.step_mm).ceil();
        if !intervals.is_finite() || intervals + 1.0 > MAX_SAMPLES as f64 {
            return Err(StressError::invalid_argument(
                "step_mm",
                self.step_mm.to_string(),
                format!(
                    "Step is too small for a {} mm section (limit is {} samples)",
                    self.height_mm(),
                    MAX_SAMPLES
                ),
            ));
        }

        if !self.bending_moment_nmm.is_finite() {
            return Err(StressError::invalid_argument(
                "bending_moment_nmm",
                self.bending_moment_nmm.to_string(),
                "Bending moment must be a finite number",
            ));
        }

        Ok(())
    }

    /// Section height, `max_y - min_y`, in mm
    pub fn height_mm(&self) -> f64 {
        self.max_y_mm - self.min_y_mm
    }

    /// Bending stress at `y_mm`, which must lie within `[min_y, max_y]`.
    pub fn stress_at(&self, y_mm: f64) -> StressResult<f64> {
        if !(self.min_y_mm..=self.max_y_mm).contains(&y_mm) {
            return Err(StressError::invalid_argument(
                "y_mm",
                y_mm.to_string(),
                format!(
                    "y must be in the range [{}, {}]",
                    self.min_y_mm, self.max_y_mm
                ),
            ));
        }
        Ok(flexure_stress(self.bending_moment_nmm, y_mm, self.inertia_mm4))
    }

    fn sample(&self, y_mm: f64) -> StressSample {
        StressSample {
            y_mm,
            stress_n_per_mm2: flexure_stress(self.bending_moment_nmm, y_mm, self.inertia_mm4),
        }
    }
}

/// Gap between a positive finite `x` and the next larger f64.
fn ulp(x: f64) -> f64 {
    f64::from_bits(x.to_bits() + 1) - x
}

/// σ = M·y / I in N/mm², for M in N·mm, y in mm and I in mm⁴.
pub fn flexure_stress(bending_moment_nmm: f64, y_mm: f64, inertia_mm4: f64) -> f64 {
    NewtonsPerSqMm::from_flexure(
        NewtonMillimeters(bending_moment_nmm),
        Millimeters(y_mm),
        MillimetersToFourth(inertia_mm4),
    )
    .0
}

/// One row of a stress table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressSample {
    /// Position within the section in mm
    pub y_mm: f64,
    /// Bending stress at `y_mm` in N/mm²
    pub stress_n_per_mm2: f64,
}

/// Samples carrying the largest and smallest stress in a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressExtremes {
    /// Sample with σ_max (first one on ties)
    pub max: StressSample,
    /// Sample with σ_min (first one on ties)
    pub min: StressSample,
}

/// Ordered stress samples from `min_y` to `max_y` inclusive.
///
/// Samples are sorted by increasing `y`, spaced by `step` except for the
/// last interval which may be shorter. Only [`calculate`] builds tables, so
/// a table is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressTable {
    samples: Vec<StressSample>,
}

impl StressTable {
    /// All samples in order of increasing `y`
    pub fn samples(&self) -> &[StressSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&StressSample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&StressSample> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StressSample> {
        self.samples.iter()
    }

    /// Samples with σ_max and σ_min, as annotated on a stress diagram.
    pub fn extremes(&self) -> Option<StressExtremes> {
        let (first, rest) = self.samples.split_first()?;
        let mut extremes = StressExtremes {
            max: *first,
            min: *first,
        };
        for sample in rest {
            if sample.stress_n_per_mm2 > extremes.max.stress_n_per_mm2 {
                extremes.max = *sample;
            }
            if sample.stress_n_per_mm2 < extremes.min.stress_n_per_mm2 {
                extremes.min = *sample;
            }
        }
        Some(extremes)
    }

    /// Whether the neutral axis (y = 0) lies within the sampled range.
    pub fn neutral_axis_in_range(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => first.y_mm <= 0.0 && last.y_mm >= 0.0,
            _ => false,
        }
    }
}

impl<'a> IntoIterator for &'a StressTable {
    type Item = &'a StressSample;
    type IntoIter = std::slice::Iter<'a, StressSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Build the stress table for a parameter set.
///
/// Coordinates come from the step index (`min_y + k·step`) so spacing does
/// not drift over long tables. The final sample is always exactly `max_y`.
///
/// # Errors
///
/// * `InvalidArgument` - parameters fail [`BeamSectionParameters::validate`]
/// * `InvalidOperation` - no samples were produced
pub fn calculate(params: &BeamSectionParameters) -> StressResult<StressTable> {
    params.validate()?;

    let min_y = params.min_y_mm;
    let max_y = params.max_y_mm;
    let step = params.step_mm;
    let boundary = max_y - step * BOUNDARY_TOLERANCE;

    let estimated = (params.height_mm() / step).ceil() as usize + 1;
    let mut samples = Vec::with_capacity(estimated);
    samples.push(params.sample(min_y));

    let mut index: usize = 1;
    loop {
        let y = min_y + index as f64 * step;
        if y >= boundary {
            break;
        }
        samples.push(params.sample(y));
        index += 1;
    }

    if samples.last().map(|s| s.y_mm) != Some(max_y) {
        samples.push(params.sample(max_y));
    }

    if samples.is_empty() {
        return Err(StressError::invalid_operation(
            "build stress table",
            "No samples were produced; check the parameters",
        ));
    }

    debug!(
        "stress table: {} samples over [{}, {}] mm, step {} mm",
        samples.len(),
        min_y,
        max_y,
        step
    );

    Ok(StressTable { samples })
}

#[derive(Debug, Clone, Default)]
enum GeneratorState {
    #[default]
    Unconfigured,
    Configured {
        parameters: BeamSectionParameters,
        table: StressTable,
    },
}

/// Holds the current parameters and the one table generated from them.
///
/// A successful [`set_parameters`](Self::set_parameters) replaces both; a
/// failed call leaves the previous state untouched.
///
/// ```rust
/// use stress_core::calculations::flexure::StressTableGenerator;
///
/// let mut generator = StressTableGenerator::new();
/// assert!(generator.stress_table().is_err());
///
/// generator.set_parameters(0.0, 100.0, 0.0, 10.0, 5.0).unwrap();
/// assert_eq!(generator.stress_table().unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StressTableGenerator {
    state: GeneratorState,
}

impl StressTableGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, store the parameters and regenerate the table.
    pub fn set_parameters(
        &mut self,
        bending_moment_nmm: f64,
        inertia_mm4: f64,
        min_y_mm: f64,
        max_y_mm: f64,
        step_mm: f64,
    ) -> StressResult<()> {
        self.configure(BeamSectionParameters::new(
            bending_moment_nmm,
            inertia_mm4,
            min_y_mm,
            max_y_mm,
            step_mm,
        ))
    }

    /// Same as [`set_parameters`](Self::set_parameters) for an existing parameter set.
    pub fn configure(&mut self, parameters: BeamSectionParameters) -> StressResult<()> {
        let table = calculate(&parameters)?;
        self.state = GeneratorState::Configured { parameters, table };
        Ok(())
    }

    /// The most recently generated table.
    ///
    /// # Errors
    ///
    /// * `InvalidState` - no parameters have been set yet
    pub fn stress_table(&self) -> StressResult<&StressTable> {
        match &self.state {
            GeneratorState::Configured { table, .. } => Ok(table),
            GeneratorState::Unconfigured => Err(StressError::invalid_state(
                "Set the beam parameters before requesting the stress table",
            )),
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.state, GeneratorState::Configured { .. })
    }

    pub fn parameters(&self) -> Option<&BeamSectionParameters> {
        match &self.state {
            GeneratorState::Configured { parameters, .. } => Some(parameters),
            GeneratorState::Unconfigured => None,
        }
    }

    pub fn moment(&self) -> Option<f64> {
        self.parameters().map(|p| p.bending_moment_nmm)
    }

    pub fn inertia_moment(&self) -> Option<f64> {
        self.parameters().map(|p| p.inertia_mm4)
    }

    pub fn min_y(&self) -> Option<f64> {
        self.parameters().map(|p| p.min_y_mm)
    }

    pub fn max_y(&self) -> Option<f64> {
        self.parameters().map(|p| p.max_y_mm)
    }

    pub fn height(&self) -> Option<f64> {
        self.parameters().map(|p| p.height_mm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn ys(table: &StressTable) -> Vec<f64> {
        table.iter().map(|s| s.y_mm).collect()
    }

    #[test]
    fn test_symmetric_section() {
        let params = BeamSectionParameters::new(1000.0, 500.0, -50.0, 50.0, 10.0);
        let table = calculate(&params).unwrap();

        assert_eq!(table.len(), 11);
        let expected: Vec<f64> = (-5..=5).map(|k| k as f64 * 10.0).collect();
        for (y, e) in ys(&table).iter().zip(&expected) {
            assert_abs_diff_eq!(*y, *e, epsilon = 1e-9);
        }

        assert_relative_eq!(table.first().unwrap().stress_n_per_mm2, -100.0);
        assert_relative_eq!(table.last().unwrap().stress_n_per_mm2, 100.0);
        let mid = table.samples()[5];
        assert_abs_diff_eq!(mid.y_mm, 0.0);
        assert_abs_diff_eq!(mid.stress_n_per_mm2, 0.0);
    }

    #[test]
    fn test_zero_moment_is_valid() {
        let params = BeamSectionParameters::new(0.0, 100.0, 0.0, 10.0, 5.0);
        let table = calculate(&params).unwrap();

        assert_eq!(ys(&table), vec![0.0, 5.0, 10.0]);
        assert!(table.iter().all(|s| s.stress_n_per_mm2 == 0.0));
    }

    #[test]
    fn test_uneven_step_forces_final_sample() {
        let params = BeamSectionParameters::new(10.0, 1.0, 0.0, 7.0, 3.0);
        let table = calculate(&params).unwrap();

        assert_eq!(ys(&table), vec![0.0, 3.0, 6.0, 7.0]);
        let samples = table.samples();
        assert_relative_eq!(samples[3].y_mm - samples[2].y_mm, 1.0);
        assert_relative_eq!(samples[3].stress_n_per_mm2, 70.0);
    }

    #[test]
    fn test_step_larger_than_height() {
        let params = BeamSectionParameters::new(1.0, 1.0, 0.0, 2.0, 5.0);
        let table = calculate(&params).unwrap();
        assert_eq!(ys(&table), vec![0.0, 2.0]);
    }

    #[test]
    fn test_fractional_step_has_no_near_duplicate_endpoint() {
        let params = BeamSectionParameters::new(1.0, 1.0, 0.0, 0.3, 0.1);
        let table = calculate(&params).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.last().unwrap().y_mm, 0.3);
    }

    #[test]
    fn test_spacing_and_endpoints_hold_for_long_tables() {
        let params = BeamSectionParameters::new(-2.5e6, 8.36e7, -150.0, 150.0, 0.1);
        let table = calculate(&params).unwrap();

        assert_eq!(table.first().unwrap().y_mm, -150.0);
        assert_eq!(table.last().unwrap().y_mm, 150.0);

        let samples = table.samples();
        let n = samples.len();
        for pair in samples[..n - 1].windows(2) {
            assert_abs_diff_eq!(pair[1].y_mm - pair[0].y_mm, 0.1, epsilon = 1e-9);
        }
        assert!(samples[n - 1].y_mm - samples[n - 2].y_mm <= 0.1 + 1e-9);

        for s in samples {
            assert_relative_eq!(
                s.stress_n_per_mm2,
                -2.5e6 * s.y_mm / 8.36e7,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_validation_order_and_fields() {
        let err = calculate(&BeamSectionParameters::new(1.0, 0.0, 5.0, 1.0, -1.0)).unwrap_err();
        assert!(matches!(err, StressError::InvalidArgument { ref field, .. } if field == "inertia_mm4"));

        let err = calculate(&BeamSectionParameters::new(1.0, 1.0, 5.0, 5.0, -1.0)).unwrap_err();
        assert!(matches!(err, StressError::InvalidArgument { ref field, .. } if field == "min_y_mm/max_y_mm"));

        let err = calculate(&BeamSectionParameters::new(1.0, 1.0, 0.0, 5.0, 0.0)).unwrap_err();
        assert!(matches!(err, StressError::InvalidArgument { ref field, .. } if field == "step_mm"));
    }

    #[test]
    fn test_rejects_non_finite_inputs() {
        assert!(BeamSectionParameters::new(1.0, f64::NAN, 0.0, 1.0, 0.1).validate().is_err());
        assert!(BeamSectionParameters::new(1.0, 1.0, f64::NEG_INFINITY, 1.0, 0.1).validate().is_err());
        assert!(BeamSectionParameters::new(1.0, 1.0, 0.0, 1.0, f64::NAN).validate().is_err());
        assert!(BeamSectionParameters::new(f64::INFINITY, 1.0, 0.0, 1.0, 0.1).validate().is_err());
    }

    #[test]
    fn test_rejects_negative_step_with_valid_bounds() {
        let err = calculate(&BeamSectionParameters::new(1.0, 1.0, 0.0, 10.0, -1.0)).unwrap_err();
        assert!(matches!(err, StressError::InvalidArgument { ref field, .. } if field == "step_mm"));
    }

    #[test]
    fn test_rejects_step_below_coordinate_resolution() {
        for step in [0.5, 1e-3, 6.0] {
            let params = BeamSectionParameters::new(1.0, 1.0, 1e16, 1e16 + 64.0, step);
            let err = calculate(&params).unwrap_err();
            assert!(matches!(err, StressError::InvalidArgument { ref field, .. } if field == "step_mm"));
        }

        let mirrored = BeamSectionParameters::new(1.0, 1.0, -1e16 - 64.0, -1e16, 0.5);
        assert!(mirrored.validate().is_err());
    }

    #[test]
    fn test_large_coordinates_stay_strictly_increasing() {
        let params = BeamSectionParameters::new(1.0, 1.0, 1e16, 1e16 + 64.0, 8.0);
        let table = calculate(&params).unwrap();

        assert_eq!(table.len(), 9);
        assert!(table.samples().windows(2).all(|pair| pair[1].y_mm > pair[0].y_mm));
        assert_eq!(table.last().unwrap().y_mm, 1e16 + 64.0);
    }

    #[test]
    fn test_rejects_excessive_sample_count() {
        let err = BeamSectionParameters::new(1.0, 1.0, 0.0, 1000.0, 1e-6)
            .validate()
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_stress_at_bounds_check() {
        let params = BeamSectionParameters::new(1000.0, 500.0, -50.0, 50.0, 10.0);
        assert_relative_eq!(params.stress_at(25.0).unwrap(), 50.0);
        assert!(params.stress_at(50.5).is_err());
        assert!(params.stress_at(-51.0).is_err());
        assert_relative_eq!(params.height_mm(), 100.0);
    }

    #[test]
    fn test_extremes_and_neutral_axis() {
        let table = calculate(&BeamSectionParameters::new(-1000.0, 500.0, -50.0, 50.0, 10.0)).unwrap();
        let extremes = table.extremes().unwrap();
        assert_relative_eq!(extremes.max.y_mm, -50.0);
        assert_relative_eq!(extremes.max.stress_n_per_mm2, 100.0);
        assert_relative_eq!(extremes.min.y_mm, 50.0);
        assert!(table.neutral_axis_in_range());

        let above = calculate(&BeamSectionParameters::new(1.0, 1.0, 10.0, 20.0, 5.0)).unwrap();
        assert!(!above.neutral_axis_in_range());
    }

    #[test]
    fn test_generator_requires_configuration() {
        let generator = StressTableGenerator::new();
        assert!(!generator.is_configured());
        assert!(generator.moment().is_none());
        let err = generator.stress_table().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STATE");
    }

    #[test]
    fn test_generator_failed_update_keeps_previous_state() {
        let mut generator = StressTableGenerator::new();
        generator.set_parameters(1000.0, 500.0, -50.0, 50.0, 10.0).unwrap();
        let before = generator.stress_table().unwrap().clone();

        assert!(generator.set_parameters(2000.0, -1.0, -50.0, 50.0, 10.0).is_err());
        assert!(generator.set_parameters(2000.0, 500.0, 50.0, -50.0, 10.0).is_err());
        assert!(generator.set_parameters(2000.0, 500.0, -50.0, 50.0, 0.0).is_err());

        assert_eq!(generator.moment(), Some(1000.0));
        assert_eq!(generator.inertia_moment(), Some(500.0));
        assert_eq!(generator.stress_table().unwrap(), &before);
    }

    #[test]
    fn test_generator_replaces_table() {
        let mut generator = StressTableGenerator::new();
        generator.set_parameters(1000.0, 500.0, -50.0, 50.0, 10.0).unwrap();
        generator.set_parameters(0.0, 100.0, 0.0, 10.0, 5.0).unwrap();

        assert_eq!(generator.stress_table().unwrap().len(), 3);
        assert_eq!(generator.min_y(), Some(0.0));
        assert_eq!(generator.max_y(), Some(10.0));
        assert_eq!(generator.height(), Some(10.0));
    }

    #[test]
    fn test_table_serialization() {
        let table = calculate(&BeamSectionParameters::new(0.0, 100.0, 0.0, 10.0, 5.0)).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["samples"].as_array().unwrap().len(), 3);
        assert_eq!(json["samples"][2]["y_mm"], 10.0);
    }
}
