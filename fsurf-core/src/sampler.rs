//! Uniform sampling of `z = f(x, y)` over a rectangular domain.

use crate::error::SamplerError;
use crate::grid::{SampleGrid, SamplePoint};

/// Evenly spaced parameter values from `min` to `max` inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    min: f64,
    max: f64,
    steps: usize,
}

impl Domain {
    pub fn new(min: f64, max: f64, steps: usize) -> Result<Self, SamplerError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SamplerError::NonFiniteBounds { min, max });
        }
        if steps == 0 {
            return Err(SamplerError::NoSteps);
        }
        Ok(Self { min, max, steps })
    }

    /// Symmetric domain `[-half_width, half_width]`.
    pub fn symmetric(half_width: f64, steps: usize) -> Result<Self, SamplerError> {
        Self::new(-half_width, half_width, steps)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The `index`-th value; a single-step domain always yields `min`.
    pub fn value_at(&self, index: usize) -> f64 {
        if self.steps <= 1 {
            return self.min;
        }
        let t = index as f64 / (self.steps - 1) as f64;
        self.min + (self.max - self.min) * t
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.steps).map(|i| self.value_at(i))
    }
}

/// Sample `f` over `x_domain × y_domain`.
///
/// Rows follow `x`, columns follow `y`. Entry `(i, j)` holds
/// `(x_i, y_j, f(x_i, y_j))`; a non-finite result is stored as missing.
pub fn sample_surface<F>(
    f: F,
    x_domain: &Domain,
    y_domain: &Domain,
) -> Result<SampleGrid, SamplerError>
where
    F: Fn(f64, f64) -> f64,
{
    let mut cells = Vec::with_capacity(x_domain.steps.saturating_mul(y_domain.steps));
    for x in x_domain.values() {
        for y in y_domain.values() {
            let z = f(x, y);
            cells.push(z.is_finite().then(|| SamplePoint::new(x, y, z)));
        }
    }

    Ok(SampleGrid::from_points(
        x_domain.steps,
        y_domain.steps,
        cells,
    )?)
}
