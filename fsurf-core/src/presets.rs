//! Built-in function surfaces.

use std::f64::consts::PI;

use crate::error::SamplerError;
use crate::grid::SampleGrid;
use crate::sampler::{sample_surface, Domain};

/// A titled, pre-sampled surface.
#[derive(Debug, Clone)]
pub struct FunctionSurface {
    pub title: String,
    pub description: String,
    pub grid: SampleGrid,
}

impl FunctionSurface {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        grid: SampleGrid,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            grid,
        }
    }

    /// Lower-case title with non-alphanumerics collapsed to `-`.
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }
}

/// A named bivariate function with its default sampling domain.
#[derive(Clone, Copy)]
pub struct PresetFunction {
    pub title: &'static str,
    pub description: &'static str,
    pub f: fn(f64, f64) -> f64,
    pub half_width: f64,
    pub steps: usize,
}

impl PresetFunction {
    pub fn slug(&self) -> String {
        slugify(self.title)
    }

    /// Sample over the preset's own symmetric domain.
    pub fn sample(&self) -> Result<FunctionSurface, SamplerError> {
        let domain = Domain::symmetric(self.half_width, self.steps)?;
        self.sample_over(&domain, &domain)
    }

    pub fn sample_over(
        &self,
        x_domain: &Domain,
        y_domain: &Domain,
    ) -> Result<FunctionSurface, SamplerError> {
        let grid = sample_surface(self.f, x_domain, y_domain)?;
        Ok(FunctionSurface::new(self.title, self.description, grid))
    }

    fn matches(&self, name: &str) -> bool {
        self.title.eq_ignore_ascii_case(name) || self.slug() == slugify(name)
    }
}

fn sine_cosine(x: f64, y: f64) -> f64 {
    x.sin() * y.cos()
}

fn gaussian_hill(x: f64, y: f64) -> f64 {
    (-(x * x + y * y) / 3.0).exp()
}

fn hyperbolic_saddle(x: f64, y: f64) -> f64 {
    (x * x - y * y) / 4.0
}

fn ripple_bowl(x: f64, y: f64) -> f64 {
    let r = (x * x + y * y).sqrt();
    r.sin() / (r + 1.0)
}

pub const PRESET_FUNCTIONS: &[PresetFunction] = &[
    PresetFunction {
        title: "Sine × Cosine",
        description: "A smooth wave created from sin(x) · cos(y) sampled within ±π.",
        f: sine_cosine,
        half_width: PI,
        steps: 45,
    },
    PresetFunction {
        title: "Gaussian Hill",
        description: "A radial Gaussian bump: exp(-(x² + y²) / 3).",
        f: gaussian_hill,
        half_width: 3.0,
        steps: 40,
    },
    PresetFunction {
        title: "Hyperbolic Saddle",
        description: "The classic saddle surface x² - y² rendered over ±2.5.",
        f: hyperbolic_saddle,
        half_width: 2.5,
        steps: 40,
    },
    PresetFunction {
        title: "Ripple Bowl",
        description: "Circular ripples given by sin(r) / (r + 1) where r = √(x² + y²).",
        f: ripple_bowl,
        half_width: 6.0,
        steps: 50,
    },
];

/// Sample every preset over its default domain.
pub fn presets() -> Result<Vec<FunctionSurface>, SamplerError> {
    PRESET_FUNCTIONS.iter().map(PresetFunction::sample).collect()
}

/// Look a preset up by title or slug, ignoring case.
pub fn preset_by_name(name: &str) -> Option<&'static PresetFunction> {
    PRESET_FUNCTIONS.iter().find(|preset| preset.matches(name))
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
