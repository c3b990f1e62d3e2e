//! Fixed shading policy for function surfaces.
//!
//! The surface uses a vertical diffuse gradient (dark at the lowest output,
//! orange in the middle, amber at the top) with a white specular highlight.
//! The same material applies to the front and back faces, so the surface
//! stays visible from every rotation.

use nalgebra::Point2;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Channel-wise linear blend, `t = 0` gives `self`.
    pub fn lerp(&self, other: &Rgba, t: f64) -> Rgba {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Scale the color channels by `factor` (clamped to `[0, 1]`), keeping alpha.
    pub fn shade(&self, factor: f64) -> Rgba {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f64 * f).round() as u8;
        Rgba::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMaterial {
    /// Stops sorted by offset; offset 0 is the lowest function output.
    pub gradient: Vec<GradientStop>,
    pub specular: Rgba,
    pub specular_power: f64,
    pub double_sided: bool,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            gradient: vec![
                GradientStop {
                    offset: 0.0,
                    color: Rgba::opaque(0x14, 0x14, 0x1C),
                },
                GradientStop {
                    offset: 0.55,
                    color: Rgba::opaque(0xEF, 0x6C, 0x00),
                },
                GradientStop {
                    offset: 1.0,
                    color: Rgba::opaque(0xFF, 0xC1, 0x07),
                },
            ],
            specular: Rgba::new(255, 255, 255, 200),
            specular_power: 20.0,
            double_sided: true,
        }
    }
}

impl SurfaceMaterial {
    /// Diffuse color at gradient position `t`, clamped to the end stops.
    pub fn color_at(&self, t: f64) -> Rgba {
        let Some(first) = self.gradient.first() else {
            return Rgba::opaque(0, 0, 0);
        };
        if t.is_nan() || t <= first.offset {
            return first.color;
        }

        for pair in self.gradient.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.offset {
                let width = hi.offset - lo.offset;
                if width <= 0.0 {
                    return hi.color;
                }
                return lo.color.lerp(&hi.color, (t - lo.offset) / width);
            }
        }

        self.gradient[self.gradient.len() - 1].color
    }

    /// Diffuse color for a mesh texture coordinate.
    ///
    /// Texture `v` runs top-down while the gradient runs bottom-up.
    pub fn diffuse_at_uv(&self, uv: &Point2<f64>) -> Rgba {
        self.color_at(1.0 - uv.y)
    }

    /// Specular contribution for the cosine between the reflected light and
    /// the view direction, scaled by the highlight's alpha.
    pub fn specular_intensity(&self, cos_angle: f64) -> f64 {
        let strength = self.specular.a as f64 / 255.0;
        cos_angle.max(0.0).powf(self.specular_power) * strength
    }
}
