/// Character rasterizer for shaded surface meshes
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use fsurf_core::{Rgba, SurfaceMaterial, SurfaceMesh};
use nalgebra::{Matrix4, Point2, Point3, Vector3};
use std::io::Write;

use crate::projection::Camera;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Light level even for faces turned away from the light
const AMBIENT: f32 = 0.25;

/// One shaded character cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub character: char,
    pub color: Rgba,
}

const BLANK: Cell = Cell {
    character: ' ',
    color: Rgba::opaque(0, 0, 0),
};

/// Renderer that converts a surface mesh into colored terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    light_dir: Vector3<f32>,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            light_dir: Vector3::new(0.3, 0.6, 1.0).normalize(),
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![BLANK; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self {
            light_dir: self.light_dir,
            ..Self::new(width, height)
        };
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(BLANK);
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    pub fn render_mesh(
        &mut self,
        mesh: &SurfaceMesh,
        material: &SurfaceMaterial,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) {
        let mvp = camera.mvp(model_matrix);
        let view_dir = camera.view_direction();

        let positions: Vec<Point3<f32>> = mesh
            .positions
            .iter()
            .map(|p| Point3::new(p.x as f32, p.y as f32, p.z as f32))
            .collect();

        for (index, triangle) in mesh.triangles.iter().enumerate() {
            let Some(normal) = mesh.face_normal(index) else {
                continue;
            };
            let normal = model_matrix.transform_vector(&normal.map(|v| v as f32));

            let mut screen = [(0.0, 0.0, 0.0); 3];
            let mut uv = Point2::origin();
            let mut visible = true;
            for (slot, &vertex) in screen.iter_mut().zip(triangle) {
                match camera.project_to_screen(
                    &positions[vertex as usize],
                    &mvp,
                    self.width as u32,
                    self.height as u32,
                ) {
                    Some(coords) => *slot = coords,
                    None => {
                        visible = false;
                        break;
                    }
                }
                uv += mesh.texture_coords[vertex as usize].coords / 3.0;
            }
            if !visible {
                continue; // Triangle is clipped
            }

            let cell = self.shade(&normal, &view_dir, material, &uv);
            self.rasterize_triangle(&screen, cell);
        }
    }

    /// Lambert plus specular shading, lit the same from either side
    fn shade(
        &self,
        normal: &Vector3<f32>,
        view_dir: &Vector3<f32>,
        material: &SurfaceMaterial,
        uv: &Point2<f64>,
    ) -> Cell {
        let mut normal = *normal;
        if material.double_sided && normal.dot(view_dir) < 0.0 {
            normal = -normal;
        }

        let diffuse = normal.dot(&self.light_dir).max(0.0);
        let reflected = 2.0 * normal.dot(&self.light_dir) * normal - self.light_dir;
        let specular = material.specular_intensity(reflected.dot(view_dir) as f64) as f32;

        let brightness = (AMBIENT + (1.0 - AMBIENT) * diffuse).min(1.0);
        let base = material.diffuse_at_uv(uv).shade(brightness as f64);
        let color = base.lerp(&material.specular, specular as f64);

        let level = (brightness + specular).clamp(0.0, 1.0);
        let char_index = (level * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        // Keep lit faces visible: never pick the blank character
        let char_index = char_index.clamp(1, LUMINOSITY_RAMP.len() - 1);

        Cell {
            character: LUMINOSITY_RAMP[char_index],
            color,
        }
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        let [v0, v1, v2] = *coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.cells[idx] = cell;
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                let Rgba { r, g, b, .. } = cell.color;
                writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                writer.queue(Print(cell.character))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
