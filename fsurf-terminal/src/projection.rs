/// Camera and projection for the terminal surface
use nalgebra::{Matrix4, Point3, Vector3};

/// Terminal cells are roughly twice as tall as they are wide
pub const CELL_ASPECT: f32 = 2.0;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Fixed camera looking at the surface's display volume
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    /// Camera for a `columns x rows` character grid
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 8.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: cell_aspect(columns, rows),
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    pub fn resize(&mut self, columns: u32, rows: u32) {
        self.aspect = cell_aspect(columns, rows);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let distance = (self.position - self.target).norm();
                let height = 2.0 * distance * (self.fov / 2.0).tan();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Model-view-projection for a model matrix
    pub fn mvp(&self, model: &Matrix4<f32>) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix() * model
    }

    /// Direction from the target toward the camera
    pub fn view_direction(&self) -> Vector3<f32> {
        (self.position - self.target).normalize()
    }

    /// Project a model-space point to `(column, row, depth)`.
    ///
    /// Returns `None` when the point falls outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        mvp: &Matrix4<f32>,
        columns: u32,
        rows: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = mvp * point.to_homogeneous();

        // Prevent division by near-zero w
        if clip.w.abs() < 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * columns as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * rows as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

fn cell_aspect(columns: u32, rows: u32) -> f32 {
    columns.max(1) as f32 / (rows.max(1) as f32 * CELL_ASPECT)
}
