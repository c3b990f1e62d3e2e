//! The interactive surface: current mesh plus rotation.

use std::fmt;

use nalgebra::Matrix4;
use tracing::debug;

use crate::config::ViewConfig;
use crate::controller::{Capture, PointerEvent, RotationController};
use crate::grid::SampleGrid;
use crate::material::SurfaceMaterial;
use crate::mesh::{build_mesh_with, Framing, SurfaceMesh};
use crate::transform::RotationState;

type RebuildObserver = Box<dyn FnMut(Option<&SurfaceMesh>)>;

/// Holds the displayed mesh and the drag rotation applied to it.
///
/// Replacing the grid rebuilds the mesh in full before the old one is
/// dropped. Rotation is independent of the data and survives rebuilds.
pub struct SurfaceView {
    framing: Framing,
    material: SurfaceMaterial,
    controller: RotationController,
    mesh: Option<SurfaceMesh>,
    generation: u64,
    on_rebuild: Option<RebuildObserver>,
}

impl Default for SurfaceView {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl fmt::Debug for SurfaceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceView")
            .field("framing", &self.framing)
            .field("rotation", &self.controller.rotation())
            .field("vertices", &self.mesh.as_ref().map(SurfaceMesh::vertex_count))
            .field("generation", &self.generation)
            .finish()
    }
}

impl SurfaceView {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            framing: config.framing,
            material: SurfaceMaterial::default(),
            controller: RotationController::with_settings(config.rotation),
            mesh: None,
            generation: 0,
            on_rebuild: None,
        }
    }

    /// Register a callback run after every mesh swap.
    pub fn on_rebuild(&mut self, observer: impl FnMut(Option<&SurfaceMesh>) + 'static) {
        self.on_rebuild = Some(Box::new(observer));
    }

    /// Replace the displayed data. `None` clears the surface.
    pub fn set_grid(&mut self, grid: Option<&SampleGrid>) {
        let mesh = grid.and_then(|grid| build_mesh_with(grid, &self.framing));

        match (&mesh, grid) {
            (Some(mesh), _) => debug!(
                rows = mesh.rows,
                cols = mesh.cols,
                triangles = mesh.triangle_count(),
                "surface mesh rebuilt"
            ),
            (None, Some(grid)) => debug!(
                rows = grid.rows(),
                cols = grid.cols(),
                "grid has no renderable geometry"
            ),
            (None, None) => debug!("surface cleared"),
        }

        self.mesh = mesh;
        self.generation += 1;

        if let Some(observer) = self.on_rebuild.as_mut() {
            observer(self.mesh.as_ref());
        }
    }

    pub fn mesh(&self) -> Option<&SurfaceMesh> {
        self.mesh.as_ref()
    }

    /// Number of grid replacements so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn material(&self) -> &SurfaceMaterial {
        &self.material
    }

    pub fn framing(&self) -> &Framing {
        &self.framing
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Capture> {
        self.controller.handle(event)
    }

    pub fn controller(&self) -> &RotationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RotationController {
        &mut self.controller
    }

    pub fn rotation(&self) -> RotationState {
        self.controller.rotation()
    }

    pub fn model_matrix(&self) -> Matrix4<f64> {
        self.controller.transform()
    }
}
