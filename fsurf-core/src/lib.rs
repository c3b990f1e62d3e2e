//! fsurf core: turns sampled `z = f(x, y)` grids into normalized triangle
//! meshes and tracks the drag rotation used to inspect them.
//!
//! The crate does no rendering and no projection. Render bindings take a
//! [`SurfaceMesh`] and the model matrix from [`SurfaceView::model_matrix`].

pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod material;
pub mod mesh;
pub mod presets;
pub mod sampler;
pub mod transform;
pub mod view;

// Re-export commonly used types
pub use config::ViewConfig;
pub use controller::{Capture, DragState, PointerEvent, RotationController, RotationSettings};
pub use error::{ConfigError, GridError, SamplerError};
pub use grid::{SampleGrid, SamplePoint};
pub use material::{Rgba, SurfaceMaterial};
pub use mesh::{build_mesh, build_mesh_with, Bounds, Framing, SurfaceMesh};
pub use presets::{preset_by_name, presets, FunctionSurface, PresetFunction, PRESET_FUNCTIONS};
pub use sampler::{sample_surface, Domain};
pub use transform::{RotationState, Transform};
pub use view::SurfaceView;
