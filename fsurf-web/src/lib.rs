/// fsurf Web - wasm-bindgen surface viewer
///
/// Exposes mesh buffers, the rotation transform and the pointer state
/// machine to JavaScript. The page owns the canvas and draws the buffers
/// with WebGL; this crate never touches the DOM.
use fsurf_core::{
    presets, FunctionSurface, PointerEvent, SampleGrid, SamplePoint, SurfaceView, Transform,
};
use nalgebra::Point2;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct SurfaceViewer {
    view: SurfaceView,
    presets: Vec<FunctionSurface>,
}

#[wasm_bindgen]
impl SurfaceViewer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SurfaceViewer, JsValue> {
        let presets = presets().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_presets(presets))
    }

    pub fn preset_count(&self) -> usize {
        self.presets.len()
    }

    pub fn preset_title(&self, index: usize) -> Option<String> {
        self.presets.get(index).map(|p| p.title.clone())
    }

    /// Show preset `index`; returns `false` if there is no such preset
    pub fn load_preset(&mut self, index: usize) -> bool {
        let Some(surface) = self.presets.get(index) else {
            return false;
        };
        self.view.set_grid(Some(&surface.grid));
        true
    }

    /// Show a caller-sampled grid given as flat row-major `x, y, z` triples.
    ///
    /// A triple whose `x` is NaN is a missing sample. Returns `false` (and
    /// leaves the surface unchanged) if the buffer does not fit the shape.
    pub fn set_grid(&mut self, rows: usize, cols: usize, xyz: Vec<f64>) -> bool {
        match grid_from_flat(rows, cols, &xyz) {
            Some(grid) => {
                self.view.set_grid(Some(&grid));
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.view.set_grid(None);
    }

    pub fn has_mesh(&self) -> bool {
        self.view.mesh().is_some()
    }

    /// Vertex positions, three floats per vertex
    pub fn positions(&self) -> Vec<f32> {
        self.view.mesh().map_or_else(Vec::new, |mesh| {
            mesh.positions
                .iter()
                .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
                .collect()
        })
    }

    /// Texture coordinates, two floats per vertex
    pub fn texture_coords(&self) -> Vec<f32> {
        self.view.mesh().map_or_else(Vec::new, |mesh| {
            mesh.texture_coords
                .iter()
                .flat_map(|uv| [uv.x as f32, uv.y as f32])
                .collect()
        })
    }

    /// Triangle indices, three per triangle
    pub fn indices(&self) -> Vec<u32> {
        self.view
            .mesh()
            .map_or_else(Vec::new, |mesh| mesh.flat_indices())
    }

    /// Increments on every mesh swap so the page knows to re-upload buffers.
    /// Arrives in JavaScript as a `BigInt`.
    pub fn generation(&self) -> u64 {
        self.view.generation()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.view
            .handle_pointer(PointerEvent::SecondaryDown(Point2::new(x, y)));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, secondary_held: bool) {
        self.view.handle_pointer(PointerEvent::Moved {
            position: Point2::new(x, y),
            secondary_held,
        });
    }

    pub fn pointer_up(&mut self) {
        self.view.handle_pointer(PointerEvent::SecondaryUp);
    }

    pub fn reset_rotation(&mut self) {
        self.view.controller_mut().reset();
    }

    pub fn is_dragging(&self) -> bool {
        self.view.controller().is_dragging()
    }

    pub fn yaw(&self) -> f64 {
        self.view.rotation().yaw
    }

    pub fn pitch(&self) -> f64 {
        self.view.rotation().pitch
    }

    /// Model matrix, 16 floats in column-major order (WebGL layout)
    pub fn rotation_matrix(&self) -> Vec<f32> {
        Transform::to_f32(&self.view.model_matrix())
            .as_slice()
            .to_vec()
    }
}

impl SurfaceViewer {
    pub fn with_presets(presets: Vec<FunctionSurface>) -> Self {
        Self {
            view: SurfaceView::default(),
            presets,
        }
    }
}

fn grid_from_flat(rows: usize, cols: usize, xyz: &[f64]) -> Option<SampleGrid> {
    if xyz.len() != rows.checked_mul(cols)?.checked_mul(3)? {
        return None;
    }
    let cells = xyz
        .chunks_exact(3)
        .map(|c| (!c[0].is_nan()).then(|| SamplePoint::new(c[0], c[1], c[2])))
        .collect();
    SampleGrid::from_points(rows, cols, cells).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsurf_core::PRESET_FUNCTIONS;

    fn viewer() -> SurfaceViewer {
        SurfaceViewer::with_presets(presets().unwrap())
    }

    #[test]
    fn test_load_preset_exposes_buffers() {
        let mut viewer = viewer();
        assert_eq!(viewer.preset_count(), PRESET_FUNCTIONS.len());
        assert!(!viewer.has_mesh());
        assert!(viewer.positions().is_empty());

        assert!(viewer.load_preset(1));
        let n = 40 * 40;
        assert_eq!(viewer.positions().len(), n * 3);
        assert_eq!(viewer.texture_coords().len(), n * 2);
        assert_eq!(viewer.indices().len(), 39 * 39 * 2 * 3);
        assert_eq!(viewer.generation(), 1);

        assert!(!viewer.load_preset(99));
        assert_eq!(viewer.generation(), 1);
    }

    #[test]
    fn test_set_grid_from_flat_buffer() {
        let mut viewer = viewer();
        let xyz = vec![
            0.0, 0.0, 0.0, //
            0.0, 1.0, 1.0, //
            f64::NAN, 0.0, 0.0, //
            1.0, 1.0, 2.0,
        ];
        assert!(viewer.set_grid(2, 2, xyz));
        assert_eq!(viewer.indices(), vec![0, 2, 1, 1, 2, 3]);

        assert!(!viewer.set_grid(2, 2, vec![0.0; 5]));
        assert!(viewer.has_mesh());

        viewer.clear();
        assert!(!viewer.has_mesh());
    }

    #[test]
    fn test_generation_tracks_every_swap() {
        let mut viewer = viewer();
        for index in 0..PRESET_FUNCTIONS.len() {
            assert!(viewer.load_preset(index));
        }
        viewer.clear();

        let generation: u64 = viewer.generation();
        assert_eq!(generation, viewer.view.generation());
        assert_eq!(generation, PRESET_FUNCTIONS.len() as u64 + 1);
    }

    #[test]
    fn test_pointer_drag() {
        let mut viewer = viewer();
        viewer.pointer_down(0.0, 0.0);
        assert!(viewer.is_dragging());
        viewer.pointer_move(10.0, 8.0, true);
        viewer.pointer_up();
        viewer.pointer_move(100.0, 100.0, true);

        assert!((viewer.yaw() + 31.0).abs() < 1e-9);
        assert!((viewer.pitch() - 38.2).abs() < 1e-9);
        assert!(!viewer.is_dragging());

        viewer.reset_rotation();
        assert_eq!((viewer.yaw(), viewer.pitch()), (-35.0, 35.0));
    }

    #[test]
    fn test_rotation_matrix_layout() {
        let mut viewer = viewer();
        viewer.pointer_down(0.0, 0.0);
        // Back to zero yaw and pitch: +35 yaw, -35 pitch at 0.4 deg/px
        viewer.pointer_move(87.5, -87.5, true);

        let m = viewer.rotation_matrix();
        assert_eq!(m.len(), 16);
        for (i, &v) in m.iter().enumerate() {
            let expected: f32 = if i % 5 == 0 { 1.0 } else { 0.0 };
            assert!((v - expected).abs() < 1e-5, "{i}: {v}");
        }
    }
}
