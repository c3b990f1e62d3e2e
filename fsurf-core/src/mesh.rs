//! Surface normalization and triangulation.
//!
//! A [`SampleGrid`] is centred on its bounding box and rescaled per axis into
//! a fixed display volume, then stitched into an indexed triangle mesh with
//! one texture coordinate per vertex.
//!
//! Axis remapping: the first input parameter `x` goes to rendered X, the
//! function output `z` goes to rendered Y (up) and the second input
//! parameter `y` goes to rendered Z (depth). The two inputs form the ground
//! plane and the output reads as height.

use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::grid::{SampleGrid, SamplePoint};

/// Floor for an axis range, so a flat axis does not divide by zero.
pub const RANGE_EPSILON: f64 = 0.0001;

/// Rendered extent of the first input parameter (rendered X).
pub const SPAN_X: f64 = 3.5;
/// Rendered extent of the second input parameter (rendered Z, depth).
pub const SPAN_Y: f64 = 3.5;
/// Rendered extent of the function output (rendered Y, up).
pub const SPAN_Z: f64 = 2.4;

/// Target extents of the display volume, keyed by source axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Framing {
    pub span_x: f64,
    pub span_y: f64,
    pub span_z: f64,
}

impl Default for Framing {
    fn default() -> Self {
        Self {
            span_x: SPAN_X,
            span_y: SPAN_Y,
            span_z: SPAN_Z,
        }
    }
}

impl Framing {
    fn spans(&self) -> Vector3<f64> {
        Vector3::new(self.span_x, self.span_y, self.span_z)
    }
}

/// Axis-aligned extents of the present samples, in source coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Bounds {
    /// Extents of `points`, or `None` when there are none.
    pub fn of<'a>(points: impl IntoIterator<Item = &'a SamplePoint>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Bounds>, p| {
            let v = Point3::new(p.x, p.y, p.z);
            Some(match acc {
                None => Bounds { min: v, max: v },
                Some(b) => Bounds {
                    min: b.min.inf(&v),
                    max: b.max.sup(&v),
                },
            })
        })
    }

    /// Per-axis width, floored at [`RANGE_EPSILON`].
    pub fn range(&self) -> Vector3<f64> {
        (self.max - self.min).map(|d| d.max(RANGE_EPSILON))
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Renderable geometry for one grid.
///
/// `positions` and `texture_coords` are parallel and row-major over the
/// source grid; vertex `r * cols + c` comes from grid entry `(r, c)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    pub rows: usize,
    pub cols: usize,
    pub positions: Vec<Point3<f64>>,
    pub texture_coords: Vec<Point2<f64>>,
    pub triangles: Vec<[u32; 3]>,
}

impl SurfaceMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Triangle indices as a flat list, three per triangle.
    pub fn flat_indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Unit normal of triangle `index`, following its winding.
    ///
    /// Returns `None` for an out-of-range index or a degenerate triangle.
    pub fn face_normal(&self, index: usize) -> Option<Vector3<f64>> {
        let [a, b, c] = self.triangles.get(index)?.map(|i| self.positions[i as usize]);
        (b - a).cross(&(c - a)).try_normalize(f64::EPSILON)
    }

    /// Extents of the rendered positions.
    pub fn bounds(&self) -> Option<Bounds> {
        let (first, rest) = self.positions.split_first()?;
        Some(rest.iter().fold(
            Bounds {
                min: *first,
                max: *first,
            },
            |b, p| Bounds {
                min: b.min.inf(p),
                max: b.max.sup(p),
            },
        ))
    }
}

/// Build a mesh with the default [`Framing`].
pub fn build_mesh(grid: &SampleGrid) -> Option<SurfaceMesh> {
    build_mesh_with(grid, &Framing::default())
}

/// Normalize and triangulate `grid`.
///
/// Returns `None` (nothing to render) when the grid has fewer than two rows
/// or columns, or when every entry is missing.
pub fn build_mesh_with(grid: &SampleGrid, framing: &Framing) -> Option<SurfaceMesh> {
    let (rows, cols) = (grid.rows(), grid.cols());
    if rows < 2 || cols < 2 {
        return None;
    }

    let bounds = Bounds::of(grid.points())?;
    let range = bounds.range();
    let center = bounds.center();
    let scale = framing.spans().component_div(&range);

    let mut positions = Vec::with_capacity(rows * cols);
    let mut texture_coords = Vec::with_capacity(rows * cols);

    for r in 0..rows {
        for c in 0..cols {
            let point = grid.point_or_origin(r, c);

            positions.push(Point3::new(
                (point.x - center.x) * scale.x,
                (point.z - center.z) * scale.z,
                (point.y - center.y) * scale.y,
            ));

            let u = (point.x - bounds.min.x) / range.x;
            let v = 1.0 - (point.z - bounds.min.z) / range.z;
            texture_coords.push(Point2::new(u, v));
        }
    }

    Some(SurfaceMesh {
        rows,
        cols,
        positions,
        texture_coords,
        triangles: triangulate(rows, cols),
    })
}

/// Two triangles per grid quad, `(tl, bl, tr)` then `(tr, bl, br)`.
///
/// The winding decides which side the renderer treats as the front face.
fn triangulate(rows: usize, cols: usize) -> Vec<[u32; 3]> {
    // Grid constructors cap the cell count at u32::MAX.
    let index = |r: usize, c: usize| (r * cols + c) as u32;

    let mut triangles = Vec::with_capacity((rows - 1) * (cols - 1) * 2);
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let top_left = index(r, c);
            let top_right = index(r, c + 1);
            let bottom_left = index(r + 1, c);
            let bottom_right = index(r + 1, c + 1);

            triangles.push([top_left, bottom_left, top_right]);
            triangles.push([top_right, bottom_left, bottom_right]);
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(rows: usize, cols: usize) -> SampleGrid {
        let cells = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| Some(SamplePoint::new(r as f64, c as f64, 0.0))))
            .collect();
        SampleGrid::from_points(rows, cols, cells).unwrap()
    }

    #[test]
    fn test_undersized_grids_are_empty() {
        assert!(build_mesh(&SampleGrid::new(0, 0).unwrap()).is_none());
        assert!(build_mesh(&plane(1, 5)).is_none());
        assert!(build_mesh(&plane(5, 1)).is_none());
        assert!(build_mesh(&plane(0, 3)).is_none());
    }

    #[test]
    fn test_all_missing_is_empty() {
        assert!(build_mesh(&SampleGrid::new(3, 4).unwrap()).is_none());
    }

    #[test]
    fn test_triangle_winding() {
        let mesh = build_mesh(&plane(2, 3)).unwrap();
        assert_eq!(
            mesh.triangles,
            vec![[0, 3, 1], [1, 3, 4], [1, 4, 2], [2, 4, 5]]
        );
    }

    #[test]
    fn test_axis_remap_and_scale() {
        let grid = SampleGrid::from_rows(vec![
            vec![
                Some(SamplePoint::new(0.0, 0.0, 0.0)),
                Some(SamplePoint::new(0.0, 2.0, 1.0)),
            ],
            vec![
                Some(SamplePoint::new(4.0, 0.0, 1.0)),
                Some(SamplePoint::new(4.0, 2.0, 2.0)),
            ],
        ])
        .unwrap();
        let mesh = build_mesh(&grid).unwrap();

        // x in [0, 4] -> [-1.75, 1.75], z in [0, 2] -> [-1.2, 1.2] on Y,
        // y in [0, 2] -> [-1.75, 1.75] on Z.
        let last = mesh.positions[3];
        assert!((last.x - 1.75).abs() < 1e-9);
        assert!((last.y - 1.2).abs() < 1e-9);
        assert!((last.z - 1.75).abs() < 1e-9);

        let first = mesh.positions[0];
        assert!((first.x + 1.75).abs() < 1e-9);
        assert!((first.y + 1.2).abs() < 1e-9);
        assert!((first.z + 1.75).abs() < 1e-9);
    }

    #[test]
    fn test_texture_coords_flip_height() {
        let grid = SampleGrid::from_rows(vec![
            vec![
                Some(SamplePoint::new(0.0, 0.0, 0.0)),
                Some(SamplePoint::new(0.0, 1.0, 10.0)),
            ],
            vec![
                Some(SamplePoint::new(2.0, 0.0, 5.0)),
                Some(SamplePoint::new(2.0, 1.0, 10.0)),
            ],
        ])
        .unwrap();
        let mesh = build_mesh(&grid).unwrap();

        assert_eq!(mesh.texture_coords[0], Point2::new(0.0, 1.0));
        assert_eq!(mesh.texture_coords[1], Point2::new(0.0, 0.0));
        assert_eq!(mesh.texture_coords[2], Point2::new(1.0, 0.5));
    }

    #[test]
    fn test_missing_entry_uses_origin_but_not_bounds() {
        let grid = SampleGrid::from_rows(vec![
            vec![Some(SamplePoint::new(1.0, 1.0, 1.0)), None],
            vec![
                Some(SamplePoint::new(3.0, 1.0, 1.0)),
                Some(SamplePoint::new(3.0, 3.0, 1.0)),
            ],
        ])
        .unwrap();
        let mesh = build_mesh(&grid).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        // Bounds are x, y in [1, 3]; the origin lands outside the volume.
        let missing = mesh.positions[1];
        assert!((missing.x + 3.5).abs() < 1e-9);
        assert!((missing.z + 3.5).abs() < 1e-9);
        assert!((mesh.texture_coords[1].x + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_face_normal_of_flat_surface_is_vertical() {
        let mesh = build_mesh(&plane(3, 3)).unwrap();
        for i in 0..mesh.triangle_count() {
            let n = mesh.face_normal(i).unwrap();
            assert!((n.y.abs() - 1.0).abs() < 1e-9);
        }
        assert!(mesh.face_normal(mesh.triangle_count()).is_none());
    }

    #[test]
    fn test_custom_framing() {
        let framing = Framing {
            span_x: 10.0,
            ..Framing::default()
        };
        let mesh = build_mesh_with(&plane(3, 3), &framing).unwrap();
        let bounds = mesh.bounds().unwrap();
        assert!((bounds.max.x - bounds.min.x - 10.0).abs() < 1e-9);
        assert!((bounds.max.z - bounds.min.z - SPAN_Y).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_range_floor() {
        let points = [SamplePoint::new(1.0, 2.0, 3.0)];
        let bounds = Bounds::of(&points).unwrap();
        assert_eq!(bounds.range(), Vector3::repeat(RANGE_EPSILON));
        assert_eq!(bounds.center(), Point3::new(1.0, 2.0, 3.0));
        assert!(Bounds::of(std::iter::empty::<&SamplePoint>()).is_none());
    }
}
