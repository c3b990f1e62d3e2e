//! Sampled points and the rectangular grid that holds them.

use crate::error::GridError;

/// One evaluation `z = f(x, y)` of a bivariate function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SamplePoint {
    /// Stand-in for missing grid entries during meshing.
    pub const ORIGIN: SamplePoint = SamplePoint {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

/// Row-major `rows x cols` arrangement of optional samples.
///
/// Entry `(r, c)` neighbours `(r ± 1, c)` and `(r, c ± 1)`. A `None` entry is
/// a missing sample; it keeps its slot so that flattened indices stay aligned
/// with the grid shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<SamplePoint>>,
}

impl SampleGrid {
    /// Create a grid where every entry is missing.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = checked_len(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![None; len],
        })
    }

    /// Build a grid from already flattened row-major cells.
    pub fn from_points(
        rows: usize,
        cols: usize,
        cells: Vec<Option<SamplePoint>>,
    ) -> Result<Self, GridError> {
        let expected = checked_len(rows, cols)?;
        if cells.len() != expected {
            return Err(GridError::Shape {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build a grid from nested rows, which must all have the same length.
    pub fn from_rows(rows: Vec<Vec<Option<SamplePoint>>>) -> Result<Self, GridError> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        checked_len(row_count, cols)?;

        let mut cells = Vec::with_capacity(row_count * cols);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            rows: row_count,
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<SamplePoint> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col]
    }

    /// Replace one entry. Out-of-range coordinates are ignored and return `false`.
    pub fn set(&mut self, row: usize, col: usize, point: Option<SamplePoint>) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        self.cells[row * self.cols + col] = point;
        true
    }

    /// The entry at `(row, col)`, with missing entries read as the origin.
    pub fn point_or_origin(&self, row: usize, col: usize) -> SamplePoint {
        self.get(row, col).unwrap_or(SamplePoint::ORIGIN)
    }

    /// All entries in row-major order, missing ones included.
    pub fn cells(&self) -> &[Option<SamplePoint>] {
        &self.cells
    }

    /// Present samples only.
    pub fn points(&self) -> impl Iterator<Item = &SamplePoint> + '_ {
        self.cells.iter().flatten()
    }

    /// Multiply every present coordinate by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .map(|cell| cell.map(|p| p.scaled(factor)))
                .collect(),
        }
    }
}

fn checked_len(rows: usize, cols: usize) -> Result<usize, GridError> {
    rows.checked_mul(cols)
        .filter(|&len| u32::try_from(len).is_ok())
        .ok_or(GridError::TooLarge { rows, cols })
}
