//! Row-major addressing on a toroidal grid.

use super::cell::Point;

/// Grid dimensions with wrap-around addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub rows: usize,
    pub cols: usize,
}

impl Geometry {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total slot count (rows * cols).
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert (row, col) to flat index.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Flat index of a grid location.
    #[inline]
    pub fn index_of(&self, point: Point) -> usize {
        self.index(point.row(), point.col())
    }

    /// Location of a flat index.
    #[inline]
    pub fn point(&self, index: usize) -> Point {
        Point::at(index / self.cols, index % self.cols)
    }

    /// Flat index of `(row + d_row, col + d_col)`, wrapped on both axes.
    #[inline]
    pub fn offset_index(&self, row: usize, col: usize, d_row: isize, d_col: isize) -> usize {
        let r = wrap(row as isize + d_row, self.rows);
        let c = wrap(col as isize + d_col, self.cols);
        self.index(r, c)
    }
}

/// Normalize `coord` into `[0, dimension)`, including negative offsets.
#[inline]
pub fn wrap(coord: isize, dimension: usize) -> usize {
    coord.rem_euclid(dimension as isize) as usize
}
