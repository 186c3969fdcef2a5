//! Dense row-major matrices.
//!
//! [`Grid`] stores `rows * cols` elements in a single `Vec<T>`, row after
//! row. Model parameters (transition/emission matrices) and decoding
//! lattices (score and backpointer tables) are both grids.

use core::ops::{Index, IndexMut};

use crate::{IrminsulError, Result};

/// A dense `rows x cols` matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a `rows x cols` grid with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        }
    }

    /// Copy the grid out as a vector of rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }
}

impl<T> Grid<T> {
    /// Build a grid from a vector of equally long rows.
    ///
    /// `what` names the matrix in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`IrminsulError::Validation`] if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<T>>, what: &str) -> Result<Self> {
        let n_rows = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(IrminsulError::Validation(format!(
                    "{what} row {i} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols,
            data,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cell at `(r, c)`, or `None` when out of bounds.
    pub fn get(&self, r: usize, c: usize) -> Option<&T> {
        if r < self.rows && c < self.cols {
            self.data.get(r * self.cols + c)
        } else {
            None
        }
    }

    /// Row `r` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows`.
    pub fn row(&self, r: usize) -> &[T] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Row `r` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `r >= rows`.
    pub fn row_mut(&mut self, r: usize) -> &mut [T] {
        &mut self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Iterate over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// Iterate over column `c`, top to bottom.
    pub fn column(&self, c: usize) -> impl Iterator<Item = &T> + '_ {
        (0..self.rows).map(move |r| &self.data[r * self.cols + c])
    }

    /// The underlying row-major storage.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Apply `f` to every cell, keeping the shape.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (r, c): (usize, usize)) -> &T {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        &self.data[r * self.cols + c]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        &mut self.data[r * self.cols + c]
    }
}
