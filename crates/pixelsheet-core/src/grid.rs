use crate::error::PlanError;
use crate::format::Rgb;
use crate::range::GridExtent;

/// Rectangular, row-major grid of cell colors.
///
/// Only constructible through [`ColorGrid::from_rows`], which checks that the
/// grid is non-empty and every row has the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    rows: Vec<Vec<Rgb>>,
}

impl ColorGrid {
    pub fn from_rows(rows: Vec<Vec<Rgb>>) -> Result<Self, PlanError> {
        let expected = rows.first().map(Vec::len).ok_or(PlanError::Empty)?;
        if expected == 0 {
            return Err(PlanError::Empty);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(PlanError::Ragged {
                row,
                expected,
                found: r.len(),
            });
        }
        Ok(Self { rows })
    }

    /// Grid of `rows` x `cols` cells all set to `color`
    pub fn filled(rows: usize, cols: usize, color: Rgb) -> Result<Self, PlanError> {
        Self::from_rows(vec![vec![color; cols]; rows])
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.rows[0].len()
    }

    pub fn extent(&self) -> GridExtent {
        GridExtent::new(self.rows() as u32, self.cols() as u32)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn cell_count(&self) -> usize {
        self.rows() * self.cols()
    }
}
