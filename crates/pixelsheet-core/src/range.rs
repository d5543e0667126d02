use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell coordinate (0-indexed)
#[derive(Debug, Clone, Copy, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub const ORIGIN: CellCoord = CellCoord::new(0, 0);

    pub const fn new(row: u32, col: u32) -> Self {
        CellCoord { row, col }
    }

    /// Convert to A1 notation (e.g., (0, 0) -> "A1")
    pub fn to_a1(&self) -> String {
        format!("{}{}", col_to_label(self.col), self.row + 1)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

/// Convert column index (0-indexed) to label (A, B, ..., Z, AA, AB, ...)
pub fn col_to_label(col: u32) -> String {
    let mut label = String::new();
    let mut n = col + 1;

    while n > 0 {
        n -= 1;
        label.insert(0, char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }

    label
}

/// Half-open index range `[start, end)` along one sheet axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DimensionRange {
    pub start: u32,
    pub end: u32,
}

impl DimensionRange {
    pub fn new(start: u32, end: u32) -> Self {
        DimensionRange {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Range covering the first `len` indices
    pub fn leading(len: u32) -> Self {
        DimensionRange::new(0, len)
    }
}

impl fmt::Display for DimensionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Current size of a sheet as reported by the spreadsheet service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetGridDimensions {
    pub row_count: u32,
    pub column_count: u32,
}

impl SheetGridDimensions {
    pub const fn new(row_count: u32, column_count: u32) -> Self {
        SheetGridDimensions {
            row_count,
            column_count,
        }
    }
}

/// Rows and columns a color grid occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridExtent {
    pub rows: u32,
    pub cols: u32,
}

impl GridExtent {
    pub const fn new(rows: u32, cols: u32) -> Self {
        GridExtent { rows, cols }
    }

    /// Whether a sheet of the given size already holds this extent
    pub fn fits_within(&self, sheet: SheetGridDimensions) -> bool {
        self.rows <= sheet.row_count && self.cols <= sheet.column_count
    }
}

impl fmt::Display for GridExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_label() {
        assert_eq!(col_to_label(0), "A");
        assert_eq!(col_to_label(25), "Z");
        assert_eq!(col_to_label(26), "AA");
        assert_eq!(col_to_label(701), "ZZ");
        assert_eq!(col_to_label(702), "AAA");
    }

    #[test]
    fn test_coord_a1() {
        assert_eq!(CellCoord::ORIGIN.to_a1(), "A1");
        assert_eq!(CellCoord::new(99, 26).to_a1(), "AA100");
    }

    #[test]
    fn test_dimension_range() {
        assert_eq!(DimensionRange::leading(3), DimensionRange::new(0, 3));
        assert_eq!(DimensionRange::new(5, 2), DimensionRange::new(2, 5));
        assert_eq!(DimensionRange::new(5, 2).to_string(), "[2, 5)");
    }

    #[test]
    fn test_extent_display() {
        assert_eq!(GridExtent::new(4, 12).to_string(), "4x12");
    }

    #[test]
    fn test_extent_fits() {
        let extent = GridExtent::new(2, 2);
        assert!(extent.fits_within(SheetGridDimensions::new(10, 10)));
        assert!(!extent.fits_within(SheetGridDimensions::new(1, 10)));
        assert!(!extent.fits_within(SheetGridDimensions::new(0, 0)));
    }
}
