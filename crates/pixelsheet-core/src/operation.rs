use serde::Serialize;
use std::fmt;

use crate::format::FractionalColor;
use crate::range::{CellCoord, DimensionRange};

/// Background colors for a rectangular block of cells
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillCellColors {
    pub origin: CellCoord,
    /// Row-major colors, same shape as the source grid
    pub colors: Vec<Vec<FractionalColor>>,
}

impl FillCellColors {
    pub fn rows(&self) -> usize {
        self.colors.len()
    }

    pub fn cols(&self) -> usize {
        self.colors.first().map_or(0, Vec::len)
    }
}

/// One edit submitted to the spreadsheet service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditOperation {
    AppendColumns { count: u32 },
    AppendRows { count: u32 },
    SetColumnPixelSize { size: u32, range: DimensionRange },
    SetRowPixelSize { size: u32, range: DimensionRange },
    FillCellColors(FillCellColors),
}

impl EditOperation {
    /// Position of this operation's kind within a batch.
    ///
    /// Appends must land before anything addresses the new indices, and
    /// sizing ranges refer to the post-append extent, so the fill goes last.
    pub fn phase(&self) -> u8 {
        match self {
            EditOperation::AppendColumns { .. } => 0,
            EditOperation::AppendRows { .. } => 1,
            EditOperation::SetColumnPixelSize { .. } => 2,
            EditOperation::SetRowPixelSize { .. } => 3,
            EditOperation::FillCellColors(_) => 4,
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            EditOperation::AppendColumns { .. } | EditOperation::AppendRows { .. }
        )
    }

    pub fn is_fill(&self) -> bool {
        matches!(self, EditOperation::FillCellColors(_))
    }
}

impl From<FillCellColors> for EditOperation {
    fn from(fill: FillCellColors) -> Self {
        EditOperation::FillCellColors(fill)
    }
}

impl fmt::Display for EditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOperation::AppendColumns { count } => write!(f, "append {} columns", count),
            EditOperation::AppendRows { count } => write!(f, "append {} rows", count),
            EditOperation::SetColumnPixelSize { size, range } => {
                write!(f, "set columns {} to {}px", range, size)
            }
            EditOperation::SetRowPixelSize { size, range } => {
                write!(f, "set rows {} to {}px", range, size)
            }
            EditOperation::FillCellColors(fill) => write!(
                f,
                "fill {}x{} cells from {}",
                fill.rows(),
                fill.cols(),
                fill.origin
            ),
        }
    }
}

/// Ordered edits submitted to the spreadsheet service as one atomic request.
///
/// Built only by the sequencer; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchPlan {
    operations: Vec<EditOperation>,
}

impl BatchPlan {
    pub(crate) fn from_ordered(operations: Vec<EditOperation>) -> Self {
        Self { operations }
    }

    pub fn operations(&self) -> &[EditOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn structural_count(&self) -> usize {
        self.operations.iter().filter(|op| op.is_structural()).count()
    }
}

impl<'a> IntoIterator for &'a BatchPlan {
    type Item = &'a EditOperation;
    type IntoIter = std::slice::Iter<'a, EditOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}
