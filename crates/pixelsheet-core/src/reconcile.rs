use crate::operation::EditOperation;
use crate::range::{GridExtent, SheetGridDimensions};

/// Structural operations needed for a sheet of size `current` to hold `needed`.
///
/// Only ever grows the sheet: columns first, then rows, each emitted only when
/// the sheet is strictly too small along that axis.
pub fn reconcile(current: SheetGridDimensions, needed: GridExtent) -> Vec<EditOperation> {
    let mut ops = Vec::with_capacity(2);

    if current.column_count < needed.cols {
        ops.push(EditOperation::AppendColumns {
            count: needed.cols - current.column_count,
        });
    }
    if current.row_count < needed.rows {
        ops.push(EditOperation::AppendRows {
            count: needed.rows - current.row_count,
        });
    }

    ops
}

/// Sheet size after `ops` have been applied to a sheet of size `current`
pub fn apply_structural(current: SheetGridDimensions, ops: &[EditOperation]) -> SheetGridDimensions {
    ops.iter().fold(current, |dims, op| match op {
        EditOperation::AppendColumns { count } => {
            SheetGridDimensions::new(dims.row_count, dims.column_count.saturating_add(*count))
        }
        EditOperation::AppendRows { count } => {
            SheetGridDimensions::new(dims.row_count.saturating_add(*count), dims.column_count)
        }
        _ => dims,
    })
}
