use crate::format::FractionalColor;
use crate::grid::ColorGrid;
use crate::operation::{EditOperation, FillCellColors};
use crate::params::TargetParameters;
use crate::range::{CellCoord, DimensionRange};

/// One fill covering the whole grid, anchored at the top-left cell
pub fn build_fill(grid: &ColorGrid) -> FillCellColors {
    let colors: Vec<Vec<FractionalColor>> = grid
        .iter_rows()
        .map(|row| row.iter().copied().map(FractionalColor::from).collect())
        .collect();

    FillCellColors {
        origin: CellCoord::ORIGIN,
        colors,
    }
}

/// Cell size operations for the axes the caller asked to resize
pub fn build_sizing(params: &TargetParameters, grid: &ColorGrid) -> Vec<EditOperation> {
    let extent = grid.extent();
    let mut ops = Vec::with_capacity(2);

    if let Some(size) = params.cell_width {
        ops.push(EditOperation::SetColumnPixelSize {
            size,
            range: DimensionRange::leading(extent.cols),
        });
    }
    if let Some(size) = params.cell_height {
        ops.push(EditOperation::SetRowPixelSize {
            size,
            range: DimensionRange::leading(extent.rows),
        });
    }

    ops
}
