use crate::error::PlanError;
use crate::fill::{build_fill, build_sizing};
use crate::grid::ColorGrid;
use crate::operation::{BatchPlan, EditOperation, FillCellColors};
use crate::params::TargetParameters;
use crate::range::SheetGridDimensions;
use crate::reconcile::reconcile;

/// Order operations into a single batch.
///
/// The result is always: appended columns, appended rows, column sizes, row
/// sizes, then the fill. Operations of the same kind keep their input order
/// and nothing is merged or dropped.
pub fn sequence(
    structural: Vec<EditOperation>,
    sizing: Vec<EditOperation>,
    fill: FillCellColors,
) -> Result<BatchPlan, PlanError> {
    if structural.iter().any(EditOperation::is_fill) {
        return Err(PlanError::StrayFill("structural"));
    }
    if sizing.iter().any(EditOperation::is_fill) {
        return Err(PlanError::StrayFill("sizing"));
    }

    let mut operations = Vec::with_capacity(structural.len() + sizing.len() + 1);
    operations.extend(structural);
    operations.extend(sizing);
    // Stable, so same-kind operations keep their relative order
    operations.sort_by_key(EditOperation::phase);
    operations.push(fill.into());

    Ok(BatchPlan::from_ordered(operations))
}

/// Full plan for writing `grid` into a sheet that is currently `current` large
pub fn plan_conversion(
    grid: &ColorGrid,
    params: &TargetParameters,
    current: SheetGridDimensions,
) -> Result<BatchPlan, PlanError> {
    let structural = reconcile(current, grid.extent());
    let sizing = build_sizing(params, grid);
    let fill = build_fill(grid);
    sequence(structural, sizing, fill)
}
