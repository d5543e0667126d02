pub mod error;
pub mod fill;
pub mod format;
pub mod grid;
pub mod link;
pub mod operation;
pub mod params;
pub mod range;
pub mod reconcile;
pub mod sampler;
pub mod sequencer;

pub use error::{
    ConvertError, GatewayError, GatewayErrorKind, LinkError, PlanError, SampleError,
    ValidationReason,
};
pub use fill::{build_fill, build_sizing};
pub use format::{normalize_channel, FractionalColor, Rgb};
pub use grid::ColorGrid;
pub use link::SheetLink;
pub use operation::{BatchPlan, EditOperation, FillCellColors};
pub use params::{ClampConfig, TargetParameters, MAX_CELLS, MAX_COLUMNS};
pub use range::{col_to_label, CellCoord, DimensionRange, GridExtent, SheetGridDimensions};
pub use reconcile::{apply_structural, reconcile};
pub use sampler::{decode, sample, sample_within, target_rows};
pub use sequencer::{plan_conversion, sequence};
