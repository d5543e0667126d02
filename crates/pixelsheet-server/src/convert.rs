//! One image-to-sheet conversion, from validated form fields to the applied batch.

use bytes::Bytes;
use pixelsheet_core::{
    decode, plan_conversion, sample_within, ClampConfig, ColorGrid, ConvertError, SheetLink,
    TargetParameters, ValidationReason,
};
use serde::Serialize;

use crate::gateway::{AccessToken, SheetsGateway};

/// Form fields as they arrive, before any validation
#[derive(Debug, Default)]
pub struct RawForm {
    pub sheet_url: Option<String>,
    pub image: Option<Bytes>,
    pub num_columns: Option<String>,
    pub cell_width: Option<String>,
    pub cell_height: Option<String>,
}

/// A request that passed input validation
#[derive(Debug)]
pub struct ConversionRequest {
    pub link: SheetLink,
    pub params: TargetParameters,
    /// Ceiling on the sampled grid's cell count
    pub max_cells: u64,
    pub image: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionSummary {
    pub spreadsheet_id: String,
    pub sheet_id: u32,
    pub rows: usize,
    pub columns: usize,
    pub operations: usize,
}

fn optional_field(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_size(value: Option<&str>) -> Result<Option<i64>, ValidationReason> {
    optional_field(value)
        .map(|v| v.parse::<i64>().map_err(|_| ValidationReason::InvalidCellSize))
        .transpose()
}

impl RawForm {
    /// Check every field. Column count is checked first so a bad count is
    /// reported without looking at the image at all.
    pub fn validate(self, clamp: &ClampConfig) -> Result<ConversionRequest, ValidationReason> {
        let num_columns = optional_field(self.num_columns.as_deref())
            .ok_or(ValidationReason::MissingField)?
            .parse::<i64>()
            .map_err(|_| ValidationReason::InvalidColumns)?;
        let params = TargetParameters::new(
            num_columns,
            parse_size(self.cell_width.as_deref())?,
            parse_size(self.cell_height.as_deref())?,
            clamp,
        )?;

        let url = optional_field(self.sheet_url.as_deref()).ok_or(ValidationReason::MissingField)?;
        let link = SheetLink::parse(url)?;

        let image = self
            .image
            .filter(|b| !b.is_empty())
            .ok_or(ValidationReason::MissingField)?;

        Ok(ConversionRequest {
            link,
            params,
            max_cells: clamp.max_cells,
            image,
        })
    }
}

/// Decode and sample on the blocking pool. The decoded image is dropped
/// inside the closure whether or not sampling succeeds.
async fn sample_image(
    image: Bytes,
    num_columns: u32,
    max_cells: u64,
) -> Result<ColorGrid, ConvertError> {
    tokio::task::spawn_blocking(move || {
        let decoded = decode(&image)?;
        sample_within(&decoded, num_columns, max_cells)
    })
    .await
    .map_err(|e| ConvertError::Internal(format!("sampling task failed: {}", e)))?
    .map_err(ConvertError::from)
}

/// Run a validated request through sampling, planning and the gateway
pub async fn convert(
    gateway: &dyn SheetsGateway,
    token: &AccessToken,
    request: ConversionRequest,
) -> Result<ConversionSummary, ConvertError> {
    let ConversionRequest {
        link,
        params,
        max_cells,
        image,
    } = request;

    let grid = sample_image(image, params.num_columns, max_cells).await?;
    tracing::debug!("Sampled {} grid ({} cells)", grid.extent(), grid.cell_count());

    let current = gateway
        .grid_dimensions(token, &link.spreadsheet_id, link.sheet_id)
        .await?;
    let plan = plan_conversion(&grid, &params, current)?;
    tracing::debug!(
        "Planned {} operations ({} structural) for a {} grid on a {}x{} sheet",
        plan.len(),
        plan.structural_count(),
        grid.extent(),
        current.row_count,
        current.column_count
    );
    for op in &plan {
        tracing::debug!("  {}", op);
    }

    gateway
        .apply_batch(token, &link.spreadsheet_id, link.sheet_id, &plan)
        .await?;

    Ok(ConversionSummary {
        spreadsheet_id: link.spreadsheet_id,
        sheet_id: link.sheet_id,
        rows: grid.rows(),
        columns: grid.cols(),
        operations: plan.len(),
    })
}
