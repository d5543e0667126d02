use async_trait::async_trait;
use pixelsheet_core::{
    BatchPlan, DimensionRange, EditOperation, FillCellColors, GatewayError, GatewayErrorKind,
    SheetGridDimensions,
};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::{AccessToken, SheetsGateway};

/// Longest slice of an upstream error body kept in error messages
const MAX_ERROR_BODY: usize = 512;

/// Which call a status code came back from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Dimensions,
    Batch,
}

/// Sheets v4 REST API client
#[derive(Clone)]
pub struct GoogleSheetsGateway {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleSheetsGateway {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn spreadsheet_url(&self, spreadsheet_id: &str) -> String {
        format!("{}/v4/spreadsheets/{}", self.base_url, spreadsheet_id)
    }
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    #[serde(default)]
    properties: SheetProperties,
}

// The API omits zero-valued fields, so sheet 0 arrives without a sheetId
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    #[serde(default)]
    sheet_id: u32,
    #[serde(default)]
    grid_properties: GridProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridProperties {
    #[serde(default)]
    row_count: u32,
    #[serde(default)]
    column_count: u32,
}

fn find_sheet(meta: &SpreadsheetMeta, sheet_id: u32) -> Option<SheetGridDimensions> {
    meta.sheets
        .iter()
        .map(|s| &s.properties)
        .find(|p| p.sheet_id == sheet_id)
        .map(|p| {
            SheetGridDimensions::new(p.grid_properties.row_count, p.grid_properties.column_count)
        })
}

fn classify(status: StatusCode, call: Call) -> GatewayErrorKind {
    match status {
        // A malformed spreadsheet id comes back as 400 on reads
        StatusCode::BAD_REQUEST if call == Call::Dimensions => GatewayErrorKind::NotFound,
        StatusCode::BAD_REQUEST => GatewayErrorKind::BadRequest,
        StatusCode::UNAUTHORIZED => GatewayErrorKind::AuthExpired,
        StatusCode::FORBIDDEN => GatewayErrorKind::Forbidden,
        StatusCode::NOT_FOUND => GatewayErrorKind::NotFound,
        StatusCode::TOO_MANY_REQUESTS => GatewayErrorKind::RateLimited,
        _ => GatewayErrorKind::Unavailable,
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    GatewayError::new(GatewayErrorKind::Unavailable, err.to_string())
}

async fn check_status(
    response: reqwest::Response,
    call: Call,
) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    Err(GatewayError::new(
        classify(status, call),
        format!("{}: {}", status, body),
    ))
}

fn dimension_range(sheet_id: u32, dimension: &str, range: &DimensionRange) -> Value {
    json!({
        "sheetId": sheet_id,
        "dimension": dimension,
        "startIndex": range.start,
        "endIndex": range.end,
    })
}

fn fill_request(sheet_id: u32, fill: &FillCellColors) -> Value {
    let rows: Vec<Value> = fill
        .colors
        .iter()
        .map(|row| {
            let values: Vec<Value> = row
                .iter()
                .map(|c| {
                    json!({
                        "userEnteredFormat": {
                            "backgroundColor": {
                                "red": c.red,
                                "green": c.green,
                                "blue": c.blue,
                            }
                        }
                    })
                })
                .collect();
            json!({ "values": values })
        })
        .collect();

    json!({
        "updateCells": {
            "start": {
                "sheetId": sheet_id,
                "rowIndex": fill.origin.row,
                "columnIndex": fill.origin.col,
            },
            "rows": rows,
            "fields": "userEnteredFormat.backgroundColor",
        }
    })
}

/// Sheets API request object for one edit operation
pub fn to_request(sheet_id: u32, op: &EditOperation) -> Value {
    match op {
        EditOperation::AppendColumns { count } => json!({
            "appendDimension": {
                "sheetId": sheet_id,
                "dimension": "COLUMNS",
                "length": count,
            }
        }),
        EditOperation::AppendRows { count } => json!({
            "appendDimension": {
                "sheetId": sheet_id,
                "dimension": "ROWS",
                "length": count,
            }
        }),
        EditOperation::SetColumnPixelSize { size, range } => json!({
            "updateDimensionProperties": {
                "range": dimension_range(sheet_id, "COLUMNS", range),
                "properties": { "pixelSize": size },
                "fields": "pixelSize",
            }
        }),
        EditOperation::SetRowPixelSize { size, range } => json!({
            "updateDimensionProperties": {
                "range": dimension_range(sheet_id, "ROWS", range),
                "properties": { "pixelSize": size },
                "fields": "pixelSize",
            }
        }),
        EditOperation::FillCellColors(fill) => fill_request(sheet_id, fill),
    }
}

/// Body of a `spreadsheets.batchUpdate` call, in plan order
pub fn batch_update_body(sheet_id: u32, plan: &BatchPlan) -> Value {
    let requests: Vec<Value> = plan.into_iter().map(|op| to_request(sheet_id, op)).collect();
    json!({ "requests": requests })
}

#[async_trait]
impl SheetsGateway for GoogleSheetsGateway {
    async fn grid_dimensions(
        &self,
        token: &AccessToken,
        spreadsheet_id: &str,
        sheet_id: u32,
    ) -> Result<SheetGridDimensions, GatewayError> {
        let response = self
            .client
            .get(self.spreadsheet_url(spreadsheet_id))
            .query(&[("fields", "sheets.properties(sheetId,gridProperties)")])
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response, Call::Dimensions).await?;

        let meta: SpreadsheetMeta = response.json().await.map_err(|e| {
            GatewayError::new(
                GatewayErrorKind::Unavailable,
                format!("unreadable spreadsheet metadata: {}", e),
            )
        })?;

        find_sheet(&meta, sheet_id).ok_or_else(|| {
            GatewayError::new(
                GatewayErrorKind::NotFound,
                format!("sheet {} not found in {}", sheet_id, spreadsheet_id),
            )
        })
    }

    async fn apply_batch(
        &self,
        token: &AccessToken,
        spreadsheet_id: &str,
        sheet_id: u32,
        plan: &BatchPlan,
    ) -> Result<(), GatewayError> {
        let url = format!("{}:batchUpdate", self.spreadsheet_url(spreadsheet_id));
        let response = self
            .client
            .post(url)
            .bearer_auth(token.as_str())
            .json(&batch_update_body(sheet_id, plan))
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response, Call::Batch).await?;

        tracing::debug!(
            "Applied {} operations to {} (sheet {})",
            plan.len(),
            spreadsheet_id,
            sheet_id
        );
        Ok(())
    }
}
