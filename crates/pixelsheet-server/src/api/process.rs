use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap},
    routing::post,
    Json, Router,
};
use pixelsheet_core::{ConvertError, GatewayErrorKind};

use crate::convert::{convert, ConversionSummary, RawForm};
use crate::error::AppError;
use crate::gateway::AccessToken;
use crate::AppState;

/// Bearer token from the Authorization header. Session handling lives in
/// front of this service, so a missing token means the login has lapsed.
fn bearer_token(headers: &HeaderMap) -> Result<AccessToken, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(AccessToken::new)
        .ok_or(AppError::Convert(ConvertError::Gateway {
            kind: GatewayErrorKind::AuthExpired,
        }))
}

async fn read_form(mut multipart: Multipart) -> Result<RawForm, AppError> {
    let mut form = RawForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "uploadedImage" => form.image = Some(field.bytes().await?),
            "sheetUrl" => form.sheet_url = Some(field.text().await?),
            "numColumns" => form.num_columns = Some(field.text().await?),
            "cellWidth" => form.cell_width = Some(field.text().await?),
            "cellHeight" => form.cell_height = Some(field.text().await?),
            other => tracing::debug!("Ignoring unknown form field {}", other),
        }
    }

    Ok(form)
}

/// Convert an uploaded image into cell colors of the linked sheet
async fn process_sheet(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<ConversionSummary>, AppError> {
    let form = read_form(multipart).await?;
    let request = form.validate(&state.clamp)?;
    let token = bearer_token(&headers)?;

    let summary = convert(state.gateway.as_ref(), &token, request).await?;

    tracing::info!(
        "Wrote {}x{} cells to spreadsheet {} (sheet {})",
        summary.rows,
        summary.columns,
        summary.spreadsheet_id,
        summary.sheet_id
    );
    Ok(Json(summary))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/process-sheet", post(process_sheet))
}
