use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failures while turning raw bytes into a color grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("image could not be decoded: {0}")]
    Decode(String),

    #[error("invalid sampling dimensions: {0}")]
    Dimension(String),

    #[error("{rows}x{cols} grid exceeds the {max_cells} cell limit")]
    TooLarge { rows: u32, cols: u32, max_cells: u64 },
}

/// Failures while extracting identifiers from a spreadsheet URL
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    #[error("spreadsheet link does not contain a /d/<id>/edit segment")]
    InvalidSpreadsheetLink,

    #[error("spreadsheet link does not contain a numeric gid")]
    InvalidSheetId,
}

/// Defects in batch planning. These never depend on user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("a fill operation was passed as a {0} operation")]
    StrayFill(&'static str),

    #[error("grid is not rectangular: row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid has no cells")]
    Empty,
}

/// Why a request was rejected before (or instead of) editing the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationReason {
    /// numColumns was zero or negative
    NonPositiveColumns,
    /// numColumns was not an integer
    InvalidColumns,
    /// cellWidth / cellHeight was not an integer
    InvalidCellSize,
    InvalidSpreadsheetLink,
    InvalidSheetId,
    /// A required multipart field was absent
    MissingField,
    UndecodableImage,
    /// The sampled grid would hold more cells than a sheet allows
    GridTooLarge,
    /// The sheet id does not exist in the spreadsheet
    SheetNotFound,
}

impl ValidationReason {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationReason::NonPositiveColumns => "NON_POSITIVE_COLUMNS",
            ValidationReason::InvalidColumns => "INVALID_COLUMNS",
            ValidationReason::InvalidCellSize => "INVALID_CELL_SIZE",
            ValidationReason::InvalidSpreadsheetLink => "INVALID_SPREADSHEET_LINK",
            ValidationReason::InvalidSheetId => "INVALID_SHEET_ID",
            ValidationReason::MissingField => "MISSING_FIELD",
            ValidationReason::UndecodableImage => "UNDECODABLE_IMAGE",
            ValidationReason::GridTooLarge => "GRID_TOO_LARGE",
            ValidationReason::SheetNotFound => "SHEET_NOT_FOUND",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationReason::NonPositiveColumns => "Please provide a positive number of columns",
            ValidationReason::InvalidColumns => "Number of columns must be an integer",
            ValidationReason::InvalidCellSize => "Cell width and height must be integers",
            ValidationReason::InvalidSpreadsheetLink => "Invalid spreadsheet link",
            ValidationReason::InvalidSheetId => "Spreadsheet link has no valid sheet id",
            ValidationReason::MissingField => "A required field is missing",
            ValidationReason::UndecodableImage => "The uploaded image could not be decoded",
            ValidationReason::GridTooLarge => {
                "The image is too tall for this many columns; use fewer columns"
            }
            ValidationReason::SheetNotFound => "The sheet does not exist in this spreadsheet",
        };
        f.write_str(msg)
    }
}

impl From<LinkError> for ValidationReason {
    fn from(err: LinkError) -> Self {
        match err {
            LinkError::InvalidSpreadsheetLink => ValidationReason::InvalidSpreadsheetLink,
            LinkError::InvalidSheetId => ValidationReason::InvalidSheetId,
        }
    }
}

/// Failure kinds reported by the spreadsheet service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatewayErrorKind {
    NotFound,
    BadRequest,
    AuthExpired,
    Forbidden,
    RateLimited,
    Unavailable,
}

impl fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayErrorKind::NotFound => write!(f, "not found"),
            GatewayErrorKind::BadRequest => write!(f, "bad request"),
            GatewayErrorKind::AuthExpired => write!(f, "authorization expired"),
            GatewayErrorKind::Forbidden => write!(f, "forbidden"),
            GatewayErrorKind::RateLimited => write!(f, "rate limited"),
            GatewayErrorKind::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Error returned by a gateway call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("spreadsheet service error ({kind}): {message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Terminal outcome of a failed conversion, as seen by the web layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("{reason}")]
    Validation { reason: ValidationReason },

    #[error("spreadsheet service {kind}")]
    Gateway { kind: GatewayErrorKind },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ConvertError {
    pub fn validation(reason: ValidationReason) -> Self {
        ConvertError::Validation { reason }
    }

    /// Machine-readable code for the failure
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::Validation { reason } => reason.code(),
            ConvertError::Gateway { kind } => match kind {
                GatewayErrorKind::NotFound => "SHEET_NOT_FOUND",
                GatewayErrorKind::AuthExpired => "AUTH_EXPIRED",
                GatewayErrorKind::Forbidden => "FORBIDDEN",
                GatewayErrorKind::RateLimited => "RATE_LIMITED",
                GatewayErrorKind::Unavailable => "UNAVAILABLE",
                GatewayErrorKind::BadRequest => "INTERNAL",
            },
            ConvertError::Internal(_) => "INTERNAL",
        }
    }

    /// Whether the caller may reasonably try again later
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ConvertError::Gateway {
                kind: GatewayErrorKind::RateLimited | GatewayErrorKind::Unavailable
            }
        )
    }
}

impl From<SampleError> for ConvertError {
    fn from(err: SampleError) -> Self {
        match err {
            SampleError::Decode(_) => ConvertError::validation(ValidationReason::UndecodableImage),
            SampleError::Dimension(_) => {
                ConvertError::validation(ValidationReason::NonPositiveColumns)
            }
            SampleError::TooLarge { .. } => {
                ConvertError::validation(ValidationReason::GridTooLarge)
            }
        }
    }
}

impl From<LinkError> for ConvertError {
    fn from(err: LinkError) -> Self {
        ConvertError::validation(err.into())
    }
}

impl From<PlanError> for ConvertError {
    fn from(err: PlanError) -> Self {
        ConvertError::Internal(err.to_string())
    }
}

impl From<GatewayError> for ConvertError {
    fn from(err: GatewayError) -> Self {
        match err.kind {
            // Unknown sheet id within a valid spreadsheet is the caller's mistake
            GatewayErrorKind::NotFound => ConvertError::validation(ValidationReason::SheetNotFound),
            // A rejected batch means we planned something malformed
            GatewayErrorKind::BadRequest => {
                ConvertError::Internal(format!("batch rejected: {}", err.message))
            }
            kind => ConvertError::Gateway { kind },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_not_found_is_validation() {
        let err: ConvertError = GatewayError::new(GatewayErrorKind::NotFound, "no sheet").into();
        assert_eq!(
            err,
            ConvertError::validation(ValidationReason::SheetNotFound)
        );
        assert_eq!(err.code(), "SHEET_NOT_FOUND");
    }

    #[test]
    fn test_gateway_bad_request_is_internal() {
        let err: ConvertError = GatewayError::new(GatewayErrorKind::BadRequest, "bad range").into();
        assert!(matches!(err, ConvertError::Internal(ref msg) if msg.contains("bad range")));
        assert_eq!(err.code(), "INTERNAL");
    }

    #[test]
    fn test_transient_kinds() {
        let limited: ConvertError = GatewayError::new(GatewayErrorKind::RateLimited, "").into();
        let down: ConvertError = GatewayError::new(GatewayErrorKind::Unavailable, "").into();
        let forbidden: ConvertError = GatewayError::new(GatewayErrorKind::Forbidden, "").into();
        assert!(limited.is_transient());
        assert!(down.is_transient());
        assert!(!forbidden.is_transient());
    }

    #[test]
    fn test_sample_error_codes() {
        let err: ConvertError = SampleError::Decode("image has no pixels".into()).into();
        assert_eq!(err.code(), "UNDECODABLE_IMAGE");
        let err: ConvertError = SampleError::TooLarge {
            rows: 6_000_000,
            cols: 300,
            max_cells: 10_000_000,
        }
        .into();
        assert_eq!(err.code(), "GRID_TOO_LARGE");
        let err: ConvertError = SampleError::Dimension("zero columns".into()).into();
        assert_eq!(err.code(), "NON_POSITIVE_COLUMNS");
    }

    #[test]
    fn test_link_error_codes() {
        let err: ConvertError = LinkError::InvalidSheetId.into();
        assert_eq!(err.code(), "INVALID_SHEET_ID");
        let err: ConvertError = LinkError::InvalidSpreadsheetLink.into();
        assert_eq!(err.code(), "INVALID_SPREADSHEET_LINK");
    }
}
