//! Access to the remote spreadsheet service.

pub mod google;

use async_trait::async_trait;
use pixelsheet_core::{BatchPlan, GatewayError, SheetGridDimensions};
use std::fmt;

pub use google::GoogleSheetsGateway;

/// OAuth access token of the user whose spreadsheet is edited
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Operations the conversion pipeline needs from a spreadsheet service
#[async_trait]
pub trait SheetsGateway: Send + Sync {
    /// Current row and column count of one sheet
    async fn grid_dimensions(
        &self,
        token: &AccessToken,
        spreadsheet_id: &str,
        sheet_id: u32,
    ) -> Result<SheetGridDimensions, GatewayError>;

    /// Submit every operation of `plan` as one atomic request
    async fn apply_batch(
        &self,
        token: &AccessToken,
        spreadsheet_id: &str,
        sheet_id: u32,
        plan: &BatchPlan,
    ) -> Result<(), GatewayError>;
}
