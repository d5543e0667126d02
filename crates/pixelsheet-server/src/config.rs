use std::env;
use std::time::Duration;

use pixelsheet_core::ClampConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL of the Google Sheets REST API
    pub sheets_api_base: String,
    /// Upper bound on requested columns
    pub max_columns: u32,
    /// Largest accepted request body, image included
    pub max_upload_bytes: usize,
    /// Timeout for each spreadsheet service call
    pub gateway_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse()?;
        let sheets_api_base = env::var("SHEETS_API_BASE")
            .unwrap_or_else(|_| "https://sheets.googleapis.com".to_string());
        let max_columns = env::var("MAX_COLUMNS")
            .unwrap_or_else(|_| pixelsheet_core::MAX_COLUMNS.to_string())
            .parse()?;
        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
            .parse()?;
        let gateway_timeout_secs: u64 = env::var("GATEWAY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()?;

        Ok(Self {
            host,
            port,
            sheets_api_base: sheets_api_base.trim_end_matches('/').to_string(),
            max_columns,
            max_upload_bytes,
            gateway_timeout: Duration::from_secs(gateway_timeout_secs),
        })
    }

    /// Column limits handed to the conversion pipeline
    pub fn clamp(&self) -> ClampConfig {
        ClampConfig::with_max(self.max_columns)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            sheets_api_base: "https://sheets.googleapis.com".to_string(),
            max_columns: pixelsheet_core::MAX_COLUMNS,
            max_upload_bytes: 10 * 1024 * 1024,
            gateway_timeout: Duration::from_secs(30),
        }
    }
}
