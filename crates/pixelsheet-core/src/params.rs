use serde::{Deserialize, Serialize};

use crate::error::ValidationReason;

/// Hard ceiling on how many columns an image is sampled to
pub const MAX_COLUMNS: u32 = 300;

/// Most cells a single spreadsheet can hold
pub const MAX_CELLS: u64 = 10_000_000;

fn default_max_cells() -> u64 {
    MAX_CELLS
}

/// Column limits applied to incoming requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampConfig {
    /// Largest column count accepted as-is
    pub max_columns: u32,
    /// Column count used when a request asks for more than `max_columns`
    pub default_clamped_columns: u32,
    /// Largest grid (rows x columns) a request may produce
    #[serde(default = "default_max_cells")]
    pub max_cells: u64,
}

impl ClampConfig {
    /// Build a config whose clamp target is the limit itself.
    /// `max_columns` is bounded to `[1, MAX_COLUMNS]`.
    pub fn with_max(max_columns: u32) -> Self {
        let max_columns = max_columns.clamp(1, MAX_COLUMNS);
        Self {
            max_columns,
            default_clamped_columns: max_columns,
            max_cells: MAX_CELLS,
        }
    }

    /// Reject non-positive counts, clamp anything above the limit
    pub fn clamp_columns(&self, requested: i64) -> Result<u32, ValidationReason> {
        if requested <= 0 {
            return Err(ValidationReason::NonPositiveColumns);
        }
        if requested > i64::from(self.max_columns) {
            return Ok(self.default_clamped_columns.clamp(1, self.max_columns.max(1)));
        }
        Ok(requested as u32)
    }
}

impl Default for ClampConfig {
    fn default() -> Self {
        Self::with_max(MAX_COLUMNS)
    }
}

/// Validated user request for one conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetParameters {
    pub num_columns: u32,
    pub cell_width: Option<u32>,
    pub cell_height: Option<u32>,
}

impl TargetParameters {
    pub fn new(
        num_columns: i64,
        cell_width: Option<i64>,
        cell_height: Option<i64>,
        config: &ClampConfig,
    ) -> Result<Self, ValidationReason> {
        Ok(Self {
            num_columns: config.clamp_columns(num_columns)?,
            cell_width: positive_size(cell_width),
            cell_height: positive_size(cell_height),
        })
    }
}

/// Non-positive sizes mean "leave the sheet's size alone"
fn positive_size(value: Option<i64>) -> Option<u32> {
    value
        .filter(|v| *v > 0)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_above_limit() {
        let config = ClampConfig::default();
        assert_eq!(config.clamp_columns(500), Ok(300));
        assert_eq!(config.clamp_columns(300), Ok(300));
        assert_eq!(config.clamp_columns(1), Ok(1));
    }

    #[test]
    fn test_reject_non_positive() {
        let config = ClampConfig::default();
        assert_eq!(
            config.clamp_columns(0),
            Err(ValidationReason::NonPositiveColumns)
        );
        assert_eq!(
            config.clamp_columns(-4),
            Err(ValidationReason::NonPositiveColumns)
        );
    }

    #[test]
    fn test_custom_clamp_target() {
        let config = ClampConfig {
            max_columns: 100,
            default_clamped_columns: 64,
            max_cells: MAX_CELLS,
        };
        assert_eq!(config.clamp_columns(101), Ok(64));
        assert_eq!(config.clamp_columns(100), Ok(100));
    }

    #[test]
    fn test_zero_limit_does_not_panic() {
        let config = ClampConfig {
            max_columns: 0,
            default_clamped_columns: 0,
            max_cells: MAX_CELLS,
        };
        assert_eq!(config.clamp_columns(5), Ok(1));
        assert_eq!(
            config.clamp_columns(0),
            Err(ValidationReason::NonPositiveColumns)
        );
    }

    #[test]
    fn test_max_cells_defaults_when_deserialized() {
        let config: ClampConfig =
            serde_json::from_str(r#"{"max_columns": 50, "default_clamped_columns": 50}"#).unwrap();
        assert_eq!(config.max_cells, MAX_CELLS);
    }

    #[test]
    fn test_with_max_is_bounded() {
        assert_eq!(ClampConfig::with_max(1000).max_columns, MAX_COLUMNS);
        assert_eq!(ClampConfig::with_max(0).max_columns, 1);
    }

    #[test]
    fn test_optional_sizes() {
        let config = ClampConfig::default();
        let params = TargetParameters::new(10, Some(12), Some(0), &config).unwrap();
        assert_eq!(params.cell_width, Some(12));
        assert_eq!(params.cell_height, None);

        let params = TargetParameters::new(10, None, Some(-3), &config).unwrap();
        assert_eq!(params.cell_width, None);
        assert_eq!(params.cell_height, None);
    }
}
