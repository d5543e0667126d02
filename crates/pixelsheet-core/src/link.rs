use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::error::LinkError;

/// Spreadsheet and sheet identifiers extracted from a share/edit URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetLink {
    pub spreadsheet_id: String,
    pub sheet_id: u32,
}

fn spreadsheet_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/d/([A-Za-z0-9_-]+)/edit").expect("valid regex"))
}

fn sheet_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[#?&]gid=([0-9]+)").expect("valid regex"))
}

impl SheetLink {
    /// Parse a URL like `https://docs.google.com/spreadsheets/d/<id>/edit#gid=<n>`
    pub fn parse(url: &str) -> Result<Self, LinkError> {
        let url = url.trim();

        let spreadsheet_id = spreadsheet_id_pattern()
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or(LinkError::InvalidSpreadsheetLink)?;

        let sheet_id = sheet_id_pattern()
            .captures(url)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .ok_or(LinkError::InvalidSheetId)?;

        Ok(Self {
            spreadsheet_id,
            sheet_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edit_link() {
        let link = SheetLink::parse(
            "https://docs.google.com/spreadsheets/d/1AbC-d_EfG/edit#gid=123456",
        )
        .unwrap();
        assert_eq!(link.spreadsheet_id, "1AbC-d_EfG");
        assert_eq!(link.sheet_id, 123456);
    }

    #[test]
    fn test_parse_query_gid() {
        let link =
            SheetLink::parse("https://docs.google.com/spreadsheets/d/xyz/edit?usp=sharing&gid=0")
                .unwrap();
        assert_eq!(link.spreadsheet_id, "xyz");
        assert_eq!(link.sheet_id, 0);
    }

    #[test]
    fn test_missing_edit_segment() {
        assert_eq!(
            SheetLink::parse("https://docs.google.com/spreadsheets/d/xyz/view#gid=0"),
            Err(LinkError::InvalidSpreadsheetLink)
        );
        assert_eq!(
            SheetLink::parse("not a link"),
            Err(LinkError::InvalidSpreadsheetLink)
        );
    }

    #[test]
    fn test_missing_gid() {
        assert_eq!(
            SheetLink::parse("https://docs.google.com/spreadsheets/d/xyz/edit"),
            Err(LinkError::InvalidSheetId)
        );
        assert_eq!(
            SheetLink::parse("https://docs.google.com/spreadsheets/d/xyz/edit#gid=abc"),
            Err(LinkError::InvalidSheetId)
        );
        // Larger than any sheet id the service hands out
        assert_eq!(
            SheetLink::parse("https://docs.google.com/spreadsheets/d/xyz/edit#gid=99999999999"),
            Err(LinkError::InvalidSheetId)
        );
    }
}
