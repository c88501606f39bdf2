//! Host-tunable settings.
//!
//! Hosts pass a JSON object (camelCase keys); anything omitted takes the
//! default. Invalid values are rejected by [`ViewConfig::validate`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabviewError};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_GRID_MAX_ROWS: usize = 50;
pub const DEFAULT_MAX_REFERENCE_INPUTS: usize = 10;
pub const DEFAULT_SECTION_PREVIEW_CELLS: usize = 10;
pub const DEFAULT_EXPORT_FILE_NAME: &str = "tank_capacity_curve.csv";

/// How the table filter compares the query against row text.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum FilterCase {
    /// Lower-case both sides before the substring test.
    #[default]
    Insensitive,
    /// Literal substring containment.
    Sensitive,
}

/// Presentation settings for the table, grid and calculator form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    /// Rows per table page
    pub page_size: usize,
    /// Data rows shown by the grid renderer before truncating
    pub grid_max_rows: usize,
    /// Upper bound on calculator input fields
    pub max_reference_inputs: usize,
    /// Cells listed per section preview
    pub section_preview_cells: usize,
    pub filter_case: FilterCase,
    /// Suggested file name handed to the export sink
    pub export_file_name: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            grid_max_rows: DEFAULT_GRID_MAX_ROWS,
            max_reference_inputs: DEFAULT_MAX_REFERENCE_INPUTS,
            section_preview_cells: DEFAULT_SECTION_PREVIEW_CELLS,
            filter_case: FilterCase::default(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl ViewConfig {
    /// Parse and validate a JSON config object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(TabviewError::Config("pageSize must be at least 1".into()));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(TabviewError::Config("exportFileName must not be empty".into()));
        }
        Ok(())
    }
}

/// Where the calculation service lives.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfig {
    /// Base URL without trailing slash; empty means same origin.
    pub base_url: String,
    /// Per-request timeout for native hosts.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 60,
        }
    }
}

impl ServiceConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        if config.timeout_secs == 0 {
            return Err(TabviewError::Config("timeoutSecs must be at least 1".into()));
        }
        Ok(config)
    }

    /// Absolute URL for an API path such as `/api/calculate`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = ViewConfig::from_json("{}").unwrap();
        assert_eq!(config, ViewConfig::default());
        assert_eq!(config.page_size, 20);
        assert_eq!(config.grid_max_rows, 50);
        assert_eq!(config.filter_case, FilterCase::Insensitive);
    }

    #[test]
    fn test_partial_override() {
        let config =
            ViewConfig::from_json(r#"{"pageSize": 5, "filterCase": "sensitive"}"#).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.filter_case, FilterCase::Sensitive);
        assert_eq!(config.max_reference_inputs, 10);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = ViewConfig::from_json(r#"{"pageSize": 0}"#).unwrap_err();
        assert!(matches!(err, TabviewError::Config(_)));
    }

    #[test]
    fn test_service_url() {
        let config =
            ServiceConfig::from_json(r#"{"baseUrl": "http://localhost:5000/"}"#).unwrap();
        assert_eq!(config.url("/api/calculate"), "http://localhost:5000/api/calculate");
        assert_eq!(ServiceConfig::default().url("/api/x"), "/api/x");
    }
}
