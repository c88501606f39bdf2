//! Request and response bodies exchanged with the calculation service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabviewError};
use crate::numfmt::{fixed, format_number};
use crate::table::number_to_plain_string;
use crate::types::{CellValue, DataPoint, Dataset};

/// Tank geometry and operating conditions for a capacity run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(non_snake_case)]
pub struct CapacityRequest {
    /// Diameter (m)
    pub D: f64,
    /// Height (m)
    pub H: f64,
    /// Specific gravity
    pub G: f64,
    pub internal_pressure: f64,
    pub internal_pressure_unit: String,
    pub external_pressure: f64,
    pub external_pressure_unit: String,
    pub operating_temperature_C: f64,
    pub CA_shell: f64,
    pub CA_bottom: f64,
    pub CA_roof: f64,
    pub CA_structure: f64,
    pub CA_anchor_bolt: f64,
    pub CA_external: f64,
}

impl Default for CapacityRequest {
    fn default() -> Self {
        Self {
            D: 8.0,
            H: 12.0,
            G: 1.0,
            internal_pressure: 0.0,
            internal_pressure_unit: "bar".into(),
            external_pressure: 0.0,
            external_pressure_unit: "bar".into(),
            operating_temperature_C: 20.0,
            CA_shell: 3.0,
            CA_bottom: 3.0,
            CA_roof: 3.0,
            CA_structure: 3.0,
            CA_anchor_bolt: 3.0,
            CA_external: 3.0,
        }
    }
}

/// Capacity run result. Every numeric field is read leniently.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
#[allow(non_snake_case)]
pub struct CapacityResponse {
    pub formula: String,
    #[serde(deserialize_with = "crate::lenient::number")]
    pub capacity_barrels: f64,
    #[serde(deserialize_with = "crate::lenient::number")]
    pub capacity_kL_from_annex: f64,
    #[serde(deserialize_with = "crate::lenient::number")]
    pub capacity_m3_from_annex: f64,
    /// Total used for percentages
    #[serde(deserialize_with = "crate::lenient::number")]
    pub capacity_kL_geometric: f64,
    #[serde(deserialize_with = "crate::lenient::number")]
    pub capacity_m3_geometric: f64,
    #[serde(deserialize_with = "crate::lenient::number")]
    pub working_capacity_kL: f64,
    #[serde(deserialize_with = "crate::lenient::number")]
    pub working_capacity_m3: f64,
    #[serde(deserialize_with = "crate::lenient::number")]
    pub freeboard_volume_kL: f64,
    #[serde(deserialize_with = "crate::lenient::number")]
    pub freeboard_volume_m3: f64,
    #[serde(deserialize_with = "crate::lenient::number")]
    pub freeboard_height_m: f64,
    pub capacity_curve_100mm: Vec<DataPoint>,
    pub internal_pressure_display: String,
    pub external_pressure_display: String,
    #[serde(deserialize_with = "crate::lenient::number")]
    pub operating_temperature_C: f64,
}

impl CapacityResponse {
    /// The capacity curve as a dataset, totalled on the geometric capacity.
    pub fn dataset(&self) -> Dataset {
        Dataset::new(self.capacity_curve_100mm.clone(), self.capacity_kL_geometric)
    }

    pub fn summary(&self) -> CapacitySummary {
        let pair = |kl: f64, m3: f64| format!("{} kL ({} m³)", format_number(kl), format_number(m3));
        CapacitySummary {
            formula: self.formula.clone(),
            internal_pressure: self.internal_pressure_display.clone(),
            external_pressure: self.external_pressure_display.clone(),
            operating_temperature: number_to_plain_string(self.operating_temperature_C),
            annex_capacity: pair(self.capacity_kL_from_annex, self.capacity_m3_from_annex),
            geometric_capacity: pair(self.capacity_kL_geometric, self.capacity_m3_geometric),
            working_capacity: pair(self.working_capacity_kL, self.working_capacity_m3),
            freeboard_volume: pair(self.freeboard_volume_kL, self.freeboard_volume_m3),
            freeboard_height: format!("{} m", fixed(self.freeboard_height_m, 3)),
        }
    }
}

/// Display strings for the result panel above the capacity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySummary {
    pub formula: String,
    pub internal_pressure: String,
    pub external_pressure: String,
    pub operating_temperature: String,
    pub annex_capacity: String,
    pub geometric_capacity: String,
    pub working_capacity: String,
    pub freeboard_volume: String,
    pub freeboard_height: String,
}

/// `load-excel` body. Failures may arrive with a 2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SheetListResponse {
    pub success: bool,
    pub sheets: Vec<String>,
    pub error: Option<String>,
}

const SHEET_LIST_FALLBACK: &str = "Failed to load Excel file";

impl SheetListResponse {
    pub fn into_result(self, status: u16) -> Result<Vec<String>> {
        if self.success {
            return Ok(self.sheets);
        }
        Err(TabviewError::Remote {
            status,
            message: self.error.unwrap_or_else(|| SHEET_LIST_FALLBACK.to_string()),
        })
    }
}

/// Decode a `load-excel` response regardless of status.
pub fn decode_sheet_list(status: u16, body: &str) -> Result<Vec<String>> {
    match serde_json::from_str::<SheetListResponse>(body) {
        Ok(list) => list.into_result(status),
        Err(e) if (200..300).contains(&status) => Err(e.into()),
        Err(_) => super::decode_response(status, body),
    }
}

/// Formula evaluation with user-supplied cell values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub formula: String,
    pub inputs: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluateResponse {
    #[serde(default)]
    pub result: CellValue,
}

impl EvaluateResponse {
    /// "Result: 42"
    pub fn message(&self) -> String {
        let text = match &self.result {
            CellValue::Empty => "null".to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => number_to_plain_string(*n),
            CellValue::Text(s) => s.clone(),
        };
        format!("Result: {text}")
    }
}
