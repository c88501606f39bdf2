use serde::{Deserialize, Serialize};

use super::{FormulaMap, GridCell, GridRows};

/// Summary of a sheet as analysed by the service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetStructure {
    #[serde(deserialize_with = "crate::lenient::count", default)]
    pub rows: usize,
    #[serde(deserialize_with = "crate::lenient::count", default)]
    pub cols: usize,
    #[serde(deserialize_with = "crate::lenient::count", default)]
    pub formulas_count: usize,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A named block of related cells identified by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub cells: Vec<GridCell>,
}

/// Everything one sheet load delivers. Replaced wholesale on the next load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetData {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "data")]
    pub rows: GridRows,
    #[serde(default)]
    pub formulas: FormulaMap,
    #[serde(default)]
    pub structure: SheetStructure,
}
