use serde::{Deserialize, Serialize};

/// Wire type code the calculation service uses for formula cells.
pub const FORMULA_TYPE_CODE: i64 = 6;

/// A raw cell value as delivered by the service (JSON null/bool/number/string).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// True for null and the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Rendering kind of a cell. Numeric sub-kinds (dates, booleans, errors)
/// all collapse to `Literal`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", from = "RawCellKind")]
pub enum CellKind {
    #[default]
    Literal,
    Formula,
}

/// Accepted wire encodings for a cell kind.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCellKind {
    Code(i64),
    Name(String),
    Missing,
}

impl From<RawCellKind> for CellKind {
    fn from(raw: RawCellKind) -> Self {
        match raw {
            RawCellKind::Code(FORMULA_TYPE_CODE) => Self::Formula,
            RawCellKind::Name(name) if name.eq_ignore_ascii_case("formula") => Self::Formula,
            RawCellKind::Code(_) | RawCellKind::Name(_) | RawCellKind::Missing => Self::Literal,
        }
    }
}

/// One addressable cell supplied by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Row (0-indexed)
    #[serde(deserialize_with = "crate::lenient::index", default)]
    pub row: u32,
    /// Column (0-indexed)
    #[serde(deserialize_with = "crate::lenient::index", default)]
    pub col: u32,
    #[serde(default)]
    pub value: CellValue,
    #[serde(rename = "type", default)]
    pub kind: CellKind,
}

impl GridCell {
    pub fn literal(row: u32, col: u32, value: impl Into<CellValue>) -> Self {
        Self {
            row,
            col,
            value: value.into(),
            kind: CellKind::Literal,
        }
    }

    pub fn formula(row: u32, col: u32, value: impl Into<CellValue>) -> Self {
        Self {
            row,
            col,
            value: value.into(),
            kind: CellKind::Formula,
        }
    }

    /// "A1"-style address of this cell.
    pub fn label(&self) -> String {
        crate::cell_ref::to_label(self.row, self.col)
    }

    pub fn is_formula(&self) -> bool {
        self.kind == CellKind::Formula
    }
}

/// Ragged 2-D cell data for one sheet; `None` marks a hole in a row.
pub type GridRows = Vec<Vec<Option<GridCell>>>;
