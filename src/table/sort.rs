//! Stable numeric sort of materialized rows.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::DataPoint;

/// Sortable table column.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    #[default]
    Position,
    CumulativeValue,
}

impl SortColumn {
    pub fn key(self, point: &DataPoint) -> f64 {
        match self {
            Self::Position => point.position,
            Self::CumulativeValue => point.cumulative_value,
        }
    }

    /// Column from a host-side name or index (`"position"`, `"0"`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "0" | "position" | "height" | "height_m" => Some(Self::Position),
            "1" | "cumulativeValue" | "cumulative_value" | "capacity" | "capacity_kL" => {
                Some(Self::CumulativeValue)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Per-column header indicator.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

/// Sort in place by `column`. Equal keys keep their input order in both
/// directions.
pub fn sort_rows(rows: &mut [DataPoint], column: SortColumn, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let base = column
            .key(a)
            .partial_cmp(&column.key(b))
            .unwrap_or(Ordering::Equal);
        match direction {
            SortDirection::Ascending => base,
            SortDirection::Descending => base.reverse(),
        }
    });
}
