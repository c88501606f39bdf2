//! Test fixtures for building service payloads in memory.
//!
//! Builders produce the same JSON the calculation service sends, so tests
//! exercise the real decoding path.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::{CurveBuilder, SheetBuilder};
//!
//! let body = CurveBuilder::linear(45, 0.1, 5.0).total(225.0).to_json();
//! let sheet = SheetBuilder::new()
//!     .row(&[num(1.0), num(2.0)])
//!     .formula("C1", "=A1+B1", 3.0)
//!     .to_json();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

use serde_json::{json, Value};

use tabview::types::{DataPoint, Dataset};

// ============================================================================
// Capacity curve
// ============================================================================

/// Builds a `calculate-capacity` response body.
#[derive(Debug, Clone, Default)]
pub struct CurveBuilder {
    points: Vec<(f64, f64)>,
    total: Option<f64>,
}

impl CurveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` evenly spaced points: position `i * step`, value `i * per_step`.
    pub fn linear(count: usize, step: f64, per_step: f64) -> Self {
        let points = (1..=count)
            .map(|i| {
                let i = i as f64;
                (round3(i * step), round3(i * per_step))
            })
            .collect();
        Self {
            points,
            total: None,
        }
    }

    pub fn point(mut self, position: f64, value: f64) -> Self {
        self.points.push((position, value));
        self
    }

    pub fn total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }

    fn resolved_total(&self) -> f64 {
        self.total
            .unwrap_or_else(|| self.points.iter().map(|p| p.1).fold(0.0, f64::max))
    }

    pub fn dataset(&self) -> Dataset {
        Dataset::new(
            self.points
                .iter()
                .map(|&(p, v)| DataPoint::new(p, v))
                .collect(),
            self.resolved_total(),
        )
    }

    pub fn to_value(&self) -> Value {
        let total = self.resolved_total();
        let curve: Vec<Value> = self
            .points
            .iter()
            .map(|&(h, c)| json!({ "height_m": h, "capacity_kL": c }))
            .collect();
        json!({
            "formula": "geometric kL = π D² H / 4",
            "capacity_barrels": 0.0,
            "capacity_kL_from_annex": total,
            "capacity_m3_from_annex": total,
            "capacity_kL_geometric": total,
            "capacity_m3_geometric": total,
            "working_capacity_kL": total * 0.9,
            "working_capacity_m3": total * 0.9,
            "freeboard_volume_kL": total * 0.1,
            "freeboard_volume_m3": total * 0.1,
            "freeboard_height_m": 1.2,
            "capacity_curve_100mm": curve,
            "internal_pressure_display": "0 bar (0.00 bar)",
            "external_pressure_display": "0 bar (0.00 bar)",
            "operating_temperature_C": 20.0,
        })
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

// ============================================================================
// Sheet payload
// ============================================================================

/// One cell in a [`SheetBuilder`] row.
#[derive(Debug, Clone)]
pub enum CellSpec {
    Hole,
    Literal(Value),
    Formula(Value),
}

pub fn num(v: f64) -> CellSpec {
    CellSpec::Literal(json!(v))
}

pub fn text(s: &str) -> CellSpec {
    CellSpec::Literal(json!(s))
}

pub fn formula_cell(v: f64) -> CellSpec {
    CellSpec::Formula(json!(v))
}

/// Builds a `sheet/{name}` response body.
#[derive(Debug, Clone, Default)]
pub struct SheetBuilder {
    rows: Vec<Vec<CellSpec>>,
    formulas: Vec<(String, String, Value)>,
    sections: Vec<(String, Vec<(u32, u32, Value)>)>,
}

impl SheetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, cells: &[CellSpec]) -> Self {
        self.rows.push(cells.to_vec());
        self
    }

    /// `count` rows of `cols` numeric cells.
    pub fn filled(mut self, count: usize, cols: usize) -> Self {
        for r in 0..count {
            let row = (0..cols).map(|c| num((r * cols + c) as f64)).collect();
            self.rows.push(row);
        }
        self
    }

    pub fn formula(mut self, reference: &str, text: &str, value: impl Into<Value>) -> Self {
        self.formulas
            .push((reference.to_string(), text.to_string(), value.into()));
        self
    }

    pub fn section(mut self, name: &str, cells: &[(u32, u32, f64)]) -> Self {
        self.sections.push((
            name.to_string(),
            cells.iter().map(|&(r, c, v)| (r, c, json!(v))).collect(),
        ));
        self
    }

    /// Response body. Formula keys keep the order they were added in.
    pub fn to_json(&self) -> String {
        let data: Vec<Value> = self
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                Value::Array(
                    row.iter()
                        .enumerate()
                        .map(|(c, cell)| match cell {
                            CellSpec::Hole => Value::Null,
                            CellSpec::Literal(v) => json!({ "row": r, "col": c, "value": v, "type": 2 }),
                            CellSpec::Formula(v) => json!({ "row": r, "col": c, "value": v, "type": 6 }),
                        })
                        .collect(),
                )
            })
            .collect();

        // serde_json::Map sorts its keys, so the formula object is written by hand
        let formulas: Vec<String> = self
            .formulas
            .iter()
            .map(|(reference, text, value)| {
                format!("{}:{}", json!(reference), json!({ "formula": text, "value": value }))
            })
            .collect();

        let sections: Vec<Value> = self
            .sections
            .iter()
            .map(|(name, cells)| {
                let cells: Vec<Value> = cells
                    .iter()
                    .map(|(r, c, v)| json!({ "row": r, "col": c, "value": v, "type": 2 }))
                    .collect();
                json!({ "name": name, "cells": cells })
            })
            .collect();

        let cols = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let structure = json!({
            "rows": self.rows.len(),
            "cols": cols,
            "formulas_count": self.formulas.len(),
            "sections": sections,
        });

        format!(
            r#"{{"data":{},"formulas":{{{}}},"structure":{}}}"#,
            Value::Array(data),
            formulas.join(","),
            structure
        )
    }
}
