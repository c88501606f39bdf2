use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One sample on the position axis (e.g. fill height vs accumulated capacity).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    /// Position along the axis, e.g. height in metres. Non-negative.
    #[serde(
        rename = "height_m",
        alias = "position",
        deserialize_with = "crate::lenient::number",
        default
    )]
    pub position: f64,
    /// Accumulated value at `position`, e.g. capacity in kL.
    #[serde(
        rename = "capacity_kL",
        alias = "cumulativeValue",
        alias = "cumulative_value",
        deserialize_with = "crate::lenient::number",
        default
    )]
    pub cumulative_value: f64,
}

impl DataPoint {
    pub fn new(position: f64, cumulative_value: f64) -> Self {
        Self {
            position,
            cumulative_value,
        }
    }
}

/// Immutable sample sequence returned by one load, plus the scalar total
/// that percentages are computed against.
///
/// Cloning is cheap; the points are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    points: Arc<[DataPoint]>,
    total: f64,
}

impl Dataset {
    pub fn new(points: Vec<DataPoint>, total: f64) -> Self {
        Self {
            points: points.into(),
            total: crate::lenient::sanitize(total),
        }
    }

    /// Build a dataset whose total is the largest cumulative value.
    pub fn from_points(points: Vec<DataPoint>) -> Self {
        let total = points
            .iter()
            .map(|p| p.cumulative_value)
            .fold(0.0_f64, f64::max);
        Self::new(points, total)
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}
