//! Common test utilities and assertion helpers.
//!
//! Provides a scripted [`CalcService`] so session tests run without a live
//! service, plus a few helpers for reading controller output.
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

use std::cell::RefCell;
use std::collections::VecDeque;

use tabview::error::{Result, TabviewError};
use tabview::remote::{
    decode_response, decode_sheet, decode_sheet_list, CalcService, CapacityRequest,
    CapacityResponse, EvaluateRequest, EvaluateResponse,
};
use tabview::table::TableController;
use tabview::types::SheetData;

// Re-export fixtures for convenience
pub use super::fixtures::*;

// ============================================================================
// Scripted service
// ============================================================================

/// A canned `(status, body)` reply; status 0 simulates a transport failure.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }

    pub fn offline() -> Self {
        Self {
            status: 0,
            body: "connection refused".into(),
        }
    }
}

/// Replies are consumed in order; every request is recorded.
#[derive(Debug, Default)]
pub struct ScriptedService {
    replies: RefCell<VecDeque<Reply>>,
    pub requests: RefCell<Vec<String>>,
    pub evaluations: RefCell<Vec<EvaluateRequest>>,
}

impl ScriptedService {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            ..Self::default()
        }
    }

    fn next(&self, what: &str) -> Result<Reply> {
        self.requests.borrow_mut().push(what.to_string());
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .expect("no scripted reply left");
        if reply.status == 0 {
            return Err(TabviewError::Transport(reply.body));
        }
        Ok(reply)
    }
}

impl CalcService for ScriptedService {
    fn calculate_capacity(&self, _request: &CapacityRequest) -> Result<CapacityResponse> {
        let reply = self.next("calculate-capacity")?;
        decode_response(reply.status, &reply.body)
    }

    fn list_sheets(&self) -> Result<Vec<String>> {
        let reply = self.next("load-excel")?;
        decode_sheet_list(reply.status, &reply.body)
    }

    fn load_sheet(&self, name: &str) -> Result<SheetData> {
        let reply = self.next(&format!("sheet/{name}"))?;
        decode_sheet(name, reply.status, &reply.body)
    }

    fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse> {
        self.evaluations.borrow_mut().push(request.clone());
        let reply = self.next("calculate")?;
        decode_response(reply.status, &reply.body)
    }
}

// ============================================================================
// Controller helpers
// ============================================================================

/// Controller loaded with `builder`'s dataset and default config.
pub fn loaded_table(builder: &CurveBuilder) -> TableController {
    let mut table = TableController::default();
    table.load(builder.dataset());
    table
}

/// Positions of the materialized rows, in view order.
pub fn positions(table: &TableController) -> Vec<f64> {
    table.view().rows().iter().map(|p| p.position).collect()
}

/// Cumulative values of the materialized rows, in view order.
pub fn values(table: &TableController) -> Vec<f64> {
    table.view().rows().iter().map(|p| p.cumulative_value).collect()
}
