//! WASM-exported adapters for the host page.
//!
//! `CapacityTable` drives the capacity results screen and `SheetViewer` the
//! sheet viewer/calculator. Both return plain JS objects; the host owns the
//! DOM. Remote round trips follow one pattern:
//!
//! ```javascript
//! const ticket = table.beginLoad();
//! const { status, body } = await fetchJson("POST", "/api/calculate-capacity", JSON.stringify(req));
//! table.finishLoad(ticket, status, body);
//! ```
//!
//! A `status` of 0 reports a transport failure, with `body` carrying its
//! message.

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod fetch;

#[cfg(target_arch = "wasm32")]
pub use fetch::fetch_json;

use std::collections::BTreeMap;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::ViewConfig;
use crate::error::{Result, TabviewError};
use crate::remote::{decode_response, decode_sheet, decode_sheet_list};
use crate::session::{CapacitySession, LoadTicket, SheetSession};
use crate::table::SortColumn;

/// Serialize to a plain JS object (maps become objects, not `Map`s).
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> std::result::Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `undefined`/`null` mean defaults; anything else must be a config object.
fn view_config(config: JsValue) -> std::result::Result<ViewConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(ViewConfig::default());
    }
    let config: ViewConfig = serde_wasm_bindgen::from_value(config).map_err(js_err)?;
    config.validate().map_err(js_err)?;
    Ok(config)
}

/// Decode a host-supplied response, treating status 0 as a transport error.
fn received<T>(status: u16, body: &str, decode: impl FnOnce(u16, &str) -> Result<T>) -> Result<T> {
    if status == 0 {
        return Err(TabviewError::Transport(body.to_string()));
    }
    decode(status, body)
}

fn ticket(id: u32) -> LoadTicket {
    LoadTicket::from_id(u64::from(id))
}

fn ticket_id(ticket: LoadTicket) -> u32 {
    u32::try_from(ticket.id()).unwrap_or(u32::MAX)
}

/// Route `log` output to the browser console at `level`
/// (`"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`; default `"info"`).
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = "initLogging")]
pub fn init_logging(level: Option<String>) {
    console_error_panic_hook::set_once();
    let level = level
        .as_deref()
        .and_then(|l| l.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);
    console::install(level);
}

/// Request path for a sheet, percent-encoded.
#[wasm_bindgen(js_name = "sheetPath")]
pub fn sheet_path(name: &str) -> String {
    crate::remote::sheet_path(name)
}

// ============================================================================
// Capacity table
// ============================================================================

/// Capacity results table: filter, sort, paginate and export the curve.
#[wasm_bindgen]
pub struct CapacityTable {
    session: CapacitySession,
}

#[wasm_bindgen]
impl CapacityTable {
    /// Create a table. `config` is an optional `ViewConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> std::result::Result<CapacityTable, JsValue> {
        console_error_panic_hook::set_once();
        Ok(Self {
            session: CapacitySession::new(view_config(config)?),
        })
    }

    #[wasm_bindgen(js_name = "beginLoad")]
    pub fn begin_load(&mut self) -> u32 {
        ticket_id(self.session.begin_load())
    }

    /// Apply a `calculate-capacity` response. Returns the load outcome.
    #[wasm_bindgen(js_name = "finishLoad")]
    pub fn finish_load(&mut self, id: u32, status: u16, body: &str) -> std::result::Result<JsValue, JsValue> {
        let result = received(status, body, decode_response);
        to_js(&self.session.finish_load(ticket(id), result))
    }

    /// Load state: `{ state: "idle" | "loading" | "ready" | "failed", message? }`.
    pub fn state(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.session.state())
    }

    #[wasm_bindgen(js_name = "setFilter")]
    pub fn set_filter(&mut self, query: &str) {
        self.session.table_mut().set_filter(query);
    }

    /// Sort by `"position"` / `"cumulativeValue"` (or column index `"0"` / `"1"`).
    #[wasm_bindgen(js_name = "toggleSort")]
    pub fn toggle_sort(&mut self, column: &str) -> std::result::Result<(), JsValue> {
        let column = SortColumn::parse(column)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown sort column: {column}")))?;
        self.session.table_mut().toggle_sort(column);
        Ok(())
    }

    #[wasm_bindgen(js_name = "setPage")]
    pub fn set_page(&mut self, delta: i32) {
        self.session.table_mut().set_page(i64::from(delta));
    }

    /// Rows, headers, sort indicators and pager state for the current page.
    #[wasm_bindgen(js_name = "currentPage")]
    pub fn current_page(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.session.table().current_page())
    }

    /// Summary panel strings, or `null` before the first successful load.
    pub fn summary(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.session.summary())
    }

    /// CSV bytes for every row of the current view.
    #[wasm_bindgen(js_name = "exportCsv")]
    pub fn export_csv(&self) -> Vec<u8> {
        self.session.export().bytes
    }

    #[wasm_bindgen(js_name = "exportFileName")]
    pub fn export_file_name(&self) -> String {
        self.session.export_file_name().to_string()
    }

    #[wasm_bindgen(js_name = "exportMimeType")]
    pub fn export_mime_type(&self) -> String {
        crate::export::CSV_MIME_TYPE.to_string()
    }
}

// ============================================================================
// Sheet viewer / calculator
// ============================================================================

/// Sheet grid, summary panels and formula calculator.
#[wasm_bindgen]
pub struct SheetViewer {
    session: SheetSession,
}

#[wasm_bindgen]
impl SheetViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> std::result::Result<SheetViewer, JsValue> {
        console_error_panic_hook::set_once();
        Ok(Self {
            session: SheetSession::new(view_config(config)?),
        })
    }

    #[wasm_bindgen(js_name = "beginSheetList")]
    pub fn begin_sheet_list(&mut self) -> u32 {
        ticket_id(self.session.begin_sheet_list())
    }

    /// Apply a `load-excel` response.
    #[wasm_bindgen(js_name = "finishSheetList")]
    pub fn finish_sheet_list(&mut self, id: u32, status: u16, body: &str) -> std::result::Result<JsValue, JsValue> {
        let result = received(status, body, decode_sheet_list);
        to_js(&self.session.finish_sheet_list(ticket(id), result))
    }

    pub fn sheets(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(self.session.sheets())
    }

    #[wasm_bindgen(js_name = "beginSheet")]
    pub fn begin_sheet(&mut self) -> u32 {
        ticket_id(self.session.begin_sheet())
    }

    /// Apply a `sheet/{name}` response.
    #[wasm_bindgen(js_name = "finishSheet")]
    pub fn finish_sheet(
        &mut self,
        id: u32,
        name: &str,
        status: u16,
        body: &str,
    ) -> std::result::Result<JsValue, JsValue> {
        let result = received(status, body, |status, body| decode_sheet(name, status, body));
        to_js(&self.session.finish_sheet(ticket(id), result))
    }

    pub fn state(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.session.state())
    }

    /// Sheet information panel, or `null` when no sheet is loaded.
    pub fn info(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.session.info())
    }

    pub fn grid(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.session.grid())
    }

    pub fn sections(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.session.sections())
    }

    pub fn formulas(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.session.formulas())
    }

    #[wasm_bindgen(js_name = "inputForm")]
    pub fn input_form(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.session.input_form())
    }

    /// Build the `calculate` request body from `{ ref: "typed text" }`.
    ///
    /// Returns `{ request }` on success, or `{ message: { text, isError } }`
    /// when there is no formula to evaluate.
    #[wasm_bindgen(js_name = "evaluationRequest")]
    pub fn evaluation_request(&mut self, inputs: JsValue) -> std::result::Result<JsValue, JsValue> {
        let raw: BTreeMap<String, String> = if inputs.is_undefined() || inputs.is_null() {
            BTreeMap::new()
        } else {
            serde_wasm_bindgen::from_value(inputs).map_err(js_err)?
        };

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        enum Prepared<'a> {
            Request(&'a crate::remote::EvaluateRequest),
            Message(&'a crate::session::CalcMessage),
        }

        match self.session.evaluation_request(&raw) {
            Ok(request) => to_js(&Prepared::Request(&request)),
            Err(message) => to_js(&Prepared::Message(&message)),
        }
    }

    #[wasm_bindgen(js_name = "beginEvaluation")]
    pub fn begin_evaluation(&mut self) -> u32 {
        ticket_id(self.session.begin_evaluation())
    }

    /// Apply a `calculate` response. Returns `{ text, isError }`, or `null`
    /// if a newer evaluation has been started since.
    #[wasm_bindgen(js_name = "finishEvaluation")]
    pub fn finish_evaluation(&mut self, id: u32, status: u16, body: &str) -> std::result::Result<JsValue, JsValue> {
        let result = received(status, body, decode_response);
        to_js(&self.session.finish_evaluation(ticket(id), result))
    }

    #[wasm_bindgen(js_name = "lastResult")]
    pub fn last_result(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.session.last_result())
    }
}
