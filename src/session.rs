//! Session state for the two host screens: the capacity table and the sheet
//! viewer/calculator.
//!
//! Remote calls may overlap. Every request takes a [`LoadTicket`] from a
//! [`LoadGate`]; only a response carrying the most recent ticket is applied.
//! Anything older is dropped as [`LoadOutcome::Stale`]. A failed request
//! leaves whatever was loaded before untouched.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ViewConfig;
use crate::error::{Result, TabviewError};
use crate::export::{export_csv, ExportFile, ExportSink};
use crate::references::{build_reference_set, InputForm, ReferenceSet};
use crate::remote::{
    CalcService, CapacityRequest, CapacityResponse, CapacitySummary, EvaluateRequest,
    EvaluateResponse,
};
use crate::render::{
    render_formulas, render_grid, render_sections, FormulaPanel, GridView, SectionsView, SheetInfo,
};
use crate::table::TableController;
use crate::types::SheetData;

pub const NO_FORMULAS_TO_EVALUATE: &str = "No formulas available for calculation";

/// Identifies one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    /// Rebuild a ticket handed out earlier (e.g. round-tripped through JS).
    pub fn from_id(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Monotonic ticket dispenser; the newest ticket wins.
#[derive(Debug, Default, Clone)]
pub struct LoadGate {
    latest: u64,
}

impl LoadGate {
    pub fn issue(&mut self) -> LoadTicket {
        self.latest = self.latest.wrapping_add(1);
        LoadTicket(self.latest)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// What happened to a response handed back to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "camelCase")]
pub enum LoadOutcome {
    Applied,
    /// A newer request was issued after this one.
    Stale,
    /// No request was made (e.g. an empty sheet name).
    Ignored,
    /// The request failed; prior state is kept.
    Failed(String),
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Tracks one request stream's gate and state.
#[derive(Debug, Clone)]
struct Loader {
    /// Log target.
    what: &'static str,
    /// Put in front of transport and decode failures.
    failure_prefix: &'static str,
    gate: LoadGate,
    state: LoadState,
}

impl Loader {
    fn new(what: &'static str, failure_prefix: &'static str) -> Self {
        Self {
            what,
            failure_prefix,
            gate: LoadGate::default(),
            state: LoadState::Idle,
        }
    }

    fn begin(&mut self) -> LoadTicket {
        self.state = LoadState::Loading;
        self.gate.issue()
    }

    fn state(&self) -> LoadState {
        self.state.clone()
    }

    /// Apply `result` through `apply` if `ticket` is still the newest.
    fn finish<T>(&mut self, ticket: LoadTicket, result: Result<T>, apply: impl FnOnce(T)) -> LoadOutcome {
        let what = self.what;
        if !self.gate.is_current(ticket) {
            log::debug!("{what}: dropping stale response #{}", ticket.id());
            return LoadOutcome::Stale;
        }
        match result {
            Ok(value) => {
                apply(value);
                self.state = LoadState::Ready;
                log::info!("{what}: response #{} applied", ticket.id());
                LoadOutcome::Applied
            }
            Err(e) => {
                let message = failure_message(self.failure_prefix, &e);
                log::warn!("{what}: {message}");
                self.state = LoadState::Failed(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }
}

/// Service errors are shown as sent; anything else gets `prefix` in front.
fn failure_message(prefix: &str, err: &TabviewError) -> String {
    if err.is_remote() {
        err.user_message()
    } else {
        format!("{prefix}: {err}")
    }
}

// ============================================================================
// Capacity table
// ============================================================================

/// Capacity results screen: summary panel plus the paginated curve table.
#[derive(Debug, Clone)]
pub struct CapacitySession {
    config: ViewConfig,
    table: TableController,
    summary: Option<CapacitySummary>,
    loader: Loader,
}

impl CapacitySession {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            table: TableController::new(&config),
            config,
            summary: None,
            loader: Loader::new("capacity", "Calculation failed"),
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loader.begin()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<CapacityResponse>) -> LoadOutcome {
        let table = &mut self.table;
        let summary = &mut self.summary;
        self.loader.finish(ticket, result, |resp| {
            table.load(resp.dataset());
            *summary = Some(resp.summary());
        })
    }

    /// Blocking round trip through `service`.
    pub fn load_with(&mut self, service: &dyn CalcService, request: &CapacityRequest) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = service.calculate_capacity(request);
        self.finish_load(ticket, result)
    }

    pub fn state(&self) -> LoadState {
        self.loader.state()
    }

    pub fn table(&self) -> &TableController {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableController {
        &mut self.table
    }

    pub fn summary(&self) -> Option<&CapacitySummary> {
        self.summary.as_ref()
    }

    pub fn export_file_name(&self) -> &str {
        &self.config.export_file_name
    }

    pub fn export(&self) -> ExportFile {
        export_csv(&self.table, &self.config.export_file_name)
    }

    pub fn export_to(&self, sink: &mut dyn ExportSink) -> Result<()> {
        sink.accept(self.export())
    }
}

// ============================================================================
// Sheet viewer / calculator
// ============================================================================

/// Message for the calculator result area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcMessage {
    pub text: String,
    pub is_error: bool,
}

impl CalcMessage {
    fn ok(text: String) -> Self {
        Self { text, is_error: false }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Sheet list, the active sheet and the calculator built from its formulas.
#[derive(Debug, Clone)]
pub struct SheetSession {
    config: ViewConfig,
    sheets: Vec<String>,
    sheet: Option<SheetData>,
    references: ReferenceSet,
    sheet_loader: Loader,
    list_loader: Loader,
    eval_gate: LoadGate,
    last_result: Option<CalcMessage>,
}

impl SheetSession {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            sheets: Vec::new(),
            sheet: None,
            references: ReferenceSet::default(),
            sheet_loader: Loader::new("sheet", "Error loading sheet"),
            list_loader: Loader::new("sheet list", "Error loading Excel file"),
            eval_gate: LoadGate::default(),
            last_result: None,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    // -- sheet list --

    pub fn begin_sheet_list(&mut self) -> LoadTicket {
        self.list_loader.begin()
    }

    pub fn finish_sheet_list(&mut self, ticket: LoadTicket, result: Result<Vec<String>>) -> LoadOutcome {
        let sheets = &mut self.sheets;
        self.list_loader.finish(ticket, result, |names| *sheets = names)
    }

    pub fn sheets(&self) -> &[String] {
        &self.sheets
    }

    // -- sheet --

    pub fn begin_sheet(&mut self) -> LoadTicket {
        self.sheet_loader.begin()
    }

    /// Replace the active sheet and rebuild the reference set.
    pub fn finish_sheet(&mut self, ticket: LoadTicket, result: Result<SheetData>) -> LoadOutcome {
        let limit = self.config.max_reference_inputs;
        let sheet = &mut self.sheet;
        let references = &mut self.references;
        let last_result = &mut self.last_result;
        self.sheet_loader.finish(ticket, result, |data| {
            *references = build_reference_set(&data.formulas, limit);
            *sheet = Some(data);
            *last_result = None;
        })
    }

    /// Blocking load through `service`. An empty name is ignored.
    pub fn load_sheet_with(&mut self, service: &dyn CalcService, name: &str) -> LoadOutcome {
        if name.is_empty() {
            return LoadOutcome::Ignored;
        }
        let ticket = self.begin_sheet();
        let result = service.load_sheet(name);
        self.finish_sheet(ticket, result)
    }

    pub fn list_sheets_with(&mut self, service: &dyn CalcService) -> LoadOutcome {
        let ticket = self.begin_sheet_list();
        let result = service.list_sheets();
        self.finish_sheet_list(ticket, result)
    }

    pub fn state(&self) -> LoadState {
        self.sheet_loader.state()
    }

    pub fn sheet(&self) -> Option<&SheetData> {
        self.sheet.as_ref()
    }

    pub fn info(&self) -> Option<SheetInfo> {
        self.sheet
            .as_ref()
            .map(|s| SheetInfo::new(&s.name, &s.structure))
    }

    pub fn grid(&self) -> GridView {
        let empty = Vec::new();
        let rows = self.sheet.as_ref().map_or(&empty, |s| &s.rows);
        render_grid(rows, self.config.grid_max_rows)
    }

    pub fn sections(&self) -> SectionsView {
        let sections = self
            .sheet
            .as_ref()
            .map_or(&[][..], |s| s.structure.sections.as_slice());
        render_sections(sections, self.config.section_preview_cells)
    }

    pub fn formulas(&self) -> FormulaPanel {
        match &self.sheet {
            Some(s) => render_formulas(&s.formulas),
            None => render_formulas(&Default::default()),
        }
    }

    // -- calculator --

    pub fn references(&self) -> &ReferenceSet {
        &self.references
    }

    pub fn input_form(&self) -> InputForm {
        self.references.input_form()
    }

    /// Request for the first formula with every reference substituted from
    /// `raw_inputs` (reference -> text as typed). Unparseable or missing
    /// inputs become 0.
    pub fn evaluation_request(
        &self,
        raw_inputs: &BTreeMap<String, String>,
    ) -> std::result::Result<EvaluateRequest, CalcMessage> {
        let first = self
            .sheet
            .as_ref()
            .and_then(|s| s.formulas.first())
            .ok_or_else(|| CalcMessage::error(NO_FORMULAS_TO_EVALUATE))?;
        Ok(EvaluateRequest {
            formula: first.formula_text.clone(),
            inputs: self
                .references
                .substitutions(|r| raw_inputs.get(r).map(String::as_str)),
        })
    }

    pub fn begin_evaluation(&mut self) -> LoadTicket {
        self.eval_gate.issue()
    }

    /// Record an evaluation result. Returns `None` for a superseded request.
    pub fn finish_evaluation(
        &mut self,
        ticket: LoadTicket,
        result: Result<EvaluateResponse>,
    ) -> Option<&CalcMessage> {
        if !self.eval_gate.is_current(ticket) {
            log::debug!("calculate: dropping stale response #{}", ticket.id());
            return None;
        }
        let message = match result {
            Ok(resp) => CalcMessage::ok(resp.message()),
            Err(e) if e.is_remote() => CalcMessage::error(e.user_message()),
            Err(e) => CalcMessage::error(format!("Calculation error: {e}")),
        };
        self.last_result = Some(message);
        self.last_result.as_ref()
    }

    /// Blocking evaluate through `service`.
    pub fn evaluate_with(
        &mut self,
        service: &dyn CalcService,
        raw_inputs: &BTreeMap<String, String>,
    ) -> Option<&CalcMessage> {
        let request = match self.evaluation_request(raw_inputs) {
            Ok(request) => request,
            Err(message) => {
                self.last_result = Some(message);
                return self.last_result.as_ref();
            }
        };
        let ticket = self.begin_evaluation();
        let result = service.evaluate(&request);
        self.finish_evaluation(ticket, result)
    }

    pub fn last_result(&self) -> Option<&CalcMessage> {
        self.last_result.as_ref()
    }
}
