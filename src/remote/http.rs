//! Blocking HTTP transport for native hosts (CLI, tests against a live
//! service). No async runtime required.

use std::time::Duration;

use serde::Serialize;

use super::{
    decode_response, decode_sheet, decode_sheet_list, sheet_path, CalcService, CapacityRequest,
    CapacityResponse, EvaluateRequest, EvaluateResponse, CALCULATE_CAPACITY_PATH, CALCULATE_PATH,
    LOAD_WORKBOOK_PATH,
};
use crate::config::ServiceConfig;
use crate::error::{Result, TabviewError};
use crate::types::SheetData;

/// [`CalcService`] over `reqwest::blocking`.
#[derive(Clone)]
pub struct HttpService {
    http: reqwest::blocking::Client,
    config: ServiceConfig,
}

impl HttpService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("tabview/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TabviewError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> Result<(u16, String)> {
        let url = self.config.url(path);
        log::debug!("remote: POST {url}");
        let mut req = self.http.post(&url);
        req = match body {
            Some(body) => req.json(body),
            None => req.header("Content-Type", "application/json"),
        };
        let resp = req.send().map_err(transport)?;
        read(resp)
    }

    fn get(&self, path: &str) -> Result<(u16, String)> {
        let url = self.config.url(path);
        log::debug!("remote: GET {url}");
        let resp = self.http.get(&url).send().map_err(transport)?;
        read(resp)
    }
}

fn transport(e: reqwest::Error) -> TabviewError {
    log::warn!("remote: transport failure: {e}");
    TabviewError::Transport(e.to_string())
}

fn read(resp: reqwest::blocking::Response) -> Result<(u16, String)> {
    let status = resp.status().as_u16();
    let body = resp.text().map_err(transport)?;
    Ok((status, body))
}

impl CalcService for HttpService {
    fn calculate_capacity(&self, request: &CapacityRequest) -> Result<CapacityResponse> {
        let (status, body) = self.post_json(CALCULATE_CAPACITY_PATH, Some(request))?;
        decode_response(status, &body)
    }

    fn list_sheets(&self) -> Result<Vec<String>> {
        let (status, body) = self.post_json::<()>(LOAD_WORKBOOK_PATH, None)?;
        decode_sheet_list(status, &body)
    }

    fn load_sheet(&self, name: &str) -> Result<SheetData> {
        let (status, body) = self.get(&sheet_path(name))?;
        decode_sheet(name, status, &body)
    }

    fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse> {
        let (status, body) = self.post_json(CALCULATE_PATH, Some(request))?;
        decode_response(status, &body)
    }
}
