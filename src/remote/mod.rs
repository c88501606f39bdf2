//! Boundary to the remote calculation service.
//!
//! The service is opaque: this module only knows the endpoints, the JSON
//! shapes and how failures are reported (`{"error": "..."}` with a non-2xx
//! status). Transports implement [`CalcService`]; all of them decode
//! responses through [`decode_response`].

#[cfg(not(target_arch = "wasm32"))]
mod http;
mod protocol;

#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpService;
pub use protocol::*;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Result, TabviewError};
use crate::types::SheetData;

pub const CALCULATE_CAPACITY_PATH: &str = "/api/calculate-capacity";
pub const LOAD_WORKBOOK_PATH: &str = "/api/load-excel";
pub const CALCULATE_PATH: &str = "/api/calculate";
const SHEET_PATH_PREFIX: &str = "/api/sheet/";

/// Characters left alone by a URI component encoder.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Request path for one sheet, with the name percent-encoded.
pub fn sheet_path(name: &str) -> String {
    format!("{SHEET_PATH_PREFIX}{}", utf8_percent_encode(name, COMPONENT))
}

/// Operations the view layer needs from the service.
pub trait CalcService {
    fn calculate_capacity(&self, request: &CapacityRequest) -> Result<CapacityResponse>;

    /// Open the service-side workbook and list its sheet names.
    fn list_sheets(&self) -> Result<Vec<String>>;

    fn load_sheet(&self, name: &str) -> Result<SheetData>;

    fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse>;
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Decode a response body, mapping non-success statuses to
/// [`TabviewError::Remote`] with the payload's `error` text.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if (200..300).contains(&status) {
        return Ok(serde_json::from_str(body)?);
    }
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| format!("Request failed with status {status}"));
    log::warn!("remote: status {status}: {message}");
    Err(TabviewError::Remote { status, message })
}

/// Decode a sheet payload and stamp it with the requested name.
pub fn decode_sheet(name: &str, status: u16, body: &str) -> Result<SheetData> {
    let mut sheet: SheetData = decode_response(status, body)?;
    sheet.name = name.to_string();
    Ok(sheet)
}
