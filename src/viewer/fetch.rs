//! Browser fetch transport. Hands raw `(status, body)` pairs back to JS so
//! the session objects can decode them under their own load tickets.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::error::TabviewError;

#[derive(Serialize)]
struct RawResponse {
    status: u16,
    body: String,
}

fn transport(err: JsValue) -> JsValue {
    let message = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    log::warn!("fetch failed: {message}");
    TabviewError::Transport(message).into()
}

/// Fetch `url` and resolve to `{ status, body }`.
///
/// Rejects only when no response arrives at all; HTTP error statuses
/// resolve normally so the caller can decode the error payload.
#[wasm_bindgen(js_name = "fetchJson")]
pub async fn fetch_json(method: String, url: String, body: Option<String>) -> Result<JsValue, JsValue> {
    let opts = RequestInit::new();
    opts.set_method(&method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&url, &opts).map_err(transport)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(transport)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let resp: Response = resp_value.dyn_into().map_err(transport)?;
    let text = JsFuture::from(resp.text().map_err(transport)?)
        .await
        .map_err(transport)?;

    let raw = RawResponse {
        status: resp.status(),
        body: text.as_string().unwrap_or_default(),
    };
    super::to_js(&raw)
}
