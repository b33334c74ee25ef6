use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Headers, Request, RequestInit, Response, Window};

/// Look up an element by id and cast it to the expected type.
pub fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has an unexpected type")))
}

/// Like [`element`], for controls the template only renders for signed-in
/// users.
pub fn optional_element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Readable text of a thrown JS value.
pub fn js_error_text(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{err:?}")
}

pub fn alert(window: &Window, message: &str) {
    if window.alert_with_message(message).is_err() {
        log::error!("{message}");
    }
}

/// Encode a value for use as one path segment of an endpoint URL.
pub fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// GET a text resource.
pub async fn fetch_text(window: &Window, url: &str) -> Result<String, JsValue> {
    let resp_value = JsFuture::from(window.fetch_with_str(url)).await?;
    response_text(resp_value).await
}

/// POST `body` as JSON and return the response text.
pub async fn post_json<T: Serialize + ?Sized>(
    window: &Window,
    url: &str,
    body: &T,
) -> Result<String, JsValue> {
    let body = serde_json::to_string(body).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));
    let request = Request::new_with_str_and_init(url, &init)?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    response_text(resp_value).await
}

async fn response_text(resp_value: JsValue) -> Result<String, JsValue> {
    let resp: Response = resp_value.dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "Network response was not ok: {} ({})",
            resp.status_text(),
            resp.status()
        )));
    }
    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}
