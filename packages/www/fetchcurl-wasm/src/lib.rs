use fetchcurl::web::{convert, RequestInfo};
use fetchcurl::RequestInit;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = fetchToCurl)]
pub fn fetch_to_curl(input: JsValue, init: JsValue) -> Result<String, JsValue> {
    let info: RequestInfo = from_value(input)
        .map_err(|err| JsValue::from_str(&format!("Invalid request input: {err}")))?;

    let init: Option<RequestInit> = if init.is_undefined() || init.is_null() {
        None
    } else {
        Some(
            from_value(init)
                .map_err(|err| JsValue::from_str(&format!("Invalid request options: {err}")))?,
        )
    };

    Ok(convert(&info, init.as_ref()))
}
