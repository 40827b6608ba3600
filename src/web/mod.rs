use std::borrow::Cow;

use serde::Deserialize;
use thiserror::Error;

use crate::convert::fetch_to_curl;
use crate::request::{parse_descriptor, RequestInit, RequestUrl};

#[derive(Debug, Error)]
pub enum WebProcessError {
    #[error("{0}")]
    Message(String),
}

pub type WebResult<T> = Result<T, WebProcessError>;

/// First argument of a fetch call as it arrives from JavaScript: either a
/// URL string or an object exposing `url`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RequestInfo {
    Url(String),
    Request { url: String },
}

impl RequestUrl for RequestInfo {
    fn request_url(&self) -> Cow<'_, str> {
        match self {
            RequestInfo::Url(url) | RequestInfo::Request { url } => Cow::Borrowed(url.as_str()),
        }
    }
}

pub fn convert(input: &RequestInfo, init: Option<&RequestInit>) -> String {
    fetch_to_curl(input, init)
}

/// JSON flavour of [`fetch_to_curl`]: `input` is a JSON string or object
/// with `url`, `init` an optional JSON options object.
pub fn convert_json(input: &str, init: Option<&str>) -> WebResult<String> {
    let info: RequestInfo = serde_json::from_str(input)
        .map_err(|err| WebProcessError::Message(format!("Invalid request input: {err}")))?;
    let init = init
        .map(serde_json::from_str::<RequestInit>)
        .transpose()
        .map_err(|err| WebProcessError::Message(format!("Invalid request options: {err}")))?;
    Ok(convert(&info, init.as_ref()))
}

/// Renders a full request description (see [`parse_descriptor`]) with its
/// own options.
pub fn convert_descriptor_json(descriptor: &str) -> WebResult<String> {
    let request =
        parse_descriptor(descriptor).map_err(|err| WebProcessError::Message(err.to_string()))?;
    if request.url.is_empty() {
        return Err(WebProcessError::Message("Missing request URL".into()));
    }
    Ok(request.to_curl())
}
