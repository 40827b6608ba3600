use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::headers::{lenient_header_source, HeaderSource};
use crate::error::Result;

/// Options accompanying a request, in the shape of a fetch `RequestInit`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestInit {
    pub method: Option<String>,
    #[serde(default, deserialize_with = "lenient_header_source")]
    pub headers: Option<HeaderSource>,
    pub body: RequestBody,
}

impl RequestInit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn headers(mut self, headers: impl Into<HeaderSource>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }
}

/// Request payload, resolved once into text or a JSON value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RequestBody {
    #[default]
    Absent,
    Text(String),
    Structured(Value),
}

impl RequestBody {
    /// Serializes `value` into a structured body.
    ///
    /// Fails with [`crate::Error::Serialize`] when `value`'s `Serialize`
    /// impl fails, e.g. a map with non-string keys.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let mut value = serde_json::to_value(value)?;
        normalize_numbers(&mut value);
        Ok(RequestBody::Structured(value))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RequestBody::Absent)
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RequestBody::Absent,
            Value::String(text) => RequestBody::Text(text),
            mut other => {
                normalize_numbers(&mut other);
                RequestBody::Structured(other)
            }
        }
    }
}

/// Largest integer a double holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Rewrites whole-valued floats as integers so `10.0` renders as `10`.
fn normalize_numbers(value: &mut Value) {
    match value {
        Value::Number(number) => {
            let whole = number
                .as_f64()
                .filter(|n| number.is_f64() && n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER);
            if let Some(whole) = whole {
                *value = Value::from(whole as i64);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_numbers),
        Value::Object(map) => map.values_mut().for_each(normalize_numbers),
        Value::Null | Value::Bool(_) | Value::String(_) => {}
    }
}

impl From<Option<Value>> for RequestBody {
    fn from(value: Option<Value>) -> Self {
        value.map(RequestBody::from).unwrap_or_default()
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

macro_rules! structured_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RequestBody {
                fn from(value: $ty) -> Self {
                    RequestBody::Structured(Value::from(value))
                }
            }
        )*
    };
}

structured_from!(i32, i64, u32, u64, bool);

/// Infinities render as `Infinity`/`-Infinity`; NaN is treated as no body.
impl From<f64> for RequestBody {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            RequestBody::Absent
        } else if value.is_infinite() {
            let text = if value.is_sign_positive() { "Infinity" } else { "-Infinity" };
            RequestBody::Text(text.to_string())
        } else {
            RequestBody::from(Value::from(value))
        }
    }
}

/// Anything a request URL can be read from.
pub trait RequestUrl {
    fn request_url(&self) -> Cow<'_, str>;
}

impl RequestUrl for str {
    fn request_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl RequestUrl for String {
    fn request_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl RequestUrl for url::Url {
    fn request_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl RequestUrl for http::Uri {
    fn request_url(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl<B> RequestUrl for http::Request<B> {
    fn request_url(&self) -> Cow<'_, str> {
        self.uri().request_url()
    }
}

impl RequestUrl for Request {
    fn request_url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.url.as_str())
    }
}

impl<T: RequestUrl + ?Sized> RequestUrl for &T {
    fn request_url(&self) -> Cow<'_, str> {
        (**self).request_url()
    }
}

/// A request value carrying its own URL and options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub url: String,
    #[serde(flatten)]
    pub init: RequestInit,
}

impl Request {
    pub fn new(url: impl Into<String>, init: RequestInit) -> Self {
        Self {
            url: url.into(),
            init,
        }
    }

    /// Renders this request with its own options.
    pub fn to_curl(&self) -> String {
        crate::convert::fetch_to_curl(self, Some(&self.init))
    }
}

impl<B> From<&http::Request<B>> for Request
where
    B: AsRef<[u8]>,
{
    fn from(request: &http::Request<B>) -> Self {
        let bytes = request.body().as_ref();
        let body = if bytes.is_empty() {
            RequestBody::Absent
        } else {
            RequestBody::Text(String::from_utf8_lossy(bytes).into_owned())
        };
        Self {
            url: request.uri().to_string(),
            init: RequestInit {
                method: Some(request.method().as_str().to_string()),
                headers: Some(HeaderSource::from(request.headers())),
                body,
            },
        }
    }
}
