use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::request::RequestInit;

static HEADER_VALUE_SPECIALS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\\|")"#).expect("valid regex"));

/// Rendered `-H` clauses plus whether `Accept-Encoding` was present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderParams {
    pub params: String,
    pub is_encode: bool,
}

pub fn generate_header(init: Option<&RequestInit>) -> HeaderParams {
    let Some(headers) = init.and_then(|init| init.headers.as_ref()) else {
        return HeaderParams::default();
    };

    let mut result = HeaderParams::default();
    for (name, value) in headers.iter() {
        if name.eq_ignore_ascii_case("content-length") {
            trace!(name, "skipping content-length header");
        } else {
            push_header(&mut result.params, name, value);
        }
        if name.eq_ignore_ascii_case("accept-encoding") {
            result.is_encode = true;
        }
    }
    result
}

fn push_header(params: &mut String, name: &str, value: &str) {
    let escaped = HEADER_VALUE_SPECIALS.replace_all(value, r"\${1}");
    params.push_str(&format!(r#" -H "{name}: {escaped}""#));
}
