use std::io::Read;

use super::model::Request;
use crate::error::{Error, Result};

/// Parses a JSON request description:
///
/// ```json
/// {"url": "https://example.com", "method": "POST",
///  "headers": {"Accept": "*/*"}, "body": {"ok": true}}
/// ```
///
/// `headers` may also be a list of `[name, value]` pairs. A missing `url`
/// parses as an empty string so callers can supply it separately.
pub fn parse_descriptor(input: &str) -> Result<Request> {
    serde_json::from_str(input).map_err(Error::Descriptor)
}

pub fn read_descriptor<R: Read>(reader: R) -> Result<Request> {
    serde_json::from_reader(reader).map_err(Error::Descriptor)
}

/// Splits a `Name: value` header argument.
pub fn parse_header_arg(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| Error::InvalidHeader(raw.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidHeader(raw.to_string()));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
