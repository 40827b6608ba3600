use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::request::RequestInit;

static METHOD_FLAGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("GET", " -X GET"),
        ("POST", " -X POST"),
        ("PUT", " -X PUT"),
        ("PATCH", " -X PATCH"),
        ("DELETE", " -X DELETE"),
        ("HEAD", " -X HEAD"),
        ("OPTIONS", " -X OPTIONS"),
    ]
    .into_iter()
    .collect()
});

/// ` -X <METHOD>` for the seven supported methods, in any letter case.
///
/// Unsupported methods produce no flag rather than an error. Only ASCII
/// letters are uppercased, so `"poſt"` is unsupported rather than `POST`.
pub fn generate_method(init: &RequestInit) -> &'static str {
    let Some(method) = init.method.as_deref().filter(|m| !m.is_empty()) else {
        return "";
    };

    let upper = method.to_ascii_uppercase();
    match METHOD_FLAGS.get(upper.as_str()).copied() {
        Some(flag) => flag,
        None => {
            debug!(method, "dropping unsupported method");
            ""
        }
    }
}
