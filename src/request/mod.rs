mod descriptor;
mod headers;
mod model;

pub use descriptor::{parse_descriptor, parse_header_arg, read_descriptor};
pub use headers::{HeaderSource, Headers};
pub use model::{Request, RequestBody, RequestInit, RequestUrl};
