//! Fragment encoders for each part of a curl command.
//!
//! Every fragment starts with its own separating space, or is empty when the
//! corresponding input is absent, so fragments concatenate directly.

mod body;
mod compress;
mod headers;
mod method;

pub use body::{escape_body, generate_body};
pub use compress::generate_compress;
pub use headers::{generate_header, HeaderParams};
pub use method::generate_method;
