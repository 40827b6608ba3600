pub mod convert;
pub mod encoder;
pub mod error;
pub mod request;

#[cfg(feature = "cli")]
pub mod config;
#[cfg(feature = "web")]
pub mod web;

pub use convert::fetch_to_curl;
pub use encoder::{
    escape_body, generate_body, generate_compress, generate_header, generate_method, HeaderParams,
};
pub use error::{Error, Result};
pub use request::{HeaderSource, Headers, Request, RequestBody, RequestInit, RequestUrl};
