//! REST API client for the Shopify Admin API.
//!
//! - [`RestClient`]: `get`/`post`/`put`/`delete` with path normalization
//! - [`RestError`]: Error type for REST API operations

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
