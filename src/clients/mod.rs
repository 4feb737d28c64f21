//! HTTP transport for the Shopify Admin API.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client holding base URL and auth headers
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`DataType`]: Content types for request bodies
//! - [`rest::RestClient`]: REST passthrough with path normalization
//! - [`graphql::GraphqlClient`]: GraphQL client returning unwrapped `data`
//!
//! Requests are attempted exactly once. Throttling and server errors are
//! reported to the caller as [`HttpError::Response`].

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

pub use rest::{RestClient, RestError};

pub use graphql::{GraphqlClient, GraphqlError, UserError};
