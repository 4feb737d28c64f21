//! REST passthrough resources.
//!
//! One-call operations over the Admin REST API: fetch, list, count and
//! delete through [`RestResource`], plus the order transaction endpoints on
//! [`Transaction`](crate::model::Transaction).
//!
//! Failures are reported as [`ResourceError`], which maps 404 and 422
//! responses to [`ResourceError::NotFound`] and
//! [`ResourceError::ValidationFailed`].

mod errors;
mod resource;
mod transaction;

pub use errors::ResourceError;
pub use resource::RestResource;
