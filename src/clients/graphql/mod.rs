//! GraphQL API client for the Shopify Admin API.
//!
//! - [`GraphqlClient`]: Executes documents and returns the unwrapped `data`
//! - [`GraphqlError`]: Transport, envelope, and decoding failures
//! - [`UserError`]: A mutation-level `userErrors` entry
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin::clients::GraphqlClient;
//!
//! let client = GraphqlClient::new(&config);
//! let data = client.query("query { shop { name } }", None, None).await?;
//! println!("Shop name: {}", data["shop"]["name"]);
//! ```

mod client;
mod errors;

pub use client::GraphqlClient;
pub use errors::{format_user_errors, GraphqlError, GraphqlResponseError, UserError};
