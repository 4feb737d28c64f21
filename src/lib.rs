//! # Shopify Admin SDK
//!
//! A Rust SDK for provisioning Shopify Admin resources: type-safe
//! configuration, REST and GraphQL transports, and workflows that build
//! composite resources out of several dependent API calls.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ShopifyConfig`] and [`ShopifyConfigBuilder`]
//! - Validated newtypes for credentials and domain values
//! - Global id normalization via [`gid`]
//! - Declarative document validation via [`validation`]
//! - Translation between REST-shaped documents and GraphQL inputs via [`translate`]
//! - Product, variant, order and metafield workflows via [`Provisioner`]
//! - REST passthrough resources via [`rest::RestResource`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_admin::{AccessToken, ApiVersion, ShopDomain, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_123").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Provisioning a Product
//!
//! Creating a product with options, images and variants takes four calls.
//! [`Provisioner::create_product`] issues them in order and returns a
//! [`ProvisioningResult`] describing how each step went:
//!
//! ```rust,ignore
//! use shopify_admin::model::{Product, ProductImage, ProductOption, ProductVariant};
//! use shopify_admin::provisioning::Step;
//! use shopify_admin::Provisioner;
//!
//! let provisioner = Provisioner::new(&config);
//!
//! let mut small = ProductVariant::default();
//! small.sku = Some("TEE-S".to_string());
//! small.price = Some("19.99".to_string());
//! small.option1 = Some("S".to_string());
//!
//! let product = Product {
//!     title: Some("Tee".to_string()),
//!     options: vec![ProductOption::new("Size", ["S"])],
//!     images: vec![ProductImage::new("https://cdn.example.com/tee-s.png", "TEE-S")],
//!     variants: vec![small],
//!     ..Default::default()
//! };
//!
//! let result = provisioner.create_product(&product).await?;
//! for step in Step::ALL {
//!     println!("{step}: {}", result.outcome(step));
//! }
//! ```
//!
//! ## Orders
//!
//! ```rust,ignore
//! use shopify_admin::model::{CancelRequest, OrderCancelReason};
//!
//! // Bare numeric ids are normalized to global ids.
//! let noted = provisioner.add_order_note("450789469", "Gift wrap").await?;
//! println!("status synced: {}", noted.status_synced);
//!
//! let job = provisioner
//!     .cancel_order(&CancelRequest::new("450789469", OrderCancelReason::Customer).restock(true))
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and documents are checked before any request
//! - **Thread-safe**: All clients are `Send + Sync`
//! - **Sequential workflows**: Each call is awaited before the next is issued

pub mod clients;
pub mod config;
pub mod error;
pub mod gid;
pub mod model;
pub mod provisioning;
pub mod rest;
pub mod translate;
pub mod validation;

// Re-export public types at crate root for convenience
pub use config::{
    AccessToken, ApiVersion, HostUrl, ShopDomain, ShopifyConfig, ShopifyConfigBuilder,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, GraphqlClient, GraphqlError, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, HttpResponseError, InvalidHttpRequestError, RestClient,
    RestError, UserError,
};

// Re-export the provisioning entry points
pub use gid::{GlobalId, IdError, ResourceKind};
pub use provisioning::{Provisioner, ProvisioningError, ProvisioningResult, StatusSync};
pub use validation::{SchemaName, ValidationError};
