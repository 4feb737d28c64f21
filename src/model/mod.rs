//! REST-shaped documents.
//!
//! These are the types callers build and receive: flat snake_case fields
//! and numeric ids, matching the Admin REST API. The [`translate`](crate::translate)
//! module converts them to and from the GraphQL shapes.

mod metafield;
mod order;
mod product;
mod transaction;

pub use metafield::{Metafield, MetafieldOwner};
pub use order::{
    Address, CancelRequest, FulfillmentRequest, LineItem, Order, OrderCancelReason, TrackingInfo,
};
pub use product::{
    canonical_tags, InventoryPolicy, Product, ProductImage, ProductOption, ProductStatus, ProductVariant,
    WeightUnit,
};
pub use transaction::{Transaction, TransactionKind};
