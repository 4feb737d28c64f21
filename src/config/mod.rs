//! Configuration types for the Shopify Admin SDK.
//!
//! # Overview
//!
//! - [`ShopifyConfig`]: Everything a client needs to reach one shop
//! - [`ShopifyConfigBuilder`]: A builder for constructing [`ShopifyConfig`] instances
//! - [`AccessToken`]: A validated Admin API token with masked debug output
//! - [`ShopDomain`]: A validated Shopify shop domain
//! - [`HostUrl`]: A validated base URL override
//! - [`ApiVersion`]: The Shopify API version to use
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::{AccessToken, ApiVersion, ShopDomain, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_123").unwrap())
//!     .api_version(ApiVersion::V2025_07)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop().as_ref(), "my-store.myshopify.com");
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, HostUrl, ShopDomain};
pub use version::ApiVersion;

use crate::error::ConfigError;
use crate::provisioning::StatusSync;

/// Configuration for one shop.
///
/// Immutable after construction and safe to share between clients and
/// tasks.
#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    shop: ShopDomain,
    access_token: AccessToken,
    api_version: ApiVersion,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    status_sync: StatusSync,
}

impl ShopifyConfig {
    /// Creates a new builder for constructing a `ShopifyConfig`.
    #[must_use]
    pub fn builder() -> ShopifyConfigBuilder {
        ShopifyConfigBuilder::new()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the Admin API access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the base URL override, if configured.
    #[must_use]
    pub const fn api_host(&self) -> Option<&HostUrl> {
        self.api_host.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns where order status syncs are written.
    #[must_use]
    pub const fn status_sync(&self) -> &StatusSync {
        &self.status_sync
    }
}

// Verify ShopifyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopifyConfig>();
};

/// Builder for constructing [`ShopifyConfig`] instances.
///
/// `shop` and `access_token` are required.
///
/// # Defaults
///
/// - `api_version`: Latest stable version
/// - `api_host`: `None` (requests go to `https://<shop>`)
/// - `user_agent_prefix`: `None`
/// - `status_sync`: namespace `sync`, key `status`
#[derive(Debug, Default)]
pub struct ShopifyConfigBuilder {
    shop: Option<ShopDomain>,
    access_token: Option<AccessToken>,
    api_version: Option<ApiVersion>,
    api_host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
    status_sync: Option<StatusSync>,
}

impl ShopifyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the Admin API access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Routes every request through `host` instead of `https://<shop>`.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Overrides the metafield used by the order status side-channel.
    #[must_use]
    pub fn status_sync(mut self, status_sync: StatusSync) -> Self {
        self.status_sync = Some(status_sync);
        self
    }

    /// Builds the [`ShopifyConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop` or
    /// `access_token` are not set.
    pub fn build(self) -> Result<ShopifyConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;
        let access_token = self
            .access_token
            .ok_or(ConfigError::MissingRequiredField {
                field: "access_token",
            })?;
        let api_version = self.api_version.unwrap_or_else(ApiVersion::latest);

        if api_version.is_deprecated() {
            tracing::warn!(
                "API version {} is older than {}; provisioning mutations may be rejected",
                api_version,
                ApiVersion::minimum_supported()
            );
        }

        Ok(ShopifyConfig {
            shop,
            access_token,
            api_version,
            api_host: self.api_host,
            user_agent_prefix: self.user_agent_prefix,
            status_sync: self.status_sync.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_shop() {
        let result = ShopifyConfigBuilder::new()
            .access_token(AccessToken::new("token").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "shop" })
        ));
    }

    #[test]
    fn test_builder_requires_access_token() {
        let result = ShopifyConfigBuilder::new()
            .shop(ShopDomain::new("my-store").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "access_token"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ShopifyConfig::builder()
            .shop(ShopDomain::new("my-store").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert!(config.api_host().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.status_sync(), &StatusSync::default());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let host = HostUrl::new("http://127.0.0.1:9000").unwrap();

        let config = ShopifyConfig::builder()
            .shop(ShopDomain::new("my-store").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .api_version(ApiVersion::V2025_01)
            .api_host(host.clone())
            .user_agent_prefix("MyApp/1.0")
            .status_sync(StatusSync::new("erp", "last_sync"))
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::V2025_01);
        assert_eq!(config.api_host(), Some(&host));
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.status_sync().namespace(), "erp");
        assert_eq!(config.status_sync().key(), "last_sync");
    }

    #[test]
    fn test_config_debug_does_not_leak_token() {
        let config = ShopifyConfig::builder()
            .shop(ShopDomain::new("my-store").unwrap())
            .access_token(AccessToken::new("shpat_secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("ShopifyConfig"));
        assert!(!debug_str.contains("shpat_secret"));
    }
}
