//! The operations the storefront needs from the commerce API.

use prier_core::{CartId, CartLineId, SelectedOption};

use super::ShopifyError;
use super::types::{
    Cart, CartLineInput, CartLineUpdateInput, Collection, CollectionSummary, HeaderData,
    PageRequest, Product, ProductSummary, ProductVariant,
};

/// Typed queries and cart mutations against the Storefront API.
///
/// Handlers hold this as `Arc<dyn StorefrontApi>` so tests can swap in an
/// in-memory implementation.
#[async_trait::async_trait]
pub trait StorefrontApi: Send + Sync {
    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    /// Shop name, primary domain and the menu with `menu_handle`.
    async fn header(&self, menu_handle: &str) -> Result<HeaderData, ShopifyError>;

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// The most recently updated collection, if the shop has any.
    async fn featured_collection(&self) -> Result<Option<CollectionSummary>, ShopifyError>;

    /// The `count` most recently updated products.
    async fn recommended_products(&self, count: i64) -> Result<Vec<ProductSummary>, ShopifyError>;

    /// The first `first` collections.
    async fn collections(&self, first: i64) -> Result<Vec<CollectionSummary>, ShopifyError>;

    /// A collection with one page of its products.
    ///
    /// Returns `ShopifyError::NotFound` for an unknown handle.
    async fn collection(
        &self,
        handle: &str,
        page: &PageRequest,
    ) -> Result<Collection, ShopifyError>;

    /// Product detail, with the variant matching `selected_options` if any.
    ///
    /// Entries whose name is not one of the product's options are ignored, so
    /// foreign query parameters do not prevent a match.
    ///
    /// Returns `ShopifyError::NotFound` for an unknown handle.
    async fn product(
        &self,
        handle: &str,
        selected_options: &[SelectedOption],
    ) -> Result<Product, ShopifyError>;

    /// Every variant of a product (up to 250).
    async fn product_variants(&self, handle: &str) -> Result<Vec<ProductVariant>, ShopifyError>;

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Fetch a cart. Returns `ShopifyError::NotFound` once it has expired.
    async fn cart(&self, cart_id: &CartId) -> Result<Cart, ShopifyError>;

    /// Create a cart holding `lines`.
    async fn create_cart(&self, lines: Vec<CartLineInput>) -> Result<Cart, ShopifyError>;

    async fn add_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, ShopifyError>;

    async fn update_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<Cart, ShopifyError>;

    async fn remove_lines(
        &self,
        cart_id: &CartId,
        line_ids: Vec<CartLineId>,
    ) -> Result<Cart, ShopifyError>;

    /// Replace the cart's discount codes with `codes`.
    async fn update_discount_codes(
        &self,
        cart_id: &CartId,
        codes: Vec<String>,
    ) -> Result<Cart, ShopifyError>;
}
