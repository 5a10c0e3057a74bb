//! Domain types for Storefront API data.
//!
//! These are the shapes route handlers and templates work with. Wire types
//! in `storefront::responses` are converted into these at the client edge.

use prier_core::cart::DiscountCode;
use prier_core::variant::VariantOptions;
use prier_core::{
    CartId, CartLineId, CollectionId, Money, ProductId, ProductOption, SelectedOption, VariantId,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Common Types
// =============================================================================

/// An image hosted on the commerce CDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub id: Option<String>,
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// Relay-style pagination info.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

// =============================================================================
// Product Types
// =============================================================================

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVariant {
    pub id: VariantId,
    pub title: String,
    pub available_for_sale: bool,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub selected_options: Vec<SelectedOption>,
    pub image: Option<Image>,
    pub sku: Option<String>,
    /// Handle of the owning product, used to build variant URLs.
    pub product_handle: String,
    pub product_title: String,
}

impl ProductVariant {
    /// Whether the variant is discounted against its compare-at price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price
            .as_ref()
            .is_some_and(|compare_at| compare_at.amount > self.price.amount)
    }
}

impl VariantOptions for ProductVariant {
    fn selected_options(&self) -> &[SelectedOption] {
        &self.selected_options
    }

    fn available_for_sale(&self) -> bool {
        self.available_for_sale
    }
}

/// Full product detail for the product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub handle: String,
    pub title: String,
    pub vendor: String,
    pub description: String,
    pub description_html: String,
    pub options: Vec<ProductOption>,
    /// First page of variants, loaded with the product.
    pub variants: Vec<ProductVariant>,
    /// Variant the API matched to the requested options.
    pub selected_variant: Option<ProductVariant>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

/// Product data needed for a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub id: ProductId,
    pub handle: String,
    pub title: String,
    pub featured_image: Option<Image>,
    pub min_price: Money,
    pub compare_at_min_price: Option<Money>,
    /// Options of the first variant, so cards can link straight to it.
    pub first_variant_options: Vec<SelectedOption>,
}

// =============================================================================
// Collection Types
// =============================================================================

/// Collection without its products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub id: CollectionId,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub image: Option<Image>,
}

/// A collection with one page of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: CollectionId,
    pub handle: String,
    pub title: String,
    pub description: String,
    pub image: Option<Image>,
    pub products: Vec<ProductSummary>,
    pub page_info: PageInfo,
}

/// Which page of a product connection to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// `first` items after `after` (or from the start).
    Forward { first: i64, after: Option<String> },
    /// `last` items before `before`.
    Backward { last: i64, before: String },
}

impl PageRequest {
    /// First page of `size` items.
    #[must_use]
    pub const fn first(size: i64) -> Self {
        Self::Forward {
            first: size,
            after: None,
        }
    }
}

// =============================================================================
// Layout Types
// =============================================================================

/// Shop name and navigation for the page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderData {
    pub shop_name: String,
    /// Primary domain URL (e.g., `https://shop.example.com`).
    pub primary_domain_url: String,
    pub menu: Option<Menu>,
}

/// A navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub id: String,
    pub items: Vec<MenuItem>,
}

/// A navigation menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub items: Vec<MenuItem>,
}

// =============================================================================
// Cart Types
// =============================================================================

/// A cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub id: CartId,
    pub checkout_url: String,
    pub total_quantity: u32,
    pub lines: Vec<CartLine>,
    pub cost: CartCost,
    pub discount_codes: Vec<DiscountCode>,
}

/// Cart totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartCost {
    pub subtotal_amount: Option<Money>,
    pub total_amount: Option<Money>,
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub id: CartLineId,
    pub quantity: u32,
    pub merchandise: CartMerchandise,
    pub cost: CartLineCost,
}

/// The variant a cart line holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartMerchandise {
    pub id: VariantId,
    pub title: String,
    pub product_handle: String,
    pub product_title: String,
    pub selected_options: Vec<SelectedOption>,
    pub image: Option<Image>,
}

/// Cost of a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineCost {
    pub amount_per_quantity: Money,
    pub total_amount: Money,
    pub compare_at_amount_per_quantity: Option<Money>,
}

/// Input for adding a line to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub merchandise_id: VariantId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Input for changing a cart line's quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineUpdateInput {
    pub id: CartLineId,
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// A user-facing error returned by a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartUserError {
    pub code: Option<String>,
    pub field: Vec<String>,
    pub message: String,
}
