//! Wire types shared by the Storefront API operations.
//!
//! Field names follow the GraphQL schema (camelCase). Amounts deserialize
//! straight into `Decimal`, so a malformed amount is a parse error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `{ nodes: [...] }` connection shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyFields {
    pub amount: Decimal,
    pub currency_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFields {
    pub id: Option<String>,
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedOptionFields {
    pub name: String,
    pub value: String,
}

/// `SelectedOptionInput` variable.
pub type SelectedOptionInput = SelectedOptionFields;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoFields {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

// =============================================================================
// Layout
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopFields {
    pub name: String,
    pub primary_domain: DomainFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DomainFields {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuFields {
    pub id: String,
    pub items: Vec<MenuItemFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemFields {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    #[serde(default)]
    pub items: Vec<MenuItemFields>,
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct VariantProductFields {
    pub handle: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariantFields {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub price: MoneyFields,
    pub compare_at_price: Option<MoneyFields>,
    pub selected_options: Vec<SelectedOptionFields>,
    pub image: Option<ImageFields>,
    pub sku: Option<String>,
    pub product: VariantProductFields,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionFields {
    pub name: String,
    pub option_values: Vec<OptionValueFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionValueFields {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeoFields {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub vendor: String,
    pub description: String,
    pub description_html: String,
    pub options: Vec<ProductOptionFields>,
    pub selected_variant: Option<ProductVariantFields>,
    pub variants: Nodes<ProductVariantFields>,
    pub seo: Option<SeoFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeFields {
    pub min_variant_price: MoneyFields,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOptionsFields {
    pub selected_options: Vec<SelectedOptionFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItemFields {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub featured_image: Option<ImageFields>,
    pub price_range: PriceRangeFields,
    pub compare_at_price_range: Option<PriceRangeFields>,
    pub variants: Nodes<VariantOptionsFields>,
}

// =============================================================================
// Collections
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionItemFields {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<ImageFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageFields {
    pub nodes: Vec<ProductItemFields>,
    pub page_info: PageInfoFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionFields {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<ImageFields>,
    pub products: ProductPageFields,
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartFields {
    pub id: String,
    pub checkout_url: String,
    pub total_quantity: i64,
    pub cost: CartCostFields,
    pub discount_codes: Vec<DiscountCodeFields>,
    pub lines: Nodes<CartLineFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCostFields {
    pub subtotal_amount: Option<MoneyFields>,
    pub total_amount: Option<MoneyFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscountCodeFields {
    pub code: String,
    pub applicable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartLineFields {
    pub id: String,
    pub quantity: i64,
    pub cost: CartLineCostFields,
    /// Empty object for merchandise that is not a product variant.
    pub merchandise: CartMerchandiseFields,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCostFields {
    pub amount_per_quantity: MoneyFields,
    pub total_amount: MoneyFields,
    pub compare_at_amount_per_quantity: Option<MoneyFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMerchandiseFields {
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    pub image: Option<ImageFields>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOptionFields>,
    pub product: Option<VariantProductFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartUserErrorFields {
    pub code: Option<String>,
    pub field: Option<Vec<String>>,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    pub cart: Option<CartFields>,
    pub user_errors: Vec<CartUserErrorFields>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInputFields {
    pub merchandise_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartLineUpdateFields {
    pub id: String,
    pub quantity: i64,
}
