//! Product detail pieces: price block and the option/add-to-cart form.

use askama::Template;
use prier_core::DeferredState;
use prier_core::variant::{OptionGroup, QueryParams, option_groups};

use super::cart::CartAction;
use crate::deferred::FetchFailed;
use crate::shopify::types::{CartLineInput, Product, ProductVariant};

/// Price of the selected variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPriceView {
    pub price: Option<String>,
    /// Struck-through compare-at price, only when on sale.
    pub compare_at_price: Option<String>,
}

impl ProductPriceView {
    #[must_use]
    pub fn new(selected_variant: Option<&ProductVariant>) -> Self {
        let Some(variant) = selected_variant else {
            return Self {
                price: None,
                compare_at_price: None,
            };
        };

        Self {
            price: Some(variant.price.format()),
            compare_at_price: variant
                .compare_at_price
                .as_ref()
                .filter(|_| variant.is_on_sale())
                .map(prier_core::Money::format),
        }
    }
}

/// Option selector plus add-to-cart button.
#[derive(Debug, Clone)]
pub struct ProductFormView {
    pub groups: Vec<OptionGroup>,
    /// `None` when nothing purchasable is selected.
    pub add_to_cart: Option<CartAction>,
    pub return_to: String,
    /// The full variant list failed to load.
    pub failed: bool,
}

impl ProductFormView {
    /// Build the form for one state of the full variant list.
    ///
    /// While the list is pending every option value is shown as available.
    #[must_use]
    pub fn new(
        product: &Product,
        variants: DeferredState<&[ProductVariant], &FetchFailed>,
        query: &QueryParams,
        return_to: &str,
    ) -> Self {
        let selected = product.selected_variant.as_ref();

        let variants = match variants {
            DeferredState::Failed(_) => {
                return Self {
                    groups: Vec::new(),
                    add_to_cart: None,
                    return_to: return_to.to_string(),
                    failed: true,
                };
            }
            DeferredState::Pending => None,
            DeferredState::Resolved(variants) => Some(variants),
        };

        Self {
            groups: option_groups(&product.handle, &product.options, selected, variants, query),
            add_to_cart: selected
                .filter(|variant| variant.available_for_sale)
                .map(|variant| CartAction::LinesAdd {
                    lines: vec![CartLineInput {
                        merchandise_id: variant.id.clone(),
                        quantity: 1,
                    }],
                }),
            return_to: return_to.to_string(),
            failed: false,
        }
    }
}

#[derive(Template)]
#[template(path = "components/product_form.html")]
pub struct ProductFormTemplate<'a> {
    pub form: &'a ProductFormView,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use prier_core::{Money, ProductId, ProductOption, SelectedOption, VariantId};
    use rust_decimal::Decimal;

    use super::*;

    fn variant(id: u32, color: &str, size: &str, available: bool) -> ProductVariant {
        ProductVariant {
            id: VariantId::new(format!("gid://shopify/ProductVariant/{id}")),
            title: format!("{color} / {size}"),
            available_for_sale: available,
            price: Money::new(Decimal::new(2000, 2), "USD"),
            compare_at_price: Some(Money::new(Decimal::new(2500, 2), "USD")),
            selected_options: vec![
                SelectedOption::new("Color", color),
                SelectedOption::new("Size", size),
            ],
            image: None,
            sku: None,
            product_handle: "test-shirt".to_string(),
            product_title: "Test Shirt".to_string(),
        }
    }

    fn product(selected: Option<ProductVariant>) -> Product {
        let variants = vec![variant(1, "Red", "M", true), variant(2, "Red", "L", false)];
        Product {
            id: ProductId::new("gid://shopify/Product/1"),
            handle: "test-shirt".to_string(),
            title: "Test Shirt".to_string(),
            vendor: "Prier".to_string(),
            description: String::new(),
            description_html: String::new(),
            options: vec![
                ProductOption {
                    name: "Color".to_string(),
                    values: vec!["Red".to_string()],
                },
                ProductOption {
                    name: "Size".to_string(),
                    values: vec!["M".to_string(), "L".to_string()],
                },
            ],
            selected_variant: selected,
            variants,
            seo_title: None,
            seo_description: None,
        }
    }

    #[test]
    fn test_price_on_sale() {
        let v = variant(1, "Red", "M", true);
        let price = ProductPriceView::new(Some(&v));
        assert_eq!(price.price.as_deref(), Some("$20.00"));
        assert_eq!(price.compare_at_price.as_deref(), Some("$25.00"));
    }

    #[test]
    fn test_pending_variants_all_available() {
        let product = product(Some(variant(1, "Red", "M", true)));
        let query = QueryParams::parse("Color=Red&Size=M");
        let form = ProductFormView::new(&product, DeferredState::Pending, &query, "/");

        assert_eq!(form.groups.len(), 1);
        assert!(form.groups[0].values.iter().all(|v| v.is_available));
        assert!(form.add_to_cart.is_some());
    }

    #[test]
    fn test_resolved_variants_mark_sold_out() {
        let product = product(Some(variant(1, "Red", "M", true)));
        let all = product.variants.clone();
        let query = QueryParams::parse("Color=Red&Size=M");
        let form = ProductFormView::new(
            &product,
            DeferredState::Resolved(all.as_slice()),
            &query,
            "/",
        );

        let large = form.groups[0]
            .values
            .iter()
            .find(|v| v.value == "L")
            .unwrap();
        assert!(!large.is_available);
        assert_eq!(large.to, "/products/test-shirt?Color=Red&Size=L");
    }

    #[test]
    fn test_sold_out_variant_cannot_be_added() {
        let product = product(Some(variant(2, "Red", "L", false)));
        let form = ProductFormView::new(
            &product,
            DeferredState::Pending,
            &QueryParams::default(),
            "/",
        );
        assert!(form.add_to_cart.is_none());

        let html = ProductFormTemplate { form: &form }.render().unwrap();
        assert!(html.contains("Sold out"));
    }

    #[test]
    fn test_failed_variants_render_message() {
        let product = product(None);
        let form = ProductFormView::new(
            &product,
            DeferredState::Failed(&FetchFailed),
            &QueryParams::default(),
            "/",
        );
        let html = ProductFormTemplate { form: &form }.render().unwrap();
        assert!(html.contains("There was a problem loading product variants"));
    }
}
