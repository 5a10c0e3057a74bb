//! Product type conversion functions.

use prier_core::{ProductId, ProductOption, VariantId};

use crate::shopify::types::{Product, ProductSummary, ProductVariant};

use super::super::responses::{ProductFields, ProductItemFields, ProductVariantFields};
use super::{convert_image, convert_money, convert_selected_options};

pub fn convert_product(product: ProductFields) -> Product {
    let (seo_title, seo_description) = product
        .seo
        .map_or((None, None), |seo| (seo.title, seo.description));

    Product {
        id: ProductId::new(product.id),
        handle: product.handle,
        title: product.title,
        vendor: product.vendor,
        description: product.description,
        description_html: product.description_html,
        options: product
            .options
            .into_iter()
            .map(|o| ProductOption {
                name: o.name,
                values: o.option_values.into_iter().map(|v| v.name).collect(),
            })
            .collect(),
        variants: product
            .variants
            .nodes
            .into_iter()
            .map(convert_variant)
            .collect(),
        selected_variant: product.selected_variant.map(convert_variant),
        seo_title,
        seo_description,
    }
}

pub fn convert_variant(variant: ProductVariantFields) -> ProductVariant {
    ProductVariant {
        id: VariantId::new(variant.id),
        title: variant.title,
        available_for_sale: variant.available_for_sale,
        price: convert_money(variant.price),
        compare_at_price: variant.compare_at_price.map(convert_money),
        selected_options: convert_selected_options(variant.selected_options),
        image: variant.image.map(convert_image),
        sku: variant.sku.filter(|sku| !sku.is_empty()),
        product_handle: variant.product.handle,
        product_title: variant.product.title,
    }
}

pub fn convert_product_item(product: ProductItemFields) -> ProductSummary {
    ProductSummary {
        id: ProductId::new(product.id),
        handle: product.handle,
        title: product.title,
        featured_image: product.featured_image.map(convert_image),
        min_price: convert_money(product.price_range.min_variant_price),
        // Shopify reports 0.0 when no variant has a compare-at price
        compare_at_min_price: product
            .compare_at_price_range
            .map(|range| convert_money(range.min_variant_price))
            .filter(|money| !money.is_zero()),
        first_variant_options: product
            .variants
            .nodes
            .into_iter()
            .next()
            .map(|v| convert_selected_options(v.selected_options))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_product_item_drops_zero_compare_at() {
        let json = serde_json::json!({
            "id": "gid://shopify/Product/1",
            "handle": "test-shirt",
            "title": "Test Shirt",
            "featuredImage": null,
            "priceRange": { "minVariantPrice": { "amount": "20.0", "currencyCode": "USD" } },
            "compareAtPriceRange": { "minVariantPrice": { "amount": "0.0", "currencyCode": "USD" } },
            "variants": { "nodes": [
                { "selectedOptions": [{ "name": "Color", "value": "Red" }] }
            ] }
        });
        let fields: ProductItemFields = serde_json::from_value(json).unwrap();
        let summary = convert_product_item(fields);

        assert_eq!(summary.min_price.format(), "$20.00");
        assert!(summary.compare_at_min_price.is_none());
        assert_eq!(summary.first_variant_options.len(), 1);
    }

    #[test]
    fn test_convert_product_options_from_option_values() {
        let json = serde_json::json!({
            "id": "gid://shopify/Product/1",
            "handle": "test-shirt",
            "title": "Test Shirt",
            "vendor": "Prier",
            "description": "Soft",
            "descriptionHtml": "<p>Soft</p>",
            "options": [
                { "name": "Size", "optionValues": [{ "name": "M" }, { "name": "L" }] }
            ],
            "selectedVariant": null,
            "variants": { "nodes": [] },
            "seo": { "title": null, "description": "A shirt" }
        });
        let fields: ProductFields = serde_json::from_value(json).unwrap();
        let product = convert_product(fields);

        assert_eq!(product.options[0].values, vec!["M", "L"]);
        assert!(product.selected_variant.is_none());
        assert_eq!(product.seo_description.as_deref(), Some("A shirt"));
    }
}
