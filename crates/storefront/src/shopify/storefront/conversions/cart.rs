//! Cart type conversion functions.

use prier_core::cart::DiscountCode;
use prier_core::{CartId, CartLineId, VariantId};
use tracing::warn;

use crate::shopify::types::{
    Cart, CartCost, CartLine, CartLineCost, CartMerchandise, CartUserError,
};

use super::super::responses::{CartFields, CartLineFields, CartUserErrorFields};
use super::{convert_image, convert_money, convert_selected_options};

pub fn convert_cart(cart: CartFields) -> Cart {
    Cart {
        id: CartId::new(cart.id),
        checkout_url: cart.checkout_url,
        total_quantity: u32::try_from(cart.total_quantity).unwrap_or(0),
        cost: CartCost {
            subtotal_amount: cart.cost.subtotal_amount.map(convert_money),
            total_amount: cart.cost.total_amount.map(convert_money),
        },
        discount_codes: cart
            .discount_codes
            .into_iter()
            .map(|d| DiscountCode {
                code: d.code,
                applicable: d.applicable,
            })
            .collect(),
        lines: cart
            .lines
            .nodes
            .into_iter()
            .filter_map(convert_cart_line)
            .collect(),
    }
}

/// Lines whose merchandise is not a product variant are skipped.
fn convert_cart_line(line: CartLineFields) -> Option<CartLine> {
    let merchandise = line.merchandise;
    let (Some(id), Some(product)) = (merchandise.id, merchandise.product) else {
        warn!(line_id = %line.id, "Skipping cart line without variant merchandise");
        return None;
    };

    Some(CartLine {
        id: CartLineId::new(line.id),
        quantity: u32::try_from(line.quantity).unwrap_or(1),
        merchandise: CartMerchandise {
            id: VariantId::new(id),
            title: merchandise.title,
            product_handle: product.handle,
            product_title: product.title,
            selected_options: convert_selected_options(merchandise.selected_options),
            image: merchandise.image.map(convert_image),
        },
        cost: CartLineCost {
            amount_per_quantity: convert_money(line.cost.amount_per_quantity),
            total_amount: convert_money(line.cost.total_amount),
            compare_at_amount_per_quantity: line
                .cost
                .compare_at_amount_per_quantity
                .map(convert_money),
        },
    })
}

pub fn convert_user_errors(errors: Vec<CartUserErrorFields>) -> Vec<CartUserError> {
    errors
        .into_iter()
        .map(|e| CartUserError {
            code: e.code,
            field: e.field.unwrap_or_default(),
            message: e.message,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cart() {
        let json = serde_json::json!({
            "id": "gid://shopify/Cart/c1",
            "checkoutUrl": "https://shop.example.com/checkouts/c1",
            "totalQuantity": 3,
            "cost": {
                "subtotalAmount": { "amount": "60.0", "currencyCode": "USD" },
                "totalAmount": null
            },
            "discountCodes": [{ "code": "SAVE10", "applicable": true }],
            "lines": { "nodes": [
                {
                    "id": "gid://shopify/CartLine/l1",
                    "quantity": 3,
                    "cost": {
                        "amountPerQuantity": { "amount": "20.0", "currencyCode": "USD" },
                        "totalAmount": { "amount": "60.0", "currencyCode": "USD" },
                        "compareAtAmountPerQuantity": null
                    },
                    "merchandise": {
                        "id": "gid://shopify/ProductVariant/v1",
                        "title": "Red / M",
                        "image": null,
                        "selectedOptions": [{ "name": "Color", "value": "Red" }],
                        "product": { "handle": "test-shirt", "title": "Test Shirt" }
                    }
                },
                {
                    "id": "gid://shopify/CartLine/l2",
                    "quantity": 1,
                    "cost": {
                        "amountPerQuantity": { "amount": "5", "currencyCode": "USD" },
                        "totalAmount": { "amount": "5", "currencyCode": "USD" },
                        "compareAtAmountPerQuantity": null
                    },
                    "merchandise": {}
                }
            ] }
        });
        let cart = convert_cart(serde_json::from_value(json).unwrap());

        assert_eq!(cart.total_quantity, 3);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].merchandise.product_handle, "test-shirt");
        assert_eq!(cart.discount_codes[0].code, "SAVE10");
        assert!(cart.cost.total_amount.is_none());
    }

    #[test]
    fn test_convert_user_errors_defaults_field() {
        let errors = convert_user_errors(vec![CartUserErrorFields {
            code: None,
            field: None,
            message: "Cart not found".to_string(),
        }]);
        assert!(errors[0].field.is_empty());
        assert_eq!(errors[0].message, "Cart not found");
    }
}
