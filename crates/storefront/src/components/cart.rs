//! Cart view shared by the cart aside and the cart page.
//!
//! Every control is a small `POST /cart` form whose `cartFormInput` field
//! carries a serialized [`CartAction`].

use std::fmt;

use askama::Template;
use prier_core::cart::{QuantityStep, active_codes, remove_discount_codes};
use prier_core::variant::{QueryParams, variant_url};
use prier_core::{CartLineId, Money};
use serde::{Deserialize, Serialize};

use super::ImageView;
use super::product_card::CardLayout;
use crate::shopify::types::{Cart, CartLine, CartLineInput, CartLineUpdateInput, CartUserError};

/// A cart mutation submitted through a cart form.
///
/// Serialized as `{"action": "LinesUpdate", "inputs": {"lines": [...]}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "inputs", rename_all_fields = "camelCase")]
pub enum CartAction {
    LinesAdd { lines: Vec<CartLineInput> },
    LinesUpdate { lines: Vec<CartLineUpdateInput> },
    LinesRemove { line_ids: Vec<CartLineId> },
    DiscountCodesUpdate { discount_codes: Vec<String> },
}

/// Where the cart is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartLayout {
    Aside,
    Page,
}

impl fmt::Display for CartLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Aside => "aside",
            Self::Page => "page",
        })
    }
}

/// One cart line with its quantity controls.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub card_layout: CardLayout,
    pub title: String,
    pub url: String,
    pub image: Option<ImageView>,
    pub price: String,
    pub quantity: u32,
    pub increase: CartAction,
    /// `None` when the decrease control is disabled.
    pub decrease: Option<CartAction>,
    pub remove: CartAction,
}

impl CartLineView {
    fn new(line: &CartLine, layout: CartLayout) -> Self {
        let step = QuantityStep::new(line.quantity);
        let update = |quantity| CartAction::LinesUpdate {
            lines: vec![CartLineUpdateInput {
                id: line.id.clone(),
                quantity,
            }],
        };

        Self {
            card_layout: match layout {
                CartLayout::Aside => CardLayout::Aside,
                CartLayout::Page => CardLayout::Page,
            },
            title: line.merchandise.product_title.clone(),
            url: variant_url(
                &line.merchandise.product_handle,
                &QueryParams::default(),
                &line.merchandise.selected_options,
            ),
            image: line
                .merchandise
                .image
                .as_ref()
                .map(|image| ImageView::new(image, &line.merchandise.title)),
            price: line.cost.total_amount.format_without_trailing_zeros(),
            quantity: step.quantity,
            increase: update(step.increase),
            decrease: step.decrease.map(update),
            remove: CartAction::LinesRemove {
                line_ids: vec![line.id.clone()],
            },
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone)]
pub struct CartView {
    pub layout: CartLayout,
    pub lines: Vec<CartLineView>,
    pub has_items: bool,
    /// Formatted subtotal, `None` renders as "-".
    pub subtotal: Option<String>,
    pub active_codes: Vec<String>,
    /// Resubmits the active codes; the entered `discountCode` is merged in.
    pub apply_discount: CartAction,
    pub remove_discounts: CartAction,
    pub checkout_url: Option<String>,
    /// Path the forms return to after a successful mutation.
    pub return_to: String,
    /// Messages from a rejected mutation.
    pub errors: Vec<String>,
}

impl CartView {
    /// Build the view for `cart`; `None` renders the empty cart.
    #[must_use]
    pub fn new(cart: Option<&Cart>, layout: CartLayout, return_to: impl Into<String>) -> Self {
        let codes = cart.map_or_else(Vec::new, |cart| active_codes(&cart.discount_codes));

        Self {
            layout,
            lines: cart.map_or_else(Vec::new, |cart| {
                cart.lines
                    .iter()
                    .map(|line| CartLineView::new(line, layout))
                    .collect()
            }),
            has_items: cart.is_some_and(|cart| cart.total_quantity > 0),
            subtotal: cart
                .and_then(|cart| cart.cost.subtotal_amount.as_ref())
                .map(Money::format),
            apply_discount: CartAction::DiscountCodesUpdate {
                discount_codes: codes.clone(),
            },
            remove_discounts: CartAction::DiscountCodesUpdate {
                discount_codes: remove_discount_codes(),
            },
            active_codes: codes,
            checkout_url: cart
                .map(|cart| cart.checkout_url.clone())
                .filter(|url| !url.is_empty()),
            return_to: return_to.into(),
            errors: Vec::new(),
        }
    }

    /// Attach the user errors of a rejected mutation.
    #[must_use]
    pub fn with_errors(mut self, errors: &[CartUserError]) -> Self {
        self.errors = errors.iter().map(|e| e.message.clone()).collect();
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Template)]
#[template(path = "components/cart.html")]
pub struct CartTemplate<'a> {
    pub cart: &'a CartView,
}
