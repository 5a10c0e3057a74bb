//! Cart route handlers.
//!
//! Every cart control posts to `/cart`. The `cartFormInput` field carries a
//! JSON [`CartAction`]; the discount form adds the entered `discountCode`.
//! Cart IDs live in the session and point at the remote Shopify cart.

use askama::Template;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use prier_core::cart::apply_discount_code;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use super::layout::{self, LayoutView};
use crate::components::{CartAction, CartLayout, CartTemplate, CartView, HeaderView};
use crate::deferred::{Deferred, StreamedPage};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{clear_cart_id, get_cart_id, set_cart_id};
use crate::shopify::{Cart, CartUserError, ShopifyError};
use crate::state::AppState;

/// Where cart forms land when they do not name a destination.
const DEFAULT_REDIRECT: &str = "/cart";

#[derive(Template)]
#[template(path = "pages/cart.html")]
pub struct CartPageTemplate {
    pub layout: LayoutView,
    pub cart: String,
}

/// Fields posted by every cart form.
#[derive(Debug, Deserialize)]
pub struct CartForm {
    #[serde(rename = "cartFormInput")]
    pub cart_form_input: String,
    #[serde(rename = "discountCode", default)]
    pub discount_code: Option<String>,
    #[serde(rename = "redirectTo", default)]
    pub redirect_to: Option<String>,
}

/// Display the cart page.
///
/// Unlike other pages the cart is critical data here.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let (header, cart) = tokio::join!(layout::header(&state), current_cart(&state, &session));
    let cart = cart?;

    render_page(&state, header, cart, &[], StatusCode::OK)
}

/// Apply a cart action, then redirect back to where the form came from.
///
/// Rejected mutations re-render the cart page with the user errors.
#[instrument(skip(state, session, form))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartForm>,
) -> Result<Response> {
    let action: CartAction = serde_json::from_str(&form.cart_form_input)
        .map_err(|e| AppError::BadRequest(format!("Invalid cartFormInput: {e}")))?;

    let cart_id = get_cart_id(&session).await;
    let api = state.storefront();

    let result = match (action, cart_id.as_ref()) {
        (CartAction::LinesAdd { lines }, None) => api.create_cart(lines).await,
        (CartAction::LinesAdd { lines }, Some(id)) => {
            match api.add_lines(id, lines.clone()).await {
                Err(ShopifyError::NotFound(_)) => {
                    info!(cart_id = %id, "Cart expired, creating a new one");
                    api.create_cart(lines).await
                }
                result => result,
            }
        }
        (CartAction::LinesUpdate { lines }, Some(id)) => api.update_lines(id, lines).await,
        (CartAction::LinesRemove { line_ids }, Some(id)) => api.remove_lines(id, line_ids).await,
        (CartAction::DiscountCodesUpdate { discount_codes }, Some(id)) => {
            let codes = match form.discount_code.as_deref() {
                Some(entered) => apply_discount_code(&discount_codes, entered),
                None => discount_codes,
            };
            api.update_discount_codes(id, codes).await
        }
        (_, None) => return Err(AppError::BadRequest("No cart to update".to_string())),
    };

    match result {
        Ok(cart) => {
            if cart_id.as_ref() != Some(&cart.id) {
                set_cart_id(&session, &cart.id).await?;
            }
            Ok(Redirect::to(safe_redirect(form.redirect_to.as_deref())).into_response())
        }
        Err(ShopifyError::UserErrors(errors)) => {
            warn!(count = errors.len(), "Cart mutation rejected");
            let (header, cart) =
                tokio::join!(layout::header(&state), current_cart(&state, &session));
            render_page(
                &state,
                header,
                cart?,
                &errors,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
        Err(e) => Err(e.into()),
    }
}

/// Fetch the session's cart, forgetting it once it expired remotely.
async fn current_cart(state: &AppState, session: &Session) -> Result<Option<Cart>> {
    let Some(cart_id) = get_cart_id(session).await else {
        return Ok(None);
    };

    match state.storefront().cart(&cart_id).await {
        Ok(cart) => Ok(Some(cart)),
        Err(ShopifyError::NotFound(_)) => {
            info!(cart_id = %cart_id, "Cart expired");
            clear_cart_id(session).await?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn render_page(
    state: &AppState,
    header: HeaderView,
    cart: Option<Cart>,
    errors: &[CartUserError],
    status: StatusCode,
) -> Result<Response> {
    let view = CartView::new(cart.as_ref(), CartLayout::Page, DEFAULT_REDIRECT).with_errors(errors);

    let mut page = StreamedPage::new();
    let layout = LayoutView::new(
        &mut page,
        layout::page_title(state, "Cart"),
        header,
        &Deferred::ready(cart),
        DEFAULT_REDIRECT,
    );

    let template = CartPageTemplate {
        layout,
        cart: CartTemplate { cart: &view }.render()?,
    };

    Ok(page.into_response_with_status(status, template.render()?))
}

/// Host used to resolve `redirectTo` against; never sent to the client.
const REDIRECT_BASE: &str = "http://storefront.invalid/";

/// Only same-site paths are followed; anything else lands on the cart page.
///
/// The path is resolved the way a browser would resolve a relative
/// `Location`, so `//host` and `/\host` forms that leave the site are caught.
fn safe_redirect(redirect_to: Option<&str>) -> &str {
    match redirect_to {
        Some(path) if is_same_site_path(path) => path,
        _ => DEFAULT_REDIRECT,
    }
}

fn is_same_site_path(path: &str) -> bool {
    if !path.starts_with('/') || path.chars().any(char::is_control) {
        return false;
    }
    let Ok(base) = url::Url::parse(REDIRECT_BASE) else {
        return false;
    };
    base.join(path).is_ok_and(|joined| joined.origin() == base.origin())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_redirect() {
        assert_eq!(safe_redirect(None), "/cart");
        assert_eq!(
            safe_redirect(Some("/products/test-shirt?Color=Red#cart-aside")),
            "/products/test-shirt?Color=Red#cart-aside"
        );
        assert_eq!(safe_redirect(Some("https://evil.example")), "/cart");
        assert_eq!(safe_redirect(Some("//evil.example")), "/cart");
        assert_eq!(safe_redirect(Some("")), "/cart");
    }

    #[test]
    fn test_safe_redirect_rejects_backslash_and_control_chars() {
        assert_eq!(safe_redirect(Some("/\\evil.example/x")), "/cart");
        assert_eq!(safe_redirect(Some("/\\/evil.example")), "/cart");
        assert_eq!(safe_redirect(Some("/\t/evil.example")), "/cart");
        assert_eq!(safe_redirect(Some("/cart\r\nSet-Cookie: a=b")), "/cart");
        assert_eq!(
            safe_redirect(Some("/collections/shirts")),
            "/collections/shirts"
        );
    }

    #[test]
    fn test_cart_form_field_names() {
        let form: CartForm = serde_json::from_value(serde_json::json!({
            "cartFormInput": "{}",
            "discountCode": "SAVE10",
        }))
        .unwrap();
        assert_eq!(form.cart_form_input, "{}");
        assert_eq!(form.discount_code.as_deref(), Some("SAVE10"));
        assert_eq!(form.redirect_to, None);
    }
}
