//! Data every page layout needs: title, header and the deferred cart.

use askama::Template;
use prier_core::{CartId, DeferredState};
use tracing::warn;

use crate::components::{CartLayout, CartTemplate, CartView, HeaderView};
use crate::deferred::{Deferred, FetchFailed, Slot, StreamedPage};
use crate::shopify::{Cart, ShopifyError};
use crate::state::AppState;

/// Handle of the menu shown in the header.
pub const HEADER_MENU_HANDLE: &str = "main-menu";

/// Slot ids used by the layout.
pub const CART_BADGE_SLOT: &str = "cart-badge";
pub const CART_MAIN_SLOT: &str = "cart-main";

/// Layout fields shared by every page template.
pub struct LayoutView {
    pub title: String,
    pub header: HeaderView,
    pub cart_badge: Slot,
    pub cart_aside: Slot,
}

impl LayoutView {
    /// Bind the cart badge and cart aside to the deferred cart.
    ///
    /// `return_to` is where the aside's forms send the visitor afterwards.
    pub fn new(
        page: &mut StreamedPage,
        title: String,
        header: HeaderView,
        cart: &Deferred<Option<Cart>>,
        return_to: &str,
    ) -> Self {
        let cart_badge = page.slot(CART_BADGE_SLOT, cart, render_cart_badge);

        let return_to = return_to.to_string();
        let cart_aside = page.slot(CART_MAIN_SLOT, cart, move |state| {
            render_cart_aside(state, &return_to)
        });

        Self {
            title,
            header,
            cart_badge,
            cart_aside,
        }
    }
}

/// `"<site title> | <page>"`.
#[must_use]
pub fn page_title(state: &AppState, page: &str) -> String {
    format!("{} | {page}", state.config().site_title)
}

/// Fetch the header, falling back to the fixed menu on failure.
pub async fn header(state: &AppState) -> HeaderView {
    let config = state.config();
    match state.storefront().header(HEADER_MENU_HANDLE).await {
        Ok(header) => HeaderView::new(Some(&header), &config.site_title, &config.shopify.store),
        Err(e) => {
            warn!(error = %e, "Header query failed, using fallback menu");
            HeaderView::fallback(&config.site_title)
        }
    }
}

/// Start fetching the visitor's cart.
///
/// Resolves to `None` without a cart id or once the remote cart expired.
pub fn cart(state: &AppState, cart_id: Option<CartId>) -> Deferred<Option<Cart>> {
    let api = state.storefront();
    Deferred::spawn("cart", async move {
        let Some(cart_id) = cart_id else {
            return Ok(None);
        };
        match api.cart(&cart_id).await {
            Ok(cart) => Ok(Some(cart)),
            Err(ShopifyError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    })
}

#[derive(Template)]
#[template(
    source = r##"<a href="#cart-aside" class="header-menu-item" role="button">Cart <span>{{ count }}</span></a>"##,
    ext = "html"
)]
struct CartBadgeTemplate {
    count: u32,
}

/// Badge count is 0 until the cart resolves, and stays 0 if it fails.
fn render_cart_badge(state: DeferredState<&Option<Cart>, &FetchFailed>) -> askama::Result<String> {
    let count = match state {
        DeferredState::Resolved(Some(cart)) => cart.total_quantity,
        DeferredState::Resolved(None) | DeferredState::Pending | DeferredState::Failed(_) => 0,
    };
    CartBadgeTemplate { count }.render()
}

fn render_cart_aside(
    state: DeferredState<&Option<Cart>, &FetchFailed>,
    return_to: &str,
) -> askama::Result<String> {
    match state {
        DeferredState::Pending => Ok("<p>Loading cart ...</p>".to_string()),
        DeferredState::Failed(_) => {
            Ok(r#"<p class="cart-error" role="alert">There was a problem loading your cart</p>"#
                .to_string())
        }
        DeferredState::Resolved(cart) => {
            let view = CartView::new(cart.as_ref(), CartLayout::Aside, return_to);
            CartTemplate { cart: &view }.render()
        }
    }
}
