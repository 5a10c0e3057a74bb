//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /collections            - Collection listing
//! GET  /collections/{handle}   - Collection detail (cursor paginated)
//! GET  /products/{handle}      - Product detail (redirects to a variant URL)
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart                   - Apply a cart action, then redirect
//! ```

pub mod cart;
pub mod collections;
pub mod home;
pub mod layout;
pub mod products;

use axum::{Router, extract::Request, middleware::from_fn, routing::get};
use tower_http::trace::TraceLayer;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::show))
        .route("/collections", get(collections::index))
        .route("/collections/{handle}", get(collections::show))
        .route("/products/{handle}", get(products::show))
        .route("/cart", get(cart::show).post(cart::update))
}

/// Build the full application with its middleware stack.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(session_layer)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Shopify.
async fn health() -> &'static str {
    "ok"
}
