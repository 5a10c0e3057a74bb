//! Product page: canonical variant redirects and the variant form.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::{StatusCode, header};
use prier_integration_tests::{Behavior, FakeStorefront, body_text, get, test_app, wide_shirt};

async fn location(uri: &str) -> String {
    let app = test_app(Arc::new(FakeStorefront::with_catalog()));
    let response = get(&app, uri, None).await;
    assert_eq!(response.status(), StatusCode::FOUND, "{uri}");
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_partial_selection_redirects_to_first_match() {
    assert_eq!(
        location("/products/test-shirt?Color=Red").await,
        "/products/test-shirt?Color=Red&Size=M"
    );
}

#[tokio::test]
async fn test_no_selection_redirects_to_first_variant() {
    assert_eq!(
        location("/products/test-shirt").await,
        "/products/test-shirt?Color=Blue&Size=S"
    );
}

#[tokio::test]
async fn test_redirect_drops_tracking_params() {
    assert_eq!(
        location("/products/test-shirt?Color=Red&_pos=1&fbclid=abc").await,
        "/products/test-shirt?Color=Red&Size=M"
    );
}

#[tokio::test]
async fn test_unknown_combination_redirects_to_matching_variant() {
    assert_eq!(
        location("/products/test-shirt?Color=Blue&Size=M").await,
        "/products/test-shirt?Color=Blue&Size=S"
    );
}

#[tokio::test]
async fn test_full_selection_renders_variant() {
    let app = test_app(Arc::new(FakeStorefront::with_catalog()));

    let response = get(&app, "/products/test-shirt?Color=Red&Size=M", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response, Duration::from_secs(2)).await;
    assert!(html.contains("<title>Hydrogen | Test Shirt</title>"));
    assert!(html.contains("$20.00"));
    assert!(html.contains("<p>A shirt for tests</p>"));
    assert!(html.contains(r#""merchandiseId":"gid://shopify/ProductVariant/2""#));
    assert!(html.contains("/products/test-shirt?Color=Red&amp;Size=M#cart-aside"));
}

#[tokio::test]
async fn test_foreign_param_keeps_remote_selection_past_eager_variants() {
    let fake = Arc::new(FakeStorefront::with_catalog());
    fake.update(|state| state.products.push(wide_shirt()));
    let app = test_app(fake);

    // Black/M is the eleventh variant, outside the eagerly loaded set.
    let response = get(&app, "/products/wide-shirt?Color=Black&Size=M&ref=mail", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response, Duration::from_secs(2)).await;
    assert!(html.contains(r#""merchandiseId":"gid://shopify/ProductVariant/111""#));
    assert!(
        html.contains("/products/wide-shirt?Color=Black&amp;Size=M&amp;ref=mail#cart-aside")
    );
}

#[tokio::test]
async fn test_sold_out_variant_cannot_be_added() {
    let app = test_app(Arc::new(FakeStorefront::with_catalog()));

    let response = get(&app, "/products/test-shirt?Color=Red&Size=S", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response, Duration::from_secs(2)).await;
    assert!(html.contains("Sold out"));
    assert!(!html.contains("Add to cart"));
}

#[tokio::test]
async fn test_variant_failure_renders_inline() {
    let api = Arc::new(FakeStorefront::with_catalog());
    api.update(|state| state.variants = Behavior::Fail);
    let app = test_app(api);

    let response = get(&app, "/products/test-shirt?Color=Red&Size=M", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response, Duration::from_secs(2)).await;
    assert!(html.contains("Test Shirt"));
    assert!(html.contains("There was a problem loading product variants"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let app = test_app(Arc::new(FakeStorefront::with_catalog()));

    let response = get(&app, "/products/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_text(response, Duration::from_secs(1)).await,
        "Product nope not found"
    );
}
