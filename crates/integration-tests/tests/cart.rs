//! Cart form protocol: every control posts a `cartFormInput` to `/cart`.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{StatusCode, header};
use prier_integration_tests::{
    FakeStorefront, body_text, get, post_cart, session_cookie, test_app,
};
use prier_storefront::shopify::CartUserError;

const ADD_RED_M: &str = r#"{"action":"LinesAdd","inputs":{"lines":[{"merchandiseId":"gid://shopify/ProductVariant/2","quantity":1}]}}"#;

/// Add Red/M to a fresh cart and return the session cookie.
async fn add_to_cart(app: &Router) -> String {
    let response = post_cart(
        app,
        &[
            ("cartFormInput", ADD_RED_M),
            ("redirectTo", "/products/test-shirt?Color=Red&Size=M#cart-aside"),
        ],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/products/test-shirt?Color=Red&Size=M#cart-aside"
    );
    session_cookie(&response).unwrap()
}

#[tokio::test]
async fn test_add_creates_cart_and_shows_it() {
    let api = Arc::new(FakeStorefront::with_catalog());
    let app = test_app(Arc::clone(&api));

    let cookie = add_to_cart(&app).await;
    assert_eq!(api.cart().unwrap().total_quantity, 1);

    let response = get(&app, "/cart", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response, Duration::from_secs(2)).await;
    assert!(html.contains("<title>Hydrogen | Cart</title>"));
    assert!(html.contains("Test Shirt"));
    assert!(html.contains("Cart <span>1</span>"));
    assert!(html.contains("https://shop.example.com/checkouts/c1"));
}

#[tokio::test]
async fn test_adding_again_increments_the_line() {
    let api = Arc::new(FakeStorefront::with_catalog());
    let app = test_app(Arc::clone(&api));

    let cookie = add_to_cart(&app).await;
    let response = post_cart(&app, &[("cartFormInput", ADD_RED_M)], Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/cart");

    let cart = api.cart().unwrap();
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.total_quantity, 2);
}

#[tokio::test]
async fn test_update_and_remove_lines() {
    let api = Arc::new(FakeStorefront::with_catalog());
    let app = test_app(Arc::clone(&api));
    let cookie = add_to_cart(&app).await;

    let update = r#"{"action":"LinesUpdate","inputs":{"lines":[{"id":"gid://shopify/CartLine/1","quantity":3}]}}"#;
    let response = post_cart(
        &app,
        &[("cartFormInput", update), ("redirectTo", "/cart")],
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(api.cart().unwrap().total_quantity, 3);

    let remove = r#"{"action":"LinesRemove","inputs":{"lineIds":["gid://shopify/CartLine/1"]}}"#;
    let response = post_cart(&app, &[("cartFormInput", remove)], Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(api.cart().unwrap().lines.is_empty());

    let html = body_text(
        get(&app, "/cart", Some(&cookie)).await,
        Duration::from_secs(2),
    )
    .await;
    assert!(html.contains("Continue Shopping"));
}

#[tokio::test]
async fn test_discount_codes_apply_and_remove() {
    let api = Arc::new(FakeStorefront::with_catalog());
    let app = test_app(Arc::clone(&api));
    let cookie = add_to_cart(&app).await;

    let apply = r#"{"action":"DiscountCodesUpdate","inputs":{"discountCodes":["SAVE10"]}}"#;
    let response = post_cart(
        &app,
        &[("cartFormInput", apply), ("discountCode", " WELCOME ")],
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Re-entering an active code does not duplicate it.
    let response = post_cart(
        &app,
        &[("cartFormInput", apply), ("discountCode", "SAVE10")],
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let remove = r#"{"action":"DiscountCodesUpdate","inputs":{"discountCodes":[]}}"#;
    let response = post_cart(&app, &[("cartFormInput", remove)], Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(
        api.submitted_codes(),
        vec![
            vec!["SAVE10".to_string(), "WELCOME".to_string()],
            vec!["SAVE10".to_string()],
            Vec::<String>::new(),
        ]
    );
    assert!(api.cart().unwrap().discount_codes.is_empty());
}

#[tokio::test]
async fn test_user_errors_rerender_cart() {
    let api = Arc::new(FakeStorefront::with_catalog());
    let app = test_app(Arc::clone(&api));
    let cookie = add_to_cart(&app).await;

    api.update(|state| {
        state.next_user_errors = Some(vec![CartUserError {
            code: Some("INVALID".to_string()),
            field: vec!["lines".to_string()],
            message: "Quantity is not available".to_string(),
        }]);
    });

    let update = r#"{"action":"LinesUpdate","inputs":{"lines":[{"id":"gid://shopify/CartLine/1","quantity":99}]}}"#;
    let response = post_cart(&app, &[("cartFormInput", update)], Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body_text(response, Duration::from_secs(2)).await;
    assert!(html.contains("Quantity is not available"));
    assert!(html.contains("Test Shirt"));
    assert_eq!(api.cart().unwrap().total_quantity, 1);
}

#[tokio::test]
async fn test_mutation_without_cart_is_bad_request() {
    let app = test_app(Arc::new(FakeStorefront::with_catalog()));

    let update = r#"{"action":"LinesUpdate","inputs":{"lines":[{"id":"gid://shopify/CartLine/1","quantity":2}]}}"#;
    let response = post_cart(&app, &[("cartFormInput", update)], None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_form_input_is_bad_request() {
    let app = test_app(Arc::new(FakeStorefront::with_catalog()));

    let response = post_cart(&app, &[("cartFormInput", "not json")], None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let unknown = r#"{"action":"BuyerIdentityUpdate","inputs":{}}"#;
    let response = post_cart(&app, &[("cartFormInput", unknown)], None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_offsite_redirect_is_ignored() {
    let app = test_app(Arc::new(FakeStorefront::with_catalog()));

    for target in ["https://evil.example/", "//evil.example/x", "/\\evil.example/x"] {
        let response = post_cart(
            &app,
            &[("cartFormInput", ADD_RED_M), ("redirectTo", target)],
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{target}");
        assert_eq!(response.headers()[header::LOCATION], "/cart", "{target}");
    }
}

#[tokio::test]
async fn test_cart_page_without_session_is_empty() {
    let app = test_app(Arc::new(FakeStorefront::with_catalog()));

    let response = get(&app, "/cart", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response, Duration::from_secs(2)).await;
    assert!(html.contains("Continue Shopping"));
    assert!(html.contains("Cart <span>0</span>"));
}
