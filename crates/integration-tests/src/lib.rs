//! Integration tests for the Prier storefront.
//!
//! The full router is driven in-process with `tower::ServiceExt::oneshot`
//! against [`FakeStorefront`], an in-memory [`StorefrontApi`].
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p prier-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use futures::StreamExt;
use prier_core::cart::DiscountCode;
use prier_core::variant::covers;
use prier_core::{
    CartId, CartLineId, CollectionId, Money, ProductId, ProductOption, SelectedOption, VariantId,
};
use prier_storefront::config::{DEFAULT_SITE_TITLE, ShopifyStorefrontConfig, StorefrontConfig};
use prier_storefront::routes;
use prier_storefront::shopify::{
    Cart, CartCost, CartLine, CartLineCost, CartLineInput, CartLineUpdateInput, CartMerchandise,
    CartUserError, Collection, CollectionSummary, HeaderData, PageInfo, PageRequest, Product,
    ProductSummary, ProductVariant, ShopifyError, StorefrontApi,
};
use prier_storefront::state::AppState;
use rust_decimal::Decimal;
use secrecy::SecretString;
use tower::ServiceExt;

/// Id given to every cart the fake creates.
pub const FAKE_CART_ID: &str = "gid://shopify/Cart/c1";

/// Variants loaded together with the product.
const EAGER_VARIANTS: usize = 10;

/// Price of every variant, in cents.
const UNIT_PRICE_CENTS: i64 = 2000;

/// How a deferred catalog read behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Behavior {
    #[default]
    Ready,
    /// Never settles.
    Hang,
    Fail,
}

/// Mutable state behind the fake API.
#[derive(Default)]
pub struct FakeState {
    pub products: Vec<Product>,
    pub collections: Vec<Collection>,
    pub cart: Option<Cart>,
    /// Returned (once) by the next cart mutation instead of applying it.
    pub next_user_errors: Option<Vec<CartUserError>>,
    /// Discount code sets submitted, in order.
    pub submitted_codes: Vec<Vec<String>>,
    pub recommended: Behavior,
    pub variants: Behavior,
}

/// In-memory Storefront API.
#[derive(Default)]
pub struct FakeStorefront {
    pub state: Mutex<FakeState>,
}

impl FakeStorefront {
    /// A shop with the test shirt and one collection holding it.
    #[must_use]
    pub fn with_catalog() -> Self {
        let shirt = test_shirt();
        let collection = Collection {
            id: CollectionId::new("gid://shopify/Collection/1"),
            handle: "shirts".to_string(),
            title: "Shirts".to_string(),
            description: "All the shirts".to_string(),
            image: None,
            products: vec![summary(&shirt)],
            page_info: PageInfo::default(),
        };

        Self {
            state: Mutex::new(FakeState {
                products: vec![shirt],
                collections: vec![collection],
                ..FakeState::default()
            }),
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.state.lock().unwrap());
    }

    #[must_use]
    pub fn cart(&self) -> Option<Cart> {
        self.state.lock().unwrap().cart.clone()
    }

    #[must_use]
    pub fn submitted_codes(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().submitted_codes.clone()
    }

    fn find_variant(&self, id: &VariantId) -> Option<ProductVariant> {
        self.state
            .lock()
            .unwrap()
            .products
            .iter()
            .flat_map(|product| product.variants.iter())
            .find(|variant| &variant.id == id)
            .cloned()
    }

    /// Apply `f` to the stored cart unless a user error is queued.
    fn mutate(
        &self,
        cart_id: &CartId,
        f: impl FnOnce(&mut Cart),
    ) -> Result<Cart, ShopifyError> {
        let mut state = self.state.lock().unwrap();
        if let Some(errors) = state.next_user_errors.take() {
            return Err(ShopifyError::UserErrors(errors));
        }
        let cart = state
            .cart
            .as_mut()
            .filter(|cart| &cart.id == cart_id)
            .ok_or_else(|| ShopifyError::NotFound(format!("Cart not found: {cart_id}")))?;
        f(cart);
        recompute(cart);
        Ok(cart.clone())
    }

    fn line(&self, input: &CartLineInput, index: usize) -> CartLine {
        let variant = self.find_variant(&input.merchandise_id);
        CartLine {
            id: CartLineId::new(format!("gid://shopify/CartLine/{index}")),
            quantity: input.quantity,
            merchandise: CartMerchandise {
                id: input.merchandise_id.clone(),
                title: variant.as_ref().map_or_else(String::new, |v| v.title.clone()),
                product_handle: variant
                    .as_ref()
                    .map_or_else(String::new, |v| v.product_handle.clone()),
                product_title: variant
                    .as_ref()
                    .map_or_else(String::new, |v| v.product_title.clone()),
                selected_options: variant
                    .as_ref()
                    .map_or_else(Vec::new, |v| v.selected_options.clone()),
                image: None,
            },
            cost: line_cost(input.quantity),
        }
    }
}

#[async_trait]
impl StorefrontApi for FakeStorefront {
    async fn header(&self, _menu_handle: &str) -> Result<HeaderData, ShopifyError> {
        Ok(HeaderData {
            shop_name: "Test Shop".to_string(),
            primary_domain_url: "https://shop.example.com".to_string(),
            menu: None,
        })
    }

    async fn featured_collection(&self) -> Result<Option<CollectionSummary>, ShopifyError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .collections
            .first()
            .map(|collection| CollectionSummary {
                id: collection.id.clone(),
                handle: collection.handle.clone(),
                title: collection.title.clone(),
                description: collection.description.clone(),
                image: None,
            }))
    }

    async fn recommended_products(&self, count: i64) -> Result<Vec<ProductSummary>, ShopifyError> {
        let (behavior, products) = {
            let state = self.state.lock().unwrap();
            (state.recommended, state.products.clone())
        };
        match behavior {
            Behavior::Ready => Ok(products
                .iter()
                .take(usize::try_from(count).unwrap_or(0))
                .map(summary)
                .collect()),
            Behavior::Hang => futures::future::pending().await,
            Behavior::Fail => Err(ShopifyError::graphql("recommended products unavailable")),
        }
    }

    async fn collections(&self, first: i64) -> Result<Vec<CollectionSummary>, ShopifyError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .collections
            .iter()
            .take(usize::try_from(first).unwrap_or(0))
            .map(|collection| CollectionSummary {
                id: collection.id.clone(),
                handle: collection.handle.clone(),
                title: collection.title.clone(),
                description: collection.description.clone(),
                image: None,
            })
            .collect())
    }

    async fn collection(
        &self,
        handle: &str,
        _page: &PageRequest,
    ) -> Result<Collection, ShopifyError> {
        self.state
            .lock()
            .unwrap()
            .collections
            .iter()
            .find(|collection| collection.handle == handle)
            .cloned()
            .ok_or_else(|| ShopifyError::NotFound(format!("Collection {handle} not found")))
    }

    async fn product(
        &self,
        handle: &str,
        selected_options: &[SelectedOption],
    ) -> Result<Product, ShopifyError> {
        let mut product = self
            .state
            .lock()
            .unwrap()
            .products
            .iter()
            .find(|product| product.handle == handle)
            .cloned()
            .ok_or_else(|| ShopifyError::NotFound(format!("Product {handle} not found")))?;

        let known: Vec<SelectedOption> = selected_options
            .iter()
            .filter(|wanted| product.options.iter().any(|option| option.name == wanted.name))
            .cloned()
            .collect();
        product.selected_variant = product
            .variants
            .iter()
            .find(|variant| covers(&known, &variant.selected_options))
            .cloned();
        product.variants.truncate(EAGER_VARIANTS);
        Ok(product)
    }

    async fn product_variants(&self, handle: &str) -> Result<Vec<ProductVariant>, ShopifyError> {
        let (behavior, product) = {
            let state = self.state.lock().unwrap();
            (
                state.variants,
                state.products.iter().find(|p| p.handle == handle).cloned(),
            )
        };
        match behavior {
            Behavior::Ready => product
                .map(|product| product.variants)
                .ok_or_else(|| ShopifyError::NotFound(format!("Product {handle} not found"))),
            Behavior::Hang => futures::future::pending().await,
            Behavior::Fail => Err(ShopifyError::graphql("variants unavailable")),
        }
    }

    async fn cart(&self, cart_id: &CartId) -> Result<Cart, ShopifyError> {
        self.state
            .lock()
            .unwrap()
            .cart
            .clone()
            .filter(|cart| &cart.id == cart_id)
            .ok_or_else(|| ShopifyError::NotFound(format!("Cart not found: {cart_id}")))
    }

    async fn create_cart(&self, lines: Vec<CartLineInput>) -> Result<Cart, ShopifyError> {
        let lines: Vec<CartLine> = lines
            .iter()
            .enumerate()
            .map(|(index, input)| self.line(input, index + 1))
            .collect();

        let mut state = self.state.lock().unwrap();
        if let Some(errors) = state.next_user_errors.take() {
            return Err(ShopifyError::UserErrors(errors));
        }
        let mut cart = Cart {
            id: CartId::new(FAKE_CART_ID),
            checkout_url: "https://shop.example.com/checkouts/c1".to_string(),
            total_quantity: 0,
            lines,
            cost: CartCost {
                subtotal_amount: None,
                total_amount: None,
            },
            discount_codes: Vec::new(),
        };
        recompute(&mut cart);
        state.cart = Some(cart.clone());
        Ok(cart)
    }

    async fn add_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, ShopifyError> {
        let next_index = self.cart().map_or(0, |cart| cart.lines.len()) + 1;
        let new_lines: Vec<CartLine> = lines
            .iter()
            .enumerate()
            .map(|(offset, input)| self.line(input, next_index + offset))
            .collect();

        self.mutate(cart_id, |cart| {
            for line in new_lines {
                match cart
                    .lines
                    .iter_mut()
                    .find(|existing| existing.merchandise.id == line.merchandise.id)
                {
                    Some(existing) => existing.quantity += line.quantity,
                    None => cart.lines.push(line),
                }
            }
        })
    }

    async fn update_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<Cart, ShopifyError> {
        self.mutate(cart_id, |cart| {
            for update in lines {
                if let Some(line) = cart.lines.iter_mut().find(|line| line.id == update.id) {
                    line.quantity = update.quantity;
                }
            }
            cart.lines.retain(|line| line.quantity > 0);
        })
    }

    async fn remove_lines(
        &self,
        cart_id: &CartId,
        line_ids: Vec<CartLineId>,
    ) -> Result<Cart, ShopifyError> {
        self.mutate(cart_id, |cart| {
            cart.lines.retain(|line| !line_ids.contains(&line.id));
        })
    }

    async fn update_discount_codes(
        &self,
        cart_id: &CartId,
        codes: Vec<String>,
    ) -> Result<Cart, ShopifyError> {
        self.state
            .lock()
            .unwrap()
            .submitted_codes
            .push(codes.clone());

        self.mutate(cart_id, |cart| {
            cart.discount_codes = codes
                .into_iter()
                .map(|code| DiscountCode {
                    code,
                    applicable: true,
                })
                .collect();
        })
    }
}

fn usd(cents: i64) -> Money {
    Money::new(Decimal::new(cents, 2), "USD")
}

fn line_cost(quantity: u32) -> CartLineCost {
    CartLineCost {
        amount_per_quantity: usd(UNIT_PRICE_CENTS),
        total_amount: usd(UNIT_PRICE_CENTS * i64::from(quantity)),
        compare_at_amount_per_quantity: None,
    }
}

fn recompute(cart: &mut Cart) {
    for line in &mut cart.lines {
        line.cost = line_cost(line.quantity);
    }
    cart.total_quantity = cart.lines.iter().map(|line| line.quantity).sum();
    let subtotal = usd(UNIT_PRICE_CENTS * i64::from(cart.total_quantity));
    cart.cost = CartCost {
        subtotal_amount: Some(subtotal.clone()),
        total_amount: Some(subtotal),
    };
}

fn variant(id: u32, color: &str, size: &str, available: bool) -> ProductVariant {
    ProductVariant {
        id: VariantId::new(format!("gid://shopify/ProductVariant/{id}")),
        title: format!("{color} / {size}"),
        available_for_sale: available,
        price: usd(UNIT_PRICE_CENTS),
        compare_at_price: None,
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

/// `test-shirt` with Color {Red, Blue} x Size {S, M}.
///
/// Variant order is Blue/S, Red/M, Red/S; Blue/M does not exist and Red/S
/// is sold out.
#[must_use]
pub fn test_shirt() -> Product {
    Product {
        id: ProductId::new("gid://shopify/Product/1"),
        handle: "test-shirt".to_string(),
        title: "Test Shirt".to_string(),
        vendor: "Prier".to_string(),
        description: "A shirt for tests".to_string(),
        description_html: "<p>A shirt for tests</p>".to_string(),
        options: vec![
            ProductOption {
                name: "Color".to_string(),
                values: vec!["Red".to_string(), "Blue".to_string()],
            },
            ProductOption {
                name: "Size".to_string(),
                values: vec!["S".to_string(), "M".to_string()],
            },
        ],
        variants: vec![
            variant(1, "Blue", "S", true),
            variant(2, "Red", "M", true),
            variant(3, "Red", "S", false),
        ],
        selected_variant: None,
        seo_title: None,
        seo_description: None,
    }
}

/// `wide-shirt` with Color {Red, Blue, Green, Black} x Size {S, M, L}.
///
/// All twelve variants exist, so the last two are only reachable through the
/// remote selection.
#[must_use]
pub fn wide_shirt() -> Product {
    const COLORS: [&str; 4] = ["Red", "Blue", "Green", "Black"];
    const SIZES: [&str; 3] = ["S", "M", "L"];

    let variants = COLORS
        .iter()
        .flat_map(|color| SIZES.iter().map(move |size| (*color, *size)))
        .zip(101..)
        .map(|((color, size), id)| ProductVariant {
            product_handle: "wide-shirt".to_string(),
            product_title: "Wide Shirt".to_string(),
            ..variant(id, color, size, true)
        })
        .collect();

    Product {
        id: ProductId::new("gid://shopify/Product/2"),
        handle: "wide-shirt".to_string(),
        title: "Wide Shirt".to_string(),
        description: "A shirt in every color".to_string(),
        description_html: "<p>A shirt in every color</p>".to_string(),
        options: vec![
            ProductOption {
                name: "Color".to_string(),
                values: COLORS.iter().map(ToString::to_string).collect(),
            },
            ProductOption {
                name: "Size".to_string(),
                values: SIZES.iter().map(ToString::to_string).collect(),
            },
        ],
        variants,
        ..test_shirt()
    }
}

fn summary(product: &Product) -> ProductSummary {
    ProductSummary {
        id: product.id.clone(),
        handle: product.handle.clone(),
        title: product.title.clone(),
        featured_image: None,
        min_price: usd(UNIT_PRICE_CENTS),
        compare_at_min_price: None,
        first_variant_options: product
            .variants
            .first()
            .map_or_else(Vec::new, |variant| variant.selected_options.clone()),
    }
}

/// Configuration for an in-process app over plain HTTP.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        site_title: DEFAULT_SITE_TITLE.to_string(),
        shopify: ShopifyStorefrontConfig {
            store: "test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            storefront_private_token: SecretString::from("test-token".to_string()),
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// The full router over `api`.
#[must_use]
pub fn test_app(api: Arc<FakeStorefront>) -> Router {
    routes::app(AppState::new(test_config(), api))
}

/// `GET uri`, optionally with a session cookie.
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// `POST /cart` with form `fields`, optionally with a session cookie.
pub async fn post_cart(
    app: &Router,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> Response<Body> {
    let body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    let mut request = Request::builder()
        .method("POST")
        .uri("/cart")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// The `name=value` pair of the response's session cookie.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("prier_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Read the whole body, failing after `limit`.
pub async fn body_text(response: Response<Body>, limit: Duration) -> String {
    let chunks: Vec<String> = tokio::time::timeout(
        limit,
        response
            .into_body()
            .into_data_stream()
            .map(|chunk| String::from_utf8(chunk.unwrap().to_vec()).unwrap())
            .collect(),
    )
    .await
    .unwrap();
    chunks.concat()
}
