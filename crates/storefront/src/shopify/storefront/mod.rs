//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` request/response framing with `reqwest` 0.13 for
//! HTTP. Caches catalog reads using `moka` (5-minute TTL).

mod cache;
mod conversions;
pub mod queries;
pub mod responses;

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use prier_core::{CartId, CartLineId, SelectedOption};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::types::{
    Cart, CartLineInput, CartLineUpdateInput, Collection, CollectionSummary, HeaderData,
    PageRequest, Product, ProductSummary, ProductVariant,
};
use crate::shopify::{GraphQLError, GraphQLErrorLocation, ShopifyError, StorefrontApi};

use cache::{CacheValue, keys};
use conversions::{
    convert_cart, convert_collection, convert_collection_item, convert_header, convert_product,
    convert_product_item, convert_user_errors, convert_variant,
};
use responses::{CartLineInputFields, CartLineUpdateFields, CartMutationPayload, SelectedOptionInput};

/// Maximum number of cached catalog responses.
const CACHE_CAPACITY: u64 = 1000;

/// Catalog responses are cached for 5 minutes.
const CACHE_TTL: Duration = Duration::from_secs(300);

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides typed access to the header menu, catalog and cart operations.
/// Catalog reads are cached for 5 minutes; cart reads and mutations never are.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: SecretString,
    cache: Cache<String, CacheValue>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint(),
                access_token: config.storefront_private_token.clone(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a different header than public tokens
            .header(
                "Shopify-Storefront-Private-Token",
                self.inner.access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::graphql(format!(
                "HTTP {status}: {}",
                response_text.chars().take(200).collect::<String>()
            )));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(convert_graphql_error).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::graphql("No data in response")
        })
    }
}

fn convert_graphql_error(error: graphql_client::Error) -> GraphQLError {
    GraphQLError {
        message: error.message,
        locations: error.locations.map_or_else(Vec::new, |locs| {
            locs.into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: i64::from(l.line),
                    column: i64::from(l.column),
                })
                .collect()
        }),
        path: error.path.map_or_else(Vec::new, |p| {
            p.into_iter()
                .map(|fragment| match fragment {
                    graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                    graphql_client::PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                })
                .collect()
        }),
    }
}

/// Unwrap a cart mutation payload into the updated cart.
fn cart_from_payload(
    payload: Option<CartMutationPayload>,
    operation: &str,
) -> Result<Cart, ShopifyError> {
    let Some(payload) = payload else {
        return Err(ShopifyError::graphql(format!("{operation} returned no payload")));
    };

    if !payload.user_errors.is_empty() {
        return Err(ShopifyError::UserErrors(convert_user_errors(
            payload.user_errors,
        )));
    }

    payload
        .cart
        .map(convert_cart)
        .ok_or_else(|| ShopifyError::graphql(format!("{operation} returned no cart")))
}

fn line_inputs(lines: Vec<CartLineInput>) -> Vec<CartLineInputFields> {
    lines
        .into_iter()
        .map(|line| CartLineInputFields {
            merchandise_id: line.merchandise_id.into_inner(),
            quantity: i64::from(line.quantity),
        })
        .collect()
}

// =============================================================================
// StorefrontApi
// =============================================================================

#[async_trait::async_trait]
impl StorefrontApi for StorefrontClient {
    #[instrument(skip(self))]
    async fn header(&self, menu_handle: &str) -> Result<HeaderData, ShopifyError> {
        let cache_key = keys::header(menu_handle);

        if let Some(CacheValue::Header(header)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for header");
            return Ok(*header);
        }

        let data = self
            .execute::<queries::Header>(queries::header::Variables {
                header_menu_handle: menu_handle.to_string(),
            })
            .await?;
        let header = convert_header(data);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Header(Box::new(header.clone())))
            .await;

        Ok(header)
    }

    #[instrument(skip(self))]
    async fn featured_collection(&self) -> Result<Option<CollectionSummary>, ShopifyError> {
        if let Some(CacheValue::FeaturedCollection(collection)) =
            self.inner.cache.get(keys::FEATURED_COLLECTION).await
        {
            debug!("Cache hit for featured collection");
            return Ok(collection);
        }

        let data = self
            .execute::<queries::FeaturedCollection>(queries::featured_collection::Variables)
            .await?;
        let collection = data
            .collections
            .nodes
            .into_iter()
            .next()
            .map(convert_collection_item);

        self.inner
            .cache
            .insert(
                keys::FEATURED_COLLECTION.to_string(),
                CacheValue::FeaturedCollection(collection.clone()),
            )
            .await;

        Ok(collection)
    }

    #[instrument(skip(self))]
    async fn recommended_products(&self, count: i64) -> Result<Vec<ProductSummary>, ShopifyError> {
        let cache_key = keys::recommended_products(count);

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for recommended products");
            return Ok(products);
        }

        let data = self
            .execute::<queries::RecommendedProducts>(queries::recommended_products::Variables {
                first: count,
            })
            .await?;
        let products: Vec<ProductSummary> = data
            .products
            .nodes
            .into_iter()
            .map(convert_product_item)
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn collections(&self, first: i64) -> Result<Vec<CollectionSummary>, ShopifyError> {
        let cache_key = keys::collections(first);

        if let Some(CacheValue::Collections(collections)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for collections");
            return Ok(collections);
        }

        let data = self
            .execute::<queries::Collections>(queries::collections::Variables { first })
            .await?;
        let collections: Vec<CollectionSummary> = data
            .collections
            .nodes
            .into_iter()
            .map(convert_collection_item)
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Collections(collections.clone()))
            .await;

        Ok(collections)
    }

    #[instrument(skip(self, page), fields(handle = %handle))]
    async fn collection(
        &self,
        handle: &str,
        page: &PageRequest,
    ) -> Result<Collection, ShopifyError> {
        let cache_key = keys::collection(handle, page);

        if let Some(CacheValue::Collection(collection)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for collection");
            return Ok(*collection);
        }

        let variables = match page {
            PageRequest::Forward { first, after } => queries::collection::Variables {
                handle: handle.to_string(),
                first: Some(*first),
                last: None,
                start_cursor: None,
                end_cursor: after.clone(),
            },
            PageRequest::Backward { last, before } => queries::collection::Variables {
                handle: handle.to_string(),
                first: None,
                last: Some(*last),
                start_cursor: Some(before.clone()),
                end_cursor: None,
            },
        };

        let data = self.execute::<queries::Collection>(variables).await?;
        let collection = data
            .collection
            .map(convert_collection)
            .ok_or_else(|| ShopifyError::NotFound(format!("Collection {handle} not found")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Collection(Box::new(collection.clone())))
            .await;

        Ok(collection)
    }

    #[instrument(skip(self, selected_options), fields(handle = %handle))]
    async fn product(
        &self,
        handle: &str,
        selected_options: &[SelectedOption],
    ) -> Result<Product, ShopifyError> {
        let cache_key = keys::product(handle, selected_options);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let variables = queries::product::Variables {
            handle: handle.to_string(),
            selected_options: selected_options
                .iter()
                .map(|o| SelectedOptionInput {
                    name: o.name.clone(),
                    value: o.value.clone(),
                })
                .collect(),
        };

        let data = self.execute::<queries::Product>(variables).await?;
        let product = data
            .product
            .map(convert_product)
            .ok_or_else(|| ShopifyError::NotFound(format!("Product {handle} not found")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    #[instrument(skip(self), fields(handle = %handle))]
    async fn product_variants(&self, handle: &str) -> Result<Vec<ProductVariant>, ShopifyError> {
        let cache_key = keys::variants(handle);

        if let Some(CacheValue::Variants(variants)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product variants");
            return Ok(variants);
        }

        let data = self
            .execute::<queries::ProductVariants>(queries::product_variants::Variables {
                handle: handle.to_string(),
            })
            .await?;
        let variants: Vec<ProductVariant> = data
            .product
            .ok_or_else(|| ShopifyError::NotFound(format!("Product {handle} not found")))?
            .variants
            .nodes
            .into_iter()
            .map(convert_variant)
            .collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Variants(variants.clone()))
            .await;

        Ok(variants)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    #[instrument(skip(self), fields(cart_id = %cart_id))]
    async fn cart(&self, cart_id: &CartId) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<queries::GetCart>(queries::get_cart::Variables {
                cart_id: cart_id.to_string(),
            })
            .await?;

        data.cart
            .map(convert_cart)
            .ok_or_else(|| ShopifyError::NotFound(format!("Cart not found: {cart_id}")))
    }

    #[instrument(skip(self, lines))]
    async fn create_cart(&self, lines: Vec<CartLineInput>) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<queries::CreateCart>(queries::create_cart::Variables {
                lines: line_inputs(lines),
            })
            .await?;

        cart_from_payload(data.cart_create, "cartCreate")
    }

    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    async fn add_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<queries::AddCartLines>(queries::add_cart_lines::Variables {
                cart_id: cart_id.to_string(),
                lines: line_inputs(lines),
            })
            .await?;

        cart_from_payload(data.cart_lines_add, "cartLinesAdd")
    }

    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    async fn update_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<queries::UpdateCartLines>(queries::update_cart_lines::Variables {
                cart_id: cart_id.to_string(),
                lines: lines
                    .into_iter()
                    .map(|line| CartLineUpdateFields {
                        id: line.id.into_inner(),
                        quantity: i64::from(line.quantity),
                    })
                    .collect(),
            })
            .await?;

        cart_from_payload(data.cart_lines_update, "cartLinesUpdate")
    }

    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id))]
    async fn remove_lines(
        &self,
        cart_id: &CartId,
        line_ids: Vec<CartLineId>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<queries::RemoveCartLines>(queries::remove_cart_lines::Variables {
                cart_id: cart_id.to_string(),
                line_ids: line_ids.into_iter().map(CartLineId::into_inner).collect(),
            })
            .await?;

        cart_from_payload(data.cart_lines_remove, "cartLinesRemove")
    }

    #[instrument(skip(self), fields(cart_id = %cart_id))]
    async fn update_discount_codes(
        &self,
        cart_id: &CartId,
        codes: Vec<String>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<queries::UpdateDiscountCodes>(queries::update_discount_codes::Variables {
                cart_id: cart_id.to_string(),
                discount_codes: codes,
            })
            .await?;

        cart_from_payload(data.cart_discount_codes_update, "cartDiscountCodesUpdate")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> CartMutationPayload {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_cart_from_payload_user_errors() {
        let result = cart_from_payload(
            Some(payload(serde_json::json!({
                "cart": null,
                "userErrors": [{ "code": "INVALID", "field": ["lines"], "message": "Sold out" }]
            }))),
            "cartLinesAdd",
        );
        match result {
            Err(ShopifyError::UserErrors(errors)) => assert_eq!(errors[0].message, "Sold out"),
            other => panic!("expected user errors, got {other:?}"),
        }
    }

    #[test]
    fn test_cart_from_payload_missing() {
        let err = cart_from_payload(None, "cartCreate").unwrap_err();
        assert_eq!(
            err.to_string(),
            "GraphQL errors: cartCreate returned no payload"
        );
    }

    #[test]
    fn test_convert_graphql_error_path() {
        let error: graphql_client::Error = serde_json::from_value(serde_json::json!({
            "message": "Field 'x' doesn't exist",
            "locations": [{ "line": 2, "column": 3 }],
            "path": ["product", 0]
        }))
        .unwrap();
        let converted = convert_graphql_error(error);
        assert_eq!(converted.locations[0].line, 2);
        assert_eq!(converted.path.len(), 2);
    }
}
