//! GraphQL operations for the Shopify Storefront API.
//!
//! Each operation is a unit struct implementing [`GraphQLQuery`] with a
//! sibling module holding its document, `Variables` and `ResponseData`, the
//! same layout `#[derive(GraphQLQuery)]` generates.

use graphql_client::{GraphQLQuery, QueryBody};

// =============================================================================
// Fragments
// =============================================================================

macro_rules! image_fragment {
    () => {
        "
fragment Image on Image {
  id
  url
  altText
  width
  height
}
"
    };
}

macro_rules! product_variant_fragment {
    () => {
        "
fragment ProductVariant on ProductVariant {
  availableForSale
  compareAtPrice { amount currencyCode }
  id
  image { ...Image }
  price { amount currencyCode }
  product { title handle }
  selectedOptions { name value }
  sku
  title
}
"
    };
}

macro_rules! product_item_fragment {
    () => {
        "
fragment ProductItem on Product {
  id
  handle
  title
  featuredImage { ...Image }
  priceRange { minVariantPrice { amount currencyCode } }
  compareAtPriceRange { minVariantPrice { amount currencyCode } }
  variants(first: 1) {
    nodes { selectedOptions { name value } }
  }
}
"
    };
}

macro_rules! collection_item_fragment {
    () => {
        "
fragment CollectionItem on Collection {
  id
  handle
  title
  description
  image { ...Image }
}
"
    };
}

macro_rules! cart_fragment {
    () => {
        "
fragment Cart on Cart {
  id
  checkoutUrl
  totalQuantity
  cost {
    subtotalAmount { amount currencyCode }
    totalAmount { amount currencyCode }
  }
  discountCodes { code applicable }
  lines(first: 100) {
    nodes {
      id
      quantity
      cost {
        amountPerQuantity { amount currencyCode }
        totalAmount { amount currencyCode }
        compareAtAmountPerQuantity { amount currencyCode }
      }
      merchandise {
        ... on ProductVariant {
          id
          title
          image { ...Image }
          selectedOptions { name value }
          product { handle title }
        }
      }
    }
  }
}
"
    };
}

macro_rules! cart_mutation_payload {
    () => {
        "
  cart { ...Cart }
  userErrors { code field message }
"
    };
}

/// Implement [`GraphQLQuery`] for an operation struct and its module.
macro_rules! operation {
    ($name:ident, $module:ident) => {
        impl GraphQLQuery for $name {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $module::QUERY,
                    operation_name: $module::OPERATION_NAME,
                }
            }
        }
    };
}

// =============================================================================
// Layout
// =============================================================================

pub struct Header;
operation!(Header, header);

pub mod header {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::{MenuFields, ShopFields};

    pub const OPERATION_NAME: &str = "Header";
    pub const QUERY: &str = "
query Header($headerMenuHandle: String!) {
  shop {
    name
    primaryDomain { url }
  }
  menu(handle: $headerMenuHandle) {
    id
    items {
      id
      title
      url
      items { id title url }
    }
  }
}
";

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub header_menu_handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub shop: ShopFields,
        pub menu: Option<MenuFields>,
    }
}

// =============================================================================
// Catalog
// =============================================================================

pub struct FeaturedCollection;
operation!(FeaturedCollection, featured_collection);

pub mod featured_collection {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::{CollectionItemFields, Nodes};

    pub const OPERATION_NAME: &str = "FeaturedCollection";
    pub const QUERY: &str = concat!(
        "
query FeaturedCollection {
  collections(first: 1, sortKey: UPDATED_AT, reverse: true) {
    nodes { ...CollectionItem }
  }
}
",
        collection_item_fragment!(),
        image_fragment!()
    );

    #[derive(Debug, Serialize)]
    pub struct Variables;

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collections: Nodes<CollectionItemFields>,
    }
}

pub struct RecommendedProducts;
operation!(RecommendedProducts, recommended_products);

pub mod recommended_products {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::{Nodes, ProductItemFields};

    pub const OPERATION_NAME: &str = "RecommendedProducts";
    pub const QUERY: &str = concat!(
        "
query RecommendedProducts($first: Int!) {
  products(first: $first, sortKey: UPDATED_AT, reverse: true) {
    nodes { ...ProductItem }
  }
}
",
        product_item_fragment!(),
        image_fragment!()
    );

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Nodes<ProductItemFields>,
    }
}

pub struct Collections;
operation!(Collections, collections);

pub mod collections {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::{CollectionItemFields, Nodes};

    pub const OPERATION_NAME: &str = "Collections";
    pub const QUERY: &str = concat!(
        "
query Collections($first: Int!) {
  collections(first: $first) {
    nodes { ...CollectionItem }
  }
}
",
        collection_item_fragment!(),
        image_fragment!()
    );

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collections: Nodes<CollectionItemFields>,
    }
}

pub struct Collection;
operation!(Collection, collection);

pub mod collection {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::CollectionFields;

    pub const OPERATION_NAME: &str = "Collection";
    pub const QUERY: &str = concat!(
        "
query Collection(
  $handle: String!
  $first: Int
  $last: Int
  $startCursor: String
  $endCursor: String
) {
  collection(handle: $handle) {
    id
    handle
    title
    description
    image { ...Image }
    products(first: $first, last: $last, before: $startCursor, after: $endCursor) {
      nodes { ...ProductItem }
      pageInfo {
        hasPreviousPage
        hasNextPage
        endCursor
        startCursor
      }
    }
  }
}
",
        product_item_fragment!(),
        image_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub handle: String,
        pub first: Option<i64>,
        pub last: Option<i64>,
        pub start_cursor: Option<String>,
        pub end_cursor: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collection: Option<CollectionFields>,
    }
}

pub struct Product;
operation!(Product, product);

pub mod product {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::{ProductFields, SelectedOptionInput};

    pub const OPERATION_NAME: &str = "Product";
    pub const QUERY: &str = concat!(
        "
query Product($handle: String!, $selectedOptions: [SelectedOptionInput!]!) {
  product(handle: $handle) {
    id
    title
    vendor
    handle
    descriptionHtml
    description
    options {
      name
      optionValues { name }
    }
    selectedVariant: variantBySelectedOptions(
      selectedOptions: $selectedOptions
      ignoreUnknownOptions: true
    ) {
      ...ProductVariant
    }
    variants(first: 10) {
      nodes { ...ProductVariant }
    }
    seo { description title }
  }
}
",
        product_variant_fragment!(),
        image_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub handle: String,
        pub selected_options: Vec<SelectedOptionInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ProductFields>,
    }
}

pub struct ProductVariants;
operation!(ProductVariants, product_variants);

pub mod product_variants {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::{Nodes, ProductVariantFields};

    pub const OPERATION_NAME: &str = "ProductVariants";
    pub const QUERY: &str = concat!(
        "
query ProductVariants($handle: String!) {
  product(handle: $handle) {
    variants(first: 250) {
      nodes { ...ProductVariant }
    }
  }
}
",
        product_variant_fragment!(),
        image_fragment!()
    );

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<VariantsOnly>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct VariantsOnly {
        pub variants: Nodes<ProductVariantFields>,
    }
}

// =============================================================================
// Cart
// =============================================================================

pub struct GetCart;
operation!(GetCart, get_cart);

pub mod get_cart {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::CartFields;

    pub const OPERATION_NAME: &str = "GetCart";
    pub const QUERY: &str = concat!(
        "
query GetCart($cartId: ID!) {
  cart(id: $cartId) { ...Cart }
}
",
        cart_fragment!(),
        image_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub cart: Option<CartFields>,
    }
}

pub struct CreateCart;
operation!(CreateCart, create_cart);

pub mod create_cart {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::{CartLineInputFields, CartMutationPayload};

    pub const OPERATION_NAME: &str = "CreateCart";
    pub const QUERY: &str = concat!(
        "
mutation CreateCart($lines: [CartLineInput!]) {
  cartCreate(input: { lines: $lines }) {",
        cart_mutation_payload!(),
        "  }
}
",
        cart_fragment!(),
        image_fragment!()
    );

    #[derive(Debug, Serialize)]
    pub struct Variables {
        pub lines: Vec<CartLineInputFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_create: Option<CartMutationPayload>,
    }
}

pub struct AddCartLines;
operation!(AddCartLines, add_cart_lines);

pub mod add_cart_lines {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::{CartLineInputFields, CartMutationPayload};

    pub const OPERATION_NAME: &str = "AddCartLines";
    pub const QUERY: &str = concat!(
        "
mutation AddCartLines($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {",
        cart_mutation_payload!(),
        "  }
}
",
        cart_fragment!(),
        image_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineInputFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_add: Option<CartMutationPayload>,
    }
}

pub struct UpdateCartLines;
operation!(UpdateCartLines, update_cart_lines);

pub mod update_cart_lines {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::{CartLineUpdateFields, CartMutationPayload};

    pub const OPERATION_NAME: &str = "UpdateCartLines";
    pub const QUERY: &str = concat!(
        "
mutation UpdateCartLines($cartId: ID!, $lines: [CartLineUpdateInput!]!) {
  cartLinesUpdate(cartId: $cartId, lines: $lines) {",
        cart_mutation_payload!(),
        "  }
}
",
        cart_fragment!(),
        image_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineUpdateFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_update: Option<CartMutationPayload>,
    }
}

pub struct RemoveCartLines;
operation!(RemoveCartLines, remove_cart_lines);

pub mod remove_cart_lines {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::CartMutationPayload;

    pub const OPERATION_NAME: &str = "RemoveCartLines";
    pub const QUERY: &str = concat!(
        "
mutation RemoveCartLines($cartId: ID!, $lineIds: [ID!]!) {
  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) {",
        cart_mutation_payload!(),
        "  }
}
",
        cart_fragment!(),
        image_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub line_ids: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_remove: Option<CartMutationPayload>,
    }
}

pub struct UpdateDiscountCodes;
operation!(UpdateDiscountCodes, update_discount_codes);

pub mod update_discount_codes {
    use serde::{Deserialize, Serialize};

    use crate::shopify::storefront::responses::CartMutationPayload;

    pub const OPERATION_NAME: &str = "UpdateDiscountCodes";
    pub const QUERY: &str = concat!(
        "
mutation UpdateDiscountCodes($cartId: ID!, $discountCodes: [String!]!) {
  cartDiscountCodesUpdate(cartId: $cartId, discountCodes: $discountCodes) {",
        cart_mutation_payload!(),
        "  }
}
",
        cart_fragment!(),
        image_fragment!()
    );

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub discount_codes: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_discount_codes_update: Option<CartMutationPayload>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_uses_operation_document() {
        let body = Product::build_query(product::Variables {
            handle: "test-shirt".to_string(),
            selected_options: vec![],
        });
        assert_eq!(body.operation_name, "Product");
        assert!(body.query.contains("query Product("));
        assert!(body.query.contains("fragment ProductVariant on ProductVariant"));
        assert!(body.query.contains("fragment Image on Image"));
    }

    #[test]
    fn test_product_query_ignores_unknown_options() {
        // Foreign query parameters are passed through as selected options.
        assert!(product::QUERY.contains("ignoreUnknownOptions: true"));
    }

    #[test]
    fn test_variables_are_camel_case() {
        let body = Collection::build_query(collection::Variables {
            handle: "shirts".to_string(),
            first: Some(12),
            last: None,
            start_cursor: None,
            end_cursor: Some("abc".to_string()),
        });
        let json = serde_json::to_value(&body).unwrap_or_default();
        assert_eq!(json["variables"]["endCursor"], "abc");
        assert_eq!(json["variables"]["first"], 12);
        assert_eq!(json["operationName"], "Collection");
    }

    #[test]
    fn test_mutation_documents_include_payload() {
        for query in [
            create_cart::QUERY,
            add_cart_lines::QUERY,
            update_cart_lines::QUERY,
            remove_cart_lines::QUERY,
            update_discount_codes::QUERY,
        ] {
            assert!(query.contains("userErrors { code field message }"));
            assert!(query.contains("fragment Cart on Cart"));
        }
    }
}
