//! Cache types for Storefront API responses.

use crate::shopify::types::{
    Collection, CollectionSummary, HeaderData, Product, ProductSummary, ProductVariant,
};

/// Cached value types.
///
/// Carts are never cached; every other read is.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Header(Box<HeaderData>),
    FeaturedCollection(Option<CollectionSummary>),
    Products(Vec<ProductSummary>),
    Collections(Vec<CollectionSummary>),
    Collection(Box<Collection>),
    Product(Box<Product>),
    Variants(Vec<ProductVariant>),
}

/// Cache key for one catalog read.
pub mod keys {
    use prier_core::SelectedOption;

    use crate::shopify::types::PageRequest;

    pub fn header(menu_handle: &str) -> String {
        format!("header:{menu_handle}")
    }

    pub const FEATURED_COLLECTION: &str = "featured-collection";

    pub fn recommended_products(count: i64) -> String {
        format!("recommended:{count}")
    }

    pub fn collections(first: i64) -> String {
        format!("collections:{first}")
    }

    pub fn collection(handle: &str, page: &PageRequest) -> String {
        match page {
            PageRequest::Forward { first, after } => {
                format!("collection:{handle}:f{first}:{}", after.as_deref().unwrap_or(""))
            }
            PageRequest::Backward { last, before } => {
                format!("collection:{handle}:b{last}:{before}")
            }
        }
    }

    pub fn product(handle: &str, selected_options: &[SelectedOption]) -> String {
        let options = selected_options
            .iter()
            .map(|o| format!("{}={}", o.name, o.value))
            .collect::<Vec<_>>()
            .join("&");
        format!("product:{handle}:{options}")
    }

    pub fn variants(handle: &str) -> String {
        format!("variants:{handle}")
    }
}

#[cfg(test)]
mod tests {
    use prier_core::SelectedOption;

    use super::keys;
    use crate::shopify::types::PageRequest;

    #[test]
    fn test_collection_keys_distinguish_direction() {
        let forward = keys::collection(
            "shirts",
            &PageRequest::Forward {
                first: 12,
                after: Some("c1".to_string()),
            },
        );
        let backward = keys::collection(
            "shirts",
            &PageRequest::Backward {
                last: 12,
                before: "c1".to_string(),
            },
        );
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_product_key_includes_selection() {
        let plain = keys::product("test-shirt", &[]);
        let red = keys::product("test-shirt", &[SelectedOption::new("Color", "Red")]);
        assert_eq!(red, "product:test-shirt:Color=Red");
        assert_ne!(plain, red);
    }
}
