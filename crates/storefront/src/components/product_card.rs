//! Product cards and the grid that lays them out.

use std::fmt;

use askama::Template;
use prier_core::variant::{QueryParams, variant_url};

use super::ImageView;
use crate::shopify::types::{CollectionSummary, ProductSummary};

/// Card style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardLayout {
    #[default]
    Grid,
    Aside,
    Page,
}

impl fmt::Display for CardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Grid => "grid",
            Self::Aside => "aside",
            Self::Page => "page",
        })
    }
}

/// Grid spacing and column counts per breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub gap: &'static str,
    pub desktop: u8,
    pub tablet: u8,
    pub mobile: u8,
}

impl Grid {
    /// Layout used for every product listing.
    pub const PRODUCTS: Self = Self {
        gap: "8/16",
        desktop: 4,
        tablet: 4,
        mobile: 2,
    };
}

/// Product card display data.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub layout: CardLayout,
    pub url: String,
    pub image: Option<ImageView>,
    pub title: String,
    pub price: Option<String>,
    pub compare_at_price: Option<String>,
}

impl From<&ProductSummary> for ProductCardView {
    /// Cards link to the product's first variant.
    fn from(product: &ProductSummary) -> Self {
        Self {
            layout: CardLayout::Grid,
            url: variant_url(
                &product.handle,
                &QueryParams::default(),
                &product.first_variant_options,
            ),
            image: product
                .featured_image
                .as_ref()
                .map(|image| ImageView::new(image, &product.title)),
            title: product.title.clone(),
            price: Some(product.min_price.format()),
            compare_at_price: product
                .compare_at_min_price
                .as_ref()
                .filter(|compare_at| compare_at.amount > product.min_price.amount)
                .map(prier_core::Money::format),
        }
    }
}

impl From<&CollectionSummary> for ProductCardView {
    fn from(collection: &CollectionSummary) -> Self {
        Self {
            layout: CardLayout::Grid,
            url: format!("/collections/{}", collection.handle),
            image: collection
                .image
                .as_ref()
                .map(|image| ImageView::new(image, &collection.title)),
            title: collection.title.clone(),
            price: None,
            compare_at_price: None,
        }
    }
}

#[derive(Template)]
#[template(path = "components/product_grid.html")]
pub struct ProductGridTemplate<'a> {
    pub grid: Grid,
    pub cards: &'a [ProductCardView],
}

impl<'a> ProductGridTemplate<'a> {
    #[must_use]
    pub const fn new(cards: &'a [ProductCardView]) -> Self {
        Self {
            grid: Grid::PRODUCTS,
            cards,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use prier_core::{Money, ProductId, SelectedOption};
    use rust_decimal::Decimal;

    use super::*;

    fn summary() -> ProductSummary {
        ProductSummary {
            id: ProductId::new("gid://shopify/Product/1"),
            handle: "test-shirt".to_string(),
            title: "Test Shirt".to_string(),
            featured_image: None,
            min_price: Money::new(Decimal::new(2500, 2), "USD"),
            compare_at_min_price: Some(Money::new(Decimal::new(3000, 2), "USD")),
            first_variant_options: vec![
                SelectedOption::new("Color", "Red"),
                SelectedOption::new("Size", "M"),
            ],
        }
    }

    #[test]
    fn test_card_links_to_first_variant() {
        let card = ProductCardView::from(&summary());
        assert_eq!(card.url, "/products/test-shirt?Color=Red&Size=M");
        assert_eq!(card.price.as_deref(), Some("$25.00"));
        assert_eq!(card.compare_at_price.as_deref(), Some("$30.00"));
    }

    #[test]
    fn test_grid_renders_cards() {
        let cards = vec![ProductCardView::from(&summary())];
        let html = ProductGridTemplate::new(&cards).render().unwrap();

        assert!(html.contains(r#"grid-gap="8/16""#));
        assert!(html.contains(r#"grid-desktop="4""#));
        assert!(html.contains(r#"grid-mobile="2""#));
        assert!(html.contains("Test Shirt"));
        assert!(html.contains(r#"product-card-type="grid""#));
    }
}
