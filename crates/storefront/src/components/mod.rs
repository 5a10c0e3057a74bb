//! Presentational components.
//!
//! Each component is a view struct built from domain data plus an askama
//! template under `templates/components/`. Style variants are enum-valued
//! parameters on one template rather than separate components.

pub mod cart;
pub mod header;
pub mod hero;
pub mod logo;
pub mod product;
pub mod product_card;
pub mod section;

pub use cart::{CartAction, CartLayout, CartTemplate, CartView};
pub use header::{HeaderView, MenuLink};
pub use hero::{HeroPosition, HeroTemplate, HeroTheme, HeroView};
pub use logo::{LogoMode, LogoSize, LogoTemplate, LogoView};
pub use product::{ProductFormTemplate, ProductFormView, ProductPriceView};
pub use product_card::{CardLayout, Grid, ProductCardView, ProductGridTemplate};
pub use section::{SectionTemplate, SectionTheme, SectionView};

use crate::shopify::types::Image;

/// Image display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl ImageView {
    /// Build from a CDN image, using `fallback_alt` when it has no alt text.
    #[must_use]
    pub fn new(image: &Image, fallback_alt: &str) -> Self {
        Self {
            url: image.url.clone(),
            alt: image
                .alt_text
                .clone()
                .filter(|alt| !alt.is_empty())
                .unwrap_or_else(|| fallback_alt.to_string()),
            width: image.width,
            height: image.height,
        }
    }
}
