//! Home page.

use askama::Template;
use axum::{extract::State, response::Response};
use prier_core::DeferredState;
use tower_sessions::Session;
use tracing::instrument;

use super::layout::{self, LayoutView};
use crate::components::{
    HeroPosition, HeroTemplate, HeroTheme, HeroView, ImageView, LogoMode, LogoSize,
    LogoTemplate, LogoView, ProductCardView, ProductGridTemplate, SectionTemplate,
    SectionTheme, SectionView,
};
use crate::deferred::{Deferred, FetchFailed, StreamedPage};
use crate::error::Result;
use crate::filters;
use crate::middleware::get_cart_id;
use crate::shopify::{CollectionSummary, ProductSummary};
use crate::state::AppState;

/// Number of products in the recommended grid.
const RECOMMENDED_PRODUCTS: i64 = 8;

const DEFAULT_COPY: &str = "Hello world, this is copy!";
const DEFAULT_CTA: &str = "This is a CTA";

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub layout: LayoutView,
    pub logo: String,
    pub featured: String,
    pub recommended: String,
    pub closing: String,
}

/// Display the home page.
///
/// Critical: the most recently updated collection. Deferred: recommended
/// products and the cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let api = state.storefront();
    let (header, featured) = tokio::join!(layout::header(&state), api.featured_collection());
    let featured = featured?;

    let recommended = Deferred::spawn("recommended_products", async move {
        api.recommended_products(RECOMMENDED_PRODUCTS).await
    });
    let cart = layout::cart(&state, get_cart_id(&session).await);

    let mut page = StreamedPage::new();
    let layout = LayoutView::new(
        &mut page,
        layout::page_title(&state, "Home"),
        header,
        &cart,
        "/",
    );

    let grid = page.slot("recommended-products", &recommended, render_recommended);
    let section =
        SectionView::new(SectionTheme::Default, "Recommended Products").with_copy(DEFAULT_COPY);

    let template = HomeTemplate {
        layout,
        logo: LogoTemplate {
            logo: &LogoView::new(LogoSize::Large, LogoMode::Light).animated(),
        }
        .render()?,
        featured: HeroTemplate {
            hero: &featured_hero(featured.as_ref(), HeroTheme::LightOverlay),
        }
        .render()?,
        recommended: SectionTemplate {
            section: &section,
            body: &grid.to_string(),
        }
        .render()?,
        closing: HeroTemplate {
            hero: &featured_hero(featured.as_ref(), HeroTheme::DarkOverlay)
                .with_height(540)
                .with_position(HeroPosition::BottomLeft),
        }
        .render()?,
    };

    Ok(page.into_response(template.render()?))
}

/// Hero promoting the featured collection.
fn featured_hero(collection: Option<&CollectionSummary>, theme: HeroTheme) -> HeroView {
    let Some(collection) = collection else {
        return HeroView::new(theme, DEFAULT_CTA, "/collections").with_copy(DEFAULT_COPY);
    };

    HeroView::new(theme, DEFAULT_CTA, format!("/collections/{}", collection.handle))
        .with_image(
            collection
                .image
                .as_ref()
                .map(|image| ImageView::new(image, &collection.title)),
        )
        .with_title(collection.title.clone())
        .with_copy(DEFAULT_COPY)
}

/// Product grid for a recommended-products slot.
#[allow(clippy::ptr_arg)]
pub(super) fn render_recommended(
    state: DeferredState<&Vec<ProductSummary>, &FetchFailed>,
) -> askama::Result<String> {
    match state {
        DeferredState::Pending => Ok("<div>Loading...</div>".to_string()),
        DeferredState::Failed(_) => Ok(
            r#"<p class="section-error" role="alert">There was a problem loading recommended products</p>"#
                .to_string(),
        ),
        DeferredState::Resolved(products) => {
            let cards: Vec<ProductCardView> = products.iter().map(ProductCardView::from).collect();
            ProductGridTemplate::new(&cards).render()
        }
    }
}
