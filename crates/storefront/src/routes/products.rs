//! Product detail page.
//!
//! The page always renders one concrete variant. A request that does not
//! pin one down is redirected to a canonical variant URL first.

use std::collections::HashMap;
use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, RawQuery, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prier_core::DeferredState;
use prier_core::variant::{QueryParams, ResolveRequest, Resolution, resolve, variant_url};
use tower_sessions::Session;
use tracing::{debug, instrument};

use super::home;
use super::layout::{self, LayoutView};
use crate::components::{
    ImageView, ProductFormTemplate, ProductFormView, ProductPriceView, SectionTemplate,
    SectionTheme, SectionView,
};
use crate::deferred::{Deferred, FetchFailed, StreamedPage};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::get_cart_id;
use crate::shopify::{Product, ProductVariant};
use crate::state::AppState;

/// Number of products in the recommended section.
const RECOMMENDED_PRODUCTS: i64 = 4;

/// Product display data for the page template.
pub struct ProductPageView {
    pub title: String,
    pub image: Option<ImageView>,
    pub price: ProductPriceView,
    pub description_html: String,
    pub seo_description: Option<String>,
}

impl From<&Product> for ProductPageView {
    fn from(product: &Product) -> Self {
        let selected = product.selected_variant.as_ref();
        Self {
            title: product.title.clone(),
            image: selected
                .and_then(|variant| variant.image.as_ref())
                .map(|image| ImageView::new(image, "Product Image")),
            price: ProductPriceView::new(selected),
            description_html: product.description_html.clone(),
            seo_description: product
                .seo_description
                .clone()
                .filter(|description| !description.is_empty()),
        }
    }
}

#[derive(Template)]
#[template(path = "pages/product.html")]
pub struct ProductTemplate {
    pub layout: LayoutView,
    pub product: ProductPageView,
    pub product_form: String,
    pub recommended: String,
}

/// Display a product.
///
/// Critical: the product with its first variants. Deferred: the full variant
/// list (drives option availability), recommended products and the cart.
#[instrument(skip(state, session, params, raw_query), fields(handle = tracing::field::Empty))]
pub async fn show(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    RawQuery(raw_query): RawQuery,
    session: Session,
) -> Result<Response> {
    let handle = params
        .get("handle")
        .ok_or(AppError::MissingRouteParameter("handle"))?
        .clone();
    tracing::Span::current().record("handle", handle.as_str());

    let query = QueryParams::parse(raw_query.as_deref().unwrap_or_default()).without_tracking();

    let selected_options = query.to_selected_options();
    let api = state.storefront();
    let (header, product) = tokio::join!(
        layout::header(&state),
        api.product(&handle, &selected_options)
    );
    let mut product = product?;

    let selected = match resolve(&ResolveRequest {
        handle: &handle,
        options: &product.options,
        variants: &product.variants,
        selected_variant: product.selected_variant.as_ref(),
        query: &query,
    })? {
        Resolution::Redirect(redirect) => {
            debug!(location = %redirect.location, "Redirecting to canonical variant");
            return Ok(found(&redirect.location));
        }
        resolution => resolution.variant().cloned(),
    };
    product.selected_variant = selected;

    let variants = Deferred::spawn("product_variants", {
        let api = state.storefront();
        let handle = handle.clone();
        async move { api.product_variants(&handle).await }
    });
    let recommended = Deferred::spawn("recommended_products", async move {
        api.recommended_products(RECOMMENDED_PRODUCTS).await
    });
    let cart = layout::cart(&state, get_cart_id(&session).await);

    let canonical_url = variant_url(
        &handle,
        &query,
        product
            .selected_variant
            .as_ref()
            .map_or(&[], |variant| variant.selected_options.as_slice()),
    );

    let mut page = StreamedPage::new();
    let layout = LayoutView::new(
        &mut page,
        layout::page_title(&state, &product.title),
        header,
        &cart,
        &canonical_url,
    );

    let view = ProductPageView::from(&product);
    let product = Arc::new(product);
    let return_to = format!("{canonical_url}#cart-aside");
    let product_form = page.slot("product-form", &variants, move |state| {
        render_product_form(&product, state, &query, &return_to)
    });

    let grid = page.slot("recommended-products", &recommended, home::render_recommended);
    let section = SectionView::new(SectionTheme::Default, "Recommended Products")
        .with_copy("Hello world, this is copy!");

    let template = ProductTemplate {
        layout,
        product: view,
        product_form: product_form.to_string(),
        recommended: SectionTemplate {
            section: &section,
            body: &grid.to_string(),
        }
        .render()?,
    };

    Ok(page.into_response(template.render()?))
}

/// `302 Found` to a relative URL.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

#[allow(clippy::ptr_arg)]
fn render_product_form(
    product: &Product,
    state: DeferredState<&Vec<ProductVariant>, &FetchFailed>,
    query: &QueryParams,
    return_to: &str,
) -> askama::Result<String> {
    let form = ProductFormView::new(product, state.map(Vec::as_slice), query, return_to);
    ProductFormTemplate { form: &form }.render()
}
