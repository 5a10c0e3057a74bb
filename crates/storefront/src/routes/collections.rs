//! Collection route handlers.

use std::collections::HashMap;

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use url::form_urlencoded;

use super::layout::{self, LayoutView};
use crate::components::{
    ProductCardView, ProductGridTemplate, SectionTemplate, SectionTheme, SectionView,
};
use crate::deferred::StreamedPage;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::get_cart_id;
use crate::shopify::{Collection, PageRequest};
use crate::state::AppState;

/// Products per collection page.
const PRODUCTS_PER_PAGE: i64 = 12;

/// Collections on the index page.
const COLLECTIONS_PER_PAGE: i64 = 50;

/// Which way to page from `cursor`. Unrecognized values page forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    #[serde(other)]
    Next,
}

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub cursor: Option<String>,
    pub direction: Option<Direction>,
}

impl PaginationQuery {
    /// The page to request. Without a cursor this is the first page.
    #[must_use]
    pub fn page_request(&self, size: i64) -> PageRequest {
        match (&self.cursor, self.direction) {
            (Some(cursor), Some(Direction::Previous)) => PageRequest::Backward {
                last: size,
                before: cursor.clone(),
            },
            (Some(cursor), _) => PageRequest::Forward {
                first: size,
                after: Some(cursor.clone()),
            },
            (None, _) => PageRequest::first(size),
        }
    }
}

#[derive(Template)]
#[template(path = "pages/collections.html")]
pub struct CollectionsTemplate {
    pub layout: LayoutView,
    pub collections: String,
}

#[derive(Template)]
#[template(path = "pages/collection.html")]
pub struct CollectionTemplate {
    pub layout: LayoutView,
    pub collection: String,
}

#[derive(Template)]
#[template(path = "components/pagination.html")]
struct PaginationTemplate<'a> {
    previous_url: Option<String>,
    next_url: Option<String>,
    grid: &'a str,
}

/// Display all collections.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<Response> {
    let api = state.storefront();
    let (header, collections) =
        tokio::join!(layout::header(&state), api.collections(COLLECTIONS_PER_PAGE));
    let collections = collections?;

    let cart = layout::cart(&state, get_cart_id(&session).await);
    let mut page = StreamedPage::new();
    let layout = LayoutView::new(
        &mut page,
        layout::page_title(&state, "Collections"),
        header,
        &cart,
        "/collections",
    );

    let cards: Vec<ProductCardView> = collections.iter().map(ProductCardView::from).collect();
    let section = SectionView::new(SectionTheme::Plp, "Collections");
    let template = CollectionsTemplate {
        layout,
        collections: SectionTemplate {
            section: &section,
            body: &ProductGridTemplate::new(&cards).render()?,
        }
        .render()?,
    };

    Ok(page.into_response(template.render()?))
}

/// Display one page of a collection.
#[instrument(skip(state, session, params, query), fields(handle = tracing::field::Empty))]
pub async fn show(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    Query(query): Query<PaginationQuery>,
    session: Session,
) -> Result<Response> {
    let handle = params
        .get("handle")
        .ok_or(AppError::MissingRouteParameter("handle"))?;
    tracing::Span::current().record("handle", handle.as_str());

    let api = state.storefront();
    let request = query.page_request(PRODUCTS_PER_PAGE);
    let (header, collection) =
        tokio::join!(layout::header(&state), api.collection(handle, &request));
    let collection = collection?;

    let cart = layout::cart(&state, get_cart_id(&session).await);
    let mut page = StreamedPage::new();
    let return_to = format!("/collections/{handle}");
    let layout = LayoutView::new(
        &mut page,
        layout::page_title(&state, &format!("{} Collection", collection.title)),
        header,
        &cart,
        &return_to,
    );

    let template = CollectionTemplate {
        layout,
        collection: render_collection(&collection)?,
    };

    Ok(page.into_response(template.render()?))
}

fn render_collection(collection: &Collection) -> askama::Result<String> {
    let cards: Vec<ProductCardView> = collection
        .products
        .iter()
        .map(ProductCardView::from)
        .collect();
    let grid = ProductGridTemplate::new(&cards).render()?;

    let page_info = &collection.page_info;
    let pagination = PaginationTemplate {
        previous_url: page_info
            .has_previous_page
            .then_some(page_info.start_cursor.as_deref())
            .flatten()
            .map(|cursor| page_url(&collection.handle, cursor, "previous")),
        next_url: page_info
            .has_next_page
            .then_some(page_info.end_cursor.as_deref())
            .flatten()
            .map(|cursor| page_url(&collection.handle, cursor, "next")),
        grid: &grid,
    };

    let section = SectionView::new(SectionTheme::Plp, collection.title.clone())
        .with_copy(collection.description.clone());
    SectionTemplate {
        section: &section,
        body: &pagination.render()?,
    }
    .render()
}

fn page_url(handle: &str, cursor: &str, direction: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("cursor", cursor)
        .append_pair("direction", direction)
        .finish();
    format!("/collections/{handle}?{query}")
}
