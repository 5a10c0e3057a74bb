//! Conversions from Storefront API wire types into domain types.

mod cart;
mod collections;
mod products;

pub use cart::{convert_cart, convert_user_errors};
pub use collections::{convert_collection, convert_collection_item};
pub use products::{convert_product, convert_product_item, convert_variant};

use prier_core::{Money, SelectedOption};

use crate::shopify::types::{HeaderData, Image, Menu, MenuItem, PageInfo};

use super::queries::header;
use super::responses::{
    ImageFields, MenuItemFields, MoneyFields, PageInfoFields, SelectedOptionFields,
};

// =============================================================================
// Shared Fields
// =============================================================================

fn convert_money(money: MoneyFields) -> Money {
    Money::new(money.amount, money.currency_code)
}

fn convert_image(image: ImageFields) -> Image {
    Image {
        id: image.id,
        url: image.url,
        alt_text: image.alt_text,
        width: image.width,
        height: image.height,
    }
}

fn convert_selected_options(options: Vec<SelectedOptionFields>) -> Vec<SelectedOption> {
    options
        .into_iter()
        .map(|o| SelectedOption::new(o.name, o.value))
        .collect()
}

fn convert_page_info(page_info: PageInfoFields) -> PageInfo {
    PageInfo {
        has_next_page: page_info.has_next_page,
        has_previous_page: page_info.has_previous_page,
        start_cursor: page_info.start_cursor,
        end_cursor: page_info.end_cursor,
    }
}

// =============================================================================
// Header
// =============================================================================

pub fn convert_header(data: header::ResponseData) -> HeaderData {
    HeaderData {
        shop_name: data.shop.name,
        primary_domain_url: data.shop.primary_domain.url,
        menu: data.menu.map(|menu| Menu {
            id: menu.id,
            items: menu.items.into_iter().map(convert_menu_item).collect(),
        }),
    }
}

fn convert_menu_item(item: MenuItemFields) -> MenuItem {
    MenuItem {
        id: item.id,
        title: item.title,
        url: item.url,
        items: item.items.into_iter().map(convert_menu_item).collect(),
    }
}
