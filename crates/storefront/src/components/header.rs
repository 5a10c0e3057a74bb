//! Page header: shop name, primary menu and call-to-action links.

use crate::shopify::types::{HeaderData, MenuItem};

/// Menu shown when the shop has no header menu or the header query failed.
const FALLBACK_HEADER_MENU: [(&str, &str); 4] = [
    ("Collections", "/collections"),
    ("Blog", "/blogs/journal"),
    ("Policies", "/policies"),
    ("About", "/pages/about"),
];

/// A rendered menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLink {
    pub title: String,
    pub url: String,
}

/// Header display data for the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub shop_name: String,
    pub menu: Vec<MenuLink>,
    /// Label for the account link. Customer accounts are not wired up, so
    /// this is always "Sign in".
    pub account_label: &'static str,
}

impl HeaderView {
    /// Build the header from the (possibly failed) header query.
    ///
    /// `store_domain` is the configured `*.myshopify.com` domain; menu URLs
    /// pointing at it or at the shop's primary domain are reduced to their
    /// path.
    #[must_use]
    pub fn new(header: Option<&HeaderData>, site_title: &str, store_domain: &str) -> Self {
        let Some(header) = header else {
            return Self::fallback(site_title);
        };

        let menu = match &header.menu {
            Some(menu) if !menu.items.is_empty() => menu
                .items
                .iter()
                .filter_map(|item| menu_link(item, store_domain, &header.primary_domain_url))
                .collect(),
            _ => fallback_menu(),
        };

        Self {
            shop_name: header.shop_name.clone(),
            menu,
            account_label: "Sign in",
        }
    }

    /// Header used when the header query failed.
    #[must_use]
    pub fn fallback(site_title: &str) -> Self {
        Self {
            shop_name: site_title.to_string(),
            menu: fallback_menu(),
            account_label: "Sign in",
        }
    }
}

fn fallback_menu() -> Vec<MenuLink> {
    FALLBACK_HEADER_MENU
        .iter()
        .map(|(title, url)| MenuLink {
            title: (*title).to_string(),
            url: (*url).to_string(),
        })
        .collect()
}

fn menu_link(item: &MenuItem, store_domain: &str, primary_domain_url: &str) -> Option<MenuLink> {
    let url = item.url.as_deref()?;
    Some(MenuLink {
        title: item.title.clone(),
        url: normalize_menu_url(url, store_domain, primary_domain_url),
    })
}

/// Strip the origin from menu URLs on the shop's own domains.
fn normalize_menu_url(url: &str, store_domain: &str, primary_domain_url: &str) -> String {
    let internal = url.contains("myshopify.com")
        || (!store_domain.is_empty() && url.contains(store_domain))
        || (!primary_domain_url.is_empty() && url.contains(primary_domain_url));

    if !internal {
        return url.to_string();
    }

    url::Url::parse(url).map_or_else(|_| url.to_string(), |parsed| parsed.path().to_string())
}
