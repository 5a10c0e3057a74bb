//! Variant resolution for product pages.
//!
//! A product page request names a product handle and, optionally, a set of
//! option selections in its query string. Resolution decides which variant the
//! page renders, or that the client must be redirected to a canonical variant
//! URL first:
//!
//! ```text
//! default-title variant in eager set ──► DefaultFound
//! remote returned a selected variant ──► Direct
//! request fully pins an eager variant ─► Direct
//! otherwise ──────────────────────────► Redirect (302) to the first matching
//!                                        eager variant, else the first one
//! ```
//!
//! The redirect target always carries the chosen variant's full option set, so
//! resolving it again lands on `Direct` and never loops.

use crate::types::{ProductOption, SelectedOption};

use super::matching::{covers, is_default_variant, matches};
use super::query::{QueryParams, variant_url};
use super::VariantOptions;

/// Everything needed to resolve the selected variant of one product page.
#[derive(Debug)]
pub struct ResolveRequest<'a, V> {
    /// Product handle from the route.
    pub handle: &'a str,
    /// The product's option definitions.
    pub options: &'a [ProductOption],
    /// First page of variants, eagerly loaded with the product.
    pub variants: &'a [V],
    /// Variant the remote API selected for the requested options, if any.
    pub selected_variant: Option<&'a V>,
    /// Incoming query parameters, tracking parameters already removed.
    pub query: &'a QueryParams,
}

/// Outcome of variant resolution.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a, V> {
    /// The selection is already unambiguous; render this variant.
    Direct(&'a V),
    /// The product only has the store's default variant; render it.
    DefaultFound(&'a V),
    /// No variant is selected; send the client to this canonical URL.
    Redirect(VariantRedirect),
}

impl<'a, V> Resolution<'a, V> {
    /// The variant to render, unless this is a redirect.
    #[must_use]
    pub fn variant(&self) -> Option<&'a V> {
        match self {
            Self::Direct(variant) | Self::DefaultFound(variant) => Some(*variant),
            Self::Redirect(_) => None,
        }
    }
}

/// Redirect to a canonical variant URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRedirect {
    /// Relative path and query string (e.g., `/products/shirt?Color=Red&Size=M`).
    pub location: String,
}

/// Product data that cannot be resolved to any variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The product came back with no variants at all.
    #[error("product {0} has no variants")]
    NoVariants(String),
}

/// Resolve the variant a product page should render.
///
/// # Errors
///
/// Returns `ResolveError::NoVariants` if nothing was selected remotely and the
/// eager variant list is empty.
pub fn resolve<'a, V: VariantOptions>(
    request: &ResolveRequest<'a, V>,
) -> Result<Resolution<'a, V>, ResolveError> {
    if let Some(default) = request
        .variants
        .iter()
        .find(|variant| is_default_variant(variant.selected_options()))
    {
        return Ok(Resolution::DefaultFound(default));
    }

    if let Some(selected) = request.selected_variant {
        return Ok(Resolution::Direct(selected));
    }

    let first = request
        .variants
        .first()
        .ok_or_else(|| ResolveError::NoVariants(request.handle.to_string()))?;

    let requested = requested_options(request.options, request.query);

    if !requested.is_empty()
        && let Some(pinned) = request
            .variants
            .iter()
            .find(|variant| covers(&requested, variant.selected_options()))
    {
        return Ok(Resolution::Direct(pinned));
    }

    let target = request
        .variants
        .iter()
        .find(|variant| matches(variant.selected_options(), &requested))
        .unwrap_or(first);

    Ok(Resolution::Redirect(VariantRedirect {
        location: variant_url(request.handle, request.query, target.selected_options()),
    }))
}

/// The query parameters that name one of the product's options.
///
/// Without option definitions every parameter is treated as a selection.
#[must_use]
pub fn requested_options(options: &[ProductOption], query: &QueryParams) -> Vec<SelectedOption> {
    if options.is_empty() {
        return query.to_selected_options();
    }
    let names: Vec<&str> = options.iter().map(|option| option.name.as_str()).collect();
    query.selected_options_for(&names)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct TestVariant {
        id: &'static str,
        available: bool,
        options: Vec<SelectedOption>,
    }

    impl VariantOptions for TestVariant {
        fn selected_options(&self) -> &[SelectedOption] {
            &self.options
        }

        fn available_for_sale(&self) -> bool {
            self.available
        }
    }

    fn variant(id: &'static str, available: bool, pairs: &[(&str, &str)]) -> TestVariant {
        TestVariant {
            id,
            available,
            options: pairs
                .iter()
                .map(|(name, value)| SelectedOption::new(*name, *value))
                .collect(),
        }
    }

    fn shirt_options() -> Vec<ProductOption> {
        vec![
            ProductOption {
                name: "Color".to_string(),
                values: vec!["Red".to_string(), "Blue".to_string()],
            },
            ProductOption {
                name: "Size".to_string(),
                values: vec!["M".to_string(), "L".to_string()],
            },
        ]
    }

    fn shirt_variants() -> Vec<TestVariant> {
        vec![
            variant("red-m", true, &[("Color", "Red"), ("Size", "M")]),
            variant("red-l", false, &[("Color", "Red"), ("Size", "L")]),
        ]
    }

    fn redirect_location<V>(resolution: Resolution<'_, V>) -> String {
        match resolution {
            Resolution::Redirect(redirect) => redirect.location,
            Resolution::Direct(_) => panic!("expected redirect, got Direct"),
            Resolution::DefaultFound(_) => panic!("expected redirect, got DefaultFound"),
        }
    }

    #[test]
    fn test_default_title_variant_is_adopted_without_redirect() {
        let variants = vec![variant("default", true, &[("Title", "Default Title")])];
        let query = QueryParams::default();
        let request = ResolveRequest {
            handle: "gift-card",
            options: &[],
            variants: &variants,
            selected_variant: None,
            query: &query,
        };

        let resolution = resolve(&request).unwrap();
        assert!(matches!(resolution, Resolution::DefaultFound(v) if v.id == "default"));
    }

    #[test]
    fn test_default_title_overrides_remote_selection() {
        let variants = vec![variant("default", true, &[("Title", "Default Title")])];
        let other = variant("other", true, &[("Color", "Red")]);
        let query = QueryParams::parse("Color=Red");
        let request = ResolveRequest {
            handle: "gift-card",
            options: &[],
            variants: &variants,
            selected_variant: Some(&other),
            query: &query,
        };

        assert!(matches!(
            resolve(&request).unwrap(),
            Resolution::DefaultFound(v) if v.id == "default"
        ));
    }

    #[test]
    fn test_remote_selection_is_rendered_directly() {
        let options = shirt_options();
        let variants = shirt_variants();
        let query = QueryParams::parse("Color=Red&Size=L");
        let request = ResolveRequest {
            handle: "test-shirt",
            options: &options,
            variants: &variants,
            selected_variant: variants.get(1),
            query: &query,
        };

        assert!(matches!(
            resolve(&request).unwrap(),
            Resolution::Direct(v) if v.id == "red-l"
        ));
    }

    #[test]
    fn test_no_selection_redirects_to_first_variant() {
        let options = shirt_options();
        let variants = shirt_variants();
        let query = QueryParams::default();
        let request = ResolveRequest {
            handle: "test-shirt",
            options: &options,
            variants: &variants,
            selected_variant: None,
            query: &query,
        };

        assert_eq!(
            redirect_location(resolve(&request).unwrap()),
            "/products/test-shirt?Color=Red&Size=M"
        );
    }

    #[test]
    fn test_partial_selection_redirects_to_first_matching_variant() {
        let options = shirt_options();
        let variants = vec![
            variant("blue-m", true, &[("Color", "Blue"), ("Size", "M")]),
            variant("red-m", true, &[("Color", "Red"), ("Size", "M")]),
            variant("red-l", false, &[("Color", "Red"), ("Size", "L")]),
        ];
        let query = QueryParams::parse("Color=Red");
        let request = ResolveRequest {
            handle: "test-shirt",
            options: &options,
            variants: &variants,
            selected_variant: None,
            query: &query,
        };

        assert_eq!(
            redirect_location(resolve(&request).unwrap()),
            "/products/test-shirt?Color=Red&Size=M"
        );
    }

    #[test]
    fn test_redirect_keeps_foreign_params() {
        let options = shirt_options();
        let variants = shirt_variants();
        let query = QueryParams::parse("ref=newsletter&_pos=2&fbclid=abc").without_tracking();
        let request = ResolveRequest {
            handle: "test-shirt",
            options: &options,
            variants: &variants,
            selected_variant: None,
            query: &query,
        };

        assert_eq!(
            redirect_location(resolve(&request).unwrap()),
            "/products/test-shirt?ref=newsletter&Color=Red&Size=M"
        );
    }

    #[test]
    fn test_unmatched_selection_falls_back_to_first_variant() {
        let options = shirt_options();
        let variants = shirt_variants();
        let query = QueryParams::parse("Color=Purple");
        let request = ResolveRequest {
            handle: "test-shirt",
            options: &options,
            variants: &variants,
            selected_variant: None,
            query: &query,
        };

        assert_eq!(
            redirect_location(resolve(&request).unwrap()),
            "/products/test-shirt?Color=Red&Size=M"
        );
    }

    #[test]
    fn test_resolving_redirect_target_does_not_redirect_again() {
        let options = shirt_options();
        let variants = shirt_variants();
        let first = QueryParams::parse("Color=Red&ref=mail");
        let request = ResolveRequest {
            handle: "test-shirt",
            options: &options,
            variants: &variants,
            selected_variant: None,
            query: &first,
        };
        let location = redirect_location(resolve(&request).unwrap());

        let (_, query_string) = location.split_once('?').unwrap();
        let second = QueryParams::parse(query_string);
        let request = ResolveRequest {
            query: &second,
            ..request
        };

        assert!(matches!(
            resolve(&request).unwrap(),
            Resolution::Direct(v) if v.id == "red-m"
        ));
    }

    #[test]
    fn test_empty_variant_list_is_an_error() {
        let variants: Vec<TestVariant> = Vec::new();
        let query = QueryParams::default();
        let request = ResolveRequest {
            handle: "ghost",
            options: &[],
            variants: &variants,
            selected_variant: None,
            query: &query,
        };

        assert_eq!(
            resolve(&request).unwrap_err(),
            ResolveError::NoVariants("ghost".to_string())
        );
    }

    #[test]
    fn test_resolution_variant_accessor() {
        let variants = shirt_variants();
        let direct: Resolution<'_, TestVariant> = Resolution::Direct(&variants[0]);
        assert_eq!(direct.variant().map(|v| v.id), Some("red-m"));

        let redirect: Resolution<'_, TestVariant> = Resolution::Redirect(VariantRedirect {
            location: "/products/x".to_string(),
        });
        assert!(redirect.variant().is_none());
    }
}
