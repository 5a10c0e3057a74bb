//! Product variant selection.
//!
//! - [`matching`] - Option matching between variants and requested selections
//! - [`query`] - Query-string handling and canonical variant URLs
//! - [`resolver`] - Picks the variant a product page renders, or a redirect
//! - [`selector`] - Per-value state for the option selector UI

pub mod matching;
pub mod query;
pub mod resolver;
pub mod selector;

pub use matching::{covers, is_default_variant, matches};
pub use query::{QueryParams, variant_url};
pub use resolver::{ResolveError, ResolveRequest, Resolution, VariantRedirect, resolve};
pub use selector::{OptionGroup, OptionValueState, option_groups};

use crate::types::SelectedOption;

/// Anything that carries a variant's option set and stock state.
///
/// Implemented by the storefront's variant model so the resolver and
/// selector never depend on the API's wire types.
pub trait VariantOptions {
    /// The option name/value pairs identifying this variant.
    fn selected_options(&self) -> &[SelectedOption];

    /// Whether the variant can currently be purchased.
    fn available_for_sale(&self) -> bool;
}

impl<T: VariantOptions> VariantOptions for &T {
    fn selected_options(&self) -> &[SelectedOption] {
        (**self).selected_options()
    }

    fn available_for_sale(&self) -> bool {
        (**self).available_for_sale()
    }
}
