//! Option matching between a variant and a requested selection.

use crate::types::SelectedOption;

/// Option name the commerce platform gives single-variant products.
pub const DEFAULT_OPTION_NAME: &str = "Title";

/// Option value the commerce platform gives single-variant products.
pub const DEFAULT_OPTION_VALUE: &str = "Default Title";

/// Whether a variant's options satisfy a (possibly partial) requested selection.
///
/// Every requested entry must have a same-named entry on the variant with an
/// exactly equal value. Options absent from `requested` are not compared, so
/// an empty request matches every variant.
#[must_use]
pub fn matches(variant_options: &[SelectedOption], requested: &[SelectedOption]) -> bool {
    requested.iter().all(|wanted| {
        variant_options
            .iter()
            .any(|option| option.name == wanted.name && option.value == wanted.value)
    })
}

/// Whether `requested` fully pins down this variant.
///
/// Unlike [`matches`], every option the variant carries must be present in
/// the request. Extra requested entries are ignored.
#[must_use]
pub fn covers(requested: &[SelectedOption], variant_options: &[SelectedOption]) -> bool {
    !variant_options.is_empty() && matches(requested, variant_options)
}

/// Whether the variant is the store's canonical single-option default.
#[must_use]
pub fn is_default_variant(variant_options: &[SelectedOption]) -> bool {
    matches!(
        variant_options,
        [only] if only.name == DEFAULT_OPTION_NAME && only.value == DEFAULT_OPTION_VALUE
    )
}
