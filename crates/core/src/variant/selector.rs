//! Option selector state.
//!
//! Turns a product's options into clickable value links: each link points at
//! the current URL with one option changed, and knows whether it is the
//! active value and whether the resulting combination can be bought.

use crate::types::{ProductOption, SelectedOption};

use super::VariantOptions;
use super::matching::covers;
use super::query::{QueryParams, variant_url};

/// One option and the state of each of its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub name: String,
    pub values: Vec<OptionValueState>,
}

/// Render state for a single option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionValueState {
    pub value: String,
    /// The selected variant carries this value.
    pub is_active: bool,
    /// The combination this link selects is purchasable, or unknown.
    pub is_available: bool,
    /// Relative URL selecting this value.
    pub to: String,
}

/// Build selector groups for every option with more than one value.
///
/// `variants` is the full variant list once it has loaded. While it is
/// `None` every value is reported as available. A combination with no
/// matching variant is also reported as available; the add-to-cart control
/// is what blocks an impossible purchase.
#[must_use]
pub fn option_groups<V: VariantOptions>(
    handle: &str,
    options: &[ProductOption],
    selected_variant: Option<&V>,
    variants: Option<&[V]>,
    query: &QueryParams,
) -> Vec<OptionGroup> {
    let selected: &[SelectedOption] =
        selected_variant.map_or(&[], |variant| variant.selected_options());

    let mut base = query.clone();
    for option in selected {
        if base.get(&option.name).is_none() {
            base.set(&option.name, &option.value);
        }
    }

    options
        .iter()
        .filter(|option| option.values.len() > 1)
        .map(|option| OptionGroup {
            name: option.name.clone(),
            values: option
                .values
                .iter()
                .map(|value| value_state(handle, &option.name, value, selected, variants, &base))
                .collect(),
        })
        .collect()
}

fn value_state<V: VariantOptions>(
    handle: &str,
    name: &str,
    value: &str,
    selected: &[SelectedOption],
    variants: Option<&[V]>,
    base: &QueryParams,
) -> OptionValueState {
    let mut params = base.clone();
    params.set(name, value);
    let combination = params.to_selected_options();

    let is_available = variants
        .and_then(|variants| {
            variants
                .iter()
                .find(|variant| covers(&combination, variant.selected_options()))
        })
        .is_none_or(|variant| variant.available_for_sale());

    OptionValueState {
        value: value.to_string(),
        is_active: selected
            .iter()
            .any(|option| option.name == name && option.value == value),
        is_available,
        to: variant_url(handle, &params, &[]),
    }
}
