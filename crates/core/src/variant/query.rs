//! Query-string handling for variant URLs.

use url::form_urlencoded;

use crate::types::SelectedOption;

/// Query parameter name prefixes that are never option selections.
///
/// Predictive-search instrumentation (`_sid`, `_pos`, `_psq`, `_ss`, `_v`)
/// and third party click tracking (`fbclid`).
pub const TRACKING_PARAM_PREFIXES: &[&str] = &["_sid", "_pos", "_psq", "_ss", "_v", "fbclid"];

/// Whether a query parameter name belongs to search or click tracking.
#[must_use]
pub fn is_tracking_param(name: &str) -> bool {
    TRACKING_PARAM_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Ordered query parameters with `URLSearchParams`-style `set`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw query string (without the leading `?`).
    #[must_use]
    pub fn parse(query: &str) -> Self {
        Self {
            pairs: form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Drop search-instrumentation and tracking parameters.
    #[must_use]
    pub fn without_tracking(mut self) -> Self {
        self.pairs.retain(|(name, _)| !is_tracking_param(name));
        self
    }

    /// First value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set `name` to `value`.
    ///
    /// The first existing entry keeps its position and takes the new value,
    /// later duplicates are removed. A new name is appended.
    pub fn set(&mut self, name: &str, value: &str) {
        let mut seen = false;
        self.pairs.retain_mut(|(key, existing)| {
            if key.as_str() != name {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            value.clone_into(existing);
            true
        });
        if !seen {
            self.pairs.push((name.to_string(), value.to_string()));
        }
    }

    /// Set every option in `options`, in order.
    pub fn set_options(&mut self, options: &[SelectedOption]) {
        for option in options {
            self.set(&option.name, &option.value);
        }
    }

    /// All parameters as selected options.
    #[must_use]
    pub fn to_selected_options(&self) -> Vec<SelectedOption> {
        self.pairs
            .iter()
            .map(|(name, value)| SelectedOption::new(name.as_str(), value.as_str()))
            .collect()
    }

    /// Parameters whose names are among `option_names`.
    #[must_use]
    pub fn selected_options_for(&self, option_names: &[&str]) -> Vec<SelectedOption> {
        self.pairs
            .iter()
            .filter(|(name, _)| option_names.contains(&name.as_str()))
            .map(|(name, value)| SelectedOption::new(name.as_str(), value.as_str()))
            .collect()
    }

    /// Whether there are no parameters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serialize as `application/x-www-form-urlencoded`.
    #[must_use]
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// Canonical URL of a product variant.
///
/// Starts from `params` (already stripped of tracking parameters) and sets
/// each of the variant's options on top, so foreign parameters survive.
#[must_use]
pub fn variant_url(handle: &str, params: &QueryParams, options: &[SelectedOption]) -> String {
    let mut params = params.clone();
    params.set_options(options);
    let path = format!("/products/{handle}");
    if params.is_empty() {
        path
    } else {
        format!("{path}?{}", params.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_params_filtered() {
        let params =
            QueryParams::parse("Color=Red&_sid=abc&_pos=1&_psq=shirt&_ss=r&_v=1.0&fbclid=xyz&ref=mail")
                .without_tracking();
        assert_eq!(params.encode(), "Color=Red&ref=mail");
    }

    #[test]
    fn test_set_replaces_in_place_and_dedupes() {
        let mut params = QueryParams::parse("Size=S&Color=Red&Size=L");
        params.set("Size", "M");
        assert_eq!(params.encode(), "Size=M&Color=Red");
        params.set("Material", "Cotton");
        assert_eq!(params.encode(), "Size=M&Color=Red&Material=Cotton");
    }

    #[test]
    fn test_encoding_round_trip_of_spaces() {
        let params = QueryParams::parse("Size=Extra+Large");
        assert_eq!(params.get("Size"), Some("Extra Large"));
        assert_eq!(params.encode(), "Size=Extra+Large");
    }

    #[test]
    fn test_selected_options_for_known_names() {
        let params = QueryParams::parse("Color=Red&ref=mail&Size=M");
        let options = params.selected_options_for(&["Color", "Size"]);
        assert_eq!(
            options,
            vec![SelectedOption::new("Color", "Red"), SelectedOption::new("Size", "M")]
        );
    }

    #[test]
    fn test_variant_url() {
        let params = QueryParams::parse("Color=Red&ref=mail");
        let url = variant_url(
            "test-shirt",
            &params,
            &[SelectedOption::new("Color", "Red"), SelectedOption::new("Size", "M")],
        );
        assert_eq!(url, "/products/test-shirt?Color=Red&ref=mail&Size=M");
    }

    #[test]
    fn test_variant_url_without_params() {
        assert_eq!(
            variant_url("mug", &QueryParams::default(), &[]),
            "/products/mug"
        );
    }
}
