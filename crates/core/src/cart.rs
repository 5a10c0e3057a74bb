//! Cart line arithmetic.
//!
//! These helpers only build the values cart forms submit. The remote cart
//! service owns the cart; whatever it returns replaces the local copy on the
//! next render.

use serde::{Deserialize, Serialize};

/// A discount code as reported by the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCode {
    pub code: String,
    /// Whether the code currently applies to the cart.
    pub applicable: bool,
}

/// Quantity targets for a cart line's +/- controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStep {
    pub quantity: u32,
    /// Quantity submitted by the increase control.
    pub increase: u32,
    /// Quantity submitted by the decrease control, `None` when disabled.
    pub decrease: Option<u32>,
}

impl QuantityStep {
    /// Compute the step targets for a line holding `quantity` units.
    ///
    /// Decreasing never submits 0. Removing a line is a separate request.
    #[must_use]
    pub const fn new(quantity: u32) -> Self {
        Self {
            quantity,
            increase: quantity.saturating_add(1),
            decrease: if quantity <= 1 {
                None
            } else {
                Some(quantity - 1)
            },
        }
    }

    /// Whether the decrease control is disabled.
    #[must_use]
    pub const fn decrease_disabled(&self) -> bool {
        self.decrease.is_none()
    }
}

/// Codes the cart reports as applicable, in cart order.
#[must_use]
pub fn active_codes(codes: &[DiscountCode]) -> Vec<String> {
    codes
        .iter()
        .filter(|code| code.applicable)
        .map(|code| code.code.clone())
        .collect()
}

/// The full code set to submit when applying `entered`.
///
/// Blank input resubmits the active set unchanged; a code already in the set
/// is not added twice.
#[must_use]
pub fn apply_discount_code(active: &[String], entered: &str) -> Vec<String> {
    let mut codes = active.to_vec();
    let entered = entered.trim();
    if !entered.is_empty() && !codes.iter().any(|code| code == entered) {
        codes.push(entered.to_string());
    }
    codes
}

/// The full code set to submit when removing discounts: always empty.
#[must_use]
pub const fn remove_discount_codes() -> Vec<String> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_step_at_one_disables_decrease() {
        let step = QuantityStep::new(1);
        assert_eq!(step.increase, 2);
        assert_eq!(step.decrease, None);
        assert!(step.decrease_disabled());
    }

    #[test]
    fn test_quantity_step_at_five() {
        let step = QuantityStep::new(5);
        assert_eq!(step.increase, 6);
        assert_eq!(step.decrease, Some(4));
        assert!(!step.decrease_disabled());
    }

    #[test]
    fn test_quantity_step_at_two_can_reach_one() {
        assert_eq!(QuantityStep::new(2).decrease, Some(1));
    }

    #[test]
    fn test_active_codes_skip_inapplicable() {
        let codes = vec![
            DiscountCode {
                code: "SAVE10".to_string(),
                applicable: true,
            },
            DiscountCode {
                code: "EXPIRED".to_string(),
                applicable: false,
            },
        ];
        assert_eq!(active_codes(&codes), vec!["SAVE10".to_string()]);
    }

    #[test]
    fn test_apply_appends_to_active_set() {
        let active = vec!["SAVE10".to_string()];
        assert_eq!(
            apply_discount_code(&active, "WELCOME"),
            vec!["SAVE10".to_string(), "WELCOME".to_string()]
        );
    }

    #[test]
    fn test_apply_ignores_blank_and_duplicate() {
        let active = vec!["SAVE10".to_string()];
        assert_eq!(apply_discount_code(&active, "  "), active);
        assert_eq!(apply_discount_code(&active, "SAVE10"), active);
    }

    #[test]
    fn test_remove_submits_empty_set() {
        assert!(remove_discount_codes().is_empty());
    }
}
