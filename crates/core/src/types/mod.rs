//! Core types for the Prier storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod option;

pub use id::*;
pub use money::{Money, MoneyParseError};
pub use option::{ProductOption, SelectedOption};
