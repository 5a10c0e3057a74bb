//! Prier Core - storefront domain logic.
//!
//! This crate holds the pieces of the storefront that do not touch the
//! network: catalog value types, variant resolution, cart form arithmetic and
//! the two-phase state used for deferred page sections.
//!
//! # Architecture
//!
//! No I/O, no HTTP clients, no templates. The `prier-storefront` crate
//! fetches data, feeds it through these functions and renders the result.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money and product option types
//! - [`variant`] - Option matching, variant resolution and selector state
//! - [`cart`] - Quantity steps and discount-code sets for cart forms
//! - [`deferred`] - `Pending | Resolved | Failed` state for secondary data

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod deferred;
pub mod types;
pub mod variant;

pub use deferred::DeferredState;
pub use types::*;
