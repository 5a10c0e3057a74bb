//! Prier storefront library.
//!
//! Streaming server-rendered storefront backed by the Shopify Storefront
//! API. Exposed as a library so the router can be driven in tests with a
//! fake [`shopify::StorefrontApi`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod deferred;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod shopify;
pub mod state;
