//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span, records `request_id`)
//! 3. Request ID (`x-request-id`)
//! 4. Session layer (tower-sessions, in-memory store)

pub mod request_id;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{clear_cart_id, create_session_layer, get_cart_id, set_cart_id};
