//! Session middleware configuration.
//!
//! The session holds a single value: the id of the visitor's remote cart.

use prier_core::CartId;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "prier_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session keys.
pub mod keys {
    /// Key for storing the remote cart ID.
    pub const CART_ID: &str = "cart_id";
}

/// Create the session layer backed by an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// The visitor's cart ID, if one has been stored.
///
/// A corrupt or unreadable session value counts as no cart.
pub async fn get_cart_id(session: &Session) -> Option<CartId> {
    session
        .get::<CartId>(keys::CART_ID)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Failed to read cart id from session"))
        .ok()
        .flatten()
}

/// Store the visitor's cart ID.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn set_cart_id(
    session: &Session,
    cart_id: &CartId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART_ID, cart_id).await
}

/// Forget the visitor's cart, e.g. after it expired remotely.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn clear_cart_id(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CartId>(keys::CART_ID).await.map(|_| ())
}
