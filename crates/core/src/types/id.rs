//! Newtype IDs for type-safe references to remote commerce objects.
//!
//! The commerce API identifies everything with opaque global IDs
//! (`gid://shopify/ProductVariant/123`). Use the `define_gid!` macro to wrap
//! them so a line ID can never be passed where a variant ID is expected.

/// Macro to define a type-safe global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use prier_core::define_gid;
/// define_gid!(ShopId);
/// define_gid!(MenuId);
///
/// let shop = ShopId::new("gid://shopify/Shop/1");
/// let menu = MenuId::new("gid://shopify/Menu/1");
///
/// // These are different types, so this won't compile:
/// // let _: ShopId = menu;
/// assert_eq!(shop.as_str(), "gid://shopify/Shop/1");
/// # let _ = menu;
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a global ID string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying ID string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the ID string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_gid!(ProductId);
define_gid!(VariantId);
define_gid!(CollectionId);
define_gid!(CartId);
define_gid!(CartLineId);
