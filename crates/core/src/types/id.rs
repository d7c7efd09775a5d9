//! Newtype IDs for backend row identifiers.
//!
//! The backend assigns `bigint` identity keys, so every ID wraps an `i64`.

/// Macro to define a type-safe row ID wrapper.
///
/// Creates a newtype around `i64` that serializes transparently, orders
/// numerically and converts to and from the raw value.
///
/// # Example
///
/// ```rust
/// # use souk_core::define_id;
/// define_id!(ProductId);
///
/// let id = ProductId::new(7);
/// assert_eq!(id.as_i64(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The raw row id, as used in backend filters.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(CategoryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_bare_number() {
        let json = serde_json::to_string(&CategoryId::new(42)).unwrap();
        assert_eq!(json, "42");

        let id: CategoryId = serde_json::from_str("42").unwrap();
        assert_eq!(id, CategoryId::new(42));
    }

    #[test]
    fn test_id_ordering_is_numeric() {
        assert!(CategoryId::new(9) < CategoryId::new(10));
    }
}
