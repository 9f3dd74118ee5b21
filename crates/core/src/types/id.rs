//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe wrappers around BSON
//! object ids that prevent accidentally mixing IDs from different entity
//! types. On the wire an id is always its 24-character hex form; inside a
//! document it is a raw `ObjectId`.

/// Error parsing an id from its hex form.
#[derive(Debug, thiserror::Error)]
#[error("invalid id: {0}")]
pub struct IdParseError(#[from] bson::oid::Error);

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around [`bson::oid::ObjectId`] with:
/// - `Serialize`/`Deserialize` as the 24-character hex string
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - `new()`, `generate()`, `parse()`, `as_object_id()`
/// - `From<ObjectId>` and `Into<ObjectId>` implementations
///
/// # Example
///
/// ```rust
/// # use quickbite_core::define_id;
/// define_id!(CustomerId);
/// define_id!(RestaurantId);
///
/// let customer_id = CustomerId::generate();
/// let restaurant_id = RestaurantId::generate();
///
/// // These are different types, so this won't compile:
/// // let _: CustomerId = restaurant_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(::bson::oid::ObjectId);

        impl $name {
            /// Wrap an existing object id.
            #[must_use]
            pub const fn new(id: ::bson::oid::ObjectId) -> Self {
                Self(id)
            }

            /// Generate a fresh id.
            #[must_use]
            pub fn generate() -> Self {
                Self(::bson::oid::ObjectId::new())
            }

            /// Parse an id from its 24-character hex form.
            ///
            /// # Errors
            ///
            /// Returns an error if the input is not valid object-id hex.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::types::id::IdParseError> {
                ::core::result::Result::Ok(Self(::bson::oid::ObjectId::parse_str(s)?))
            }

            /// The underlying object id.
            #[must_use]
            pub const fn as_object_id(&self) -> ::bson::oid::ObjectId {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0.to_hex())
            }
        }

        impl ::core::convert::From<::bson::oid::ObjectId> for $name {
            fn from(id: ::bson::oid::ObjectId) -> Self {
                Self(id)
            }
        }

        impl ::core::convert::From<$name> for ::bson::oid::ObjectId {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.collect_str(&self.0.to_hex())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let s = <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                ::bson::oid::ObjectId::parse_str(&s)
                    .map(Self)
                    .map_err(::serde::de::Error::custom)
            }
        }
    };
}

// Define standard entity IDs
define_id!(CustomerId);
define_id!(RestaurantId);
define_id!(OrderId);
