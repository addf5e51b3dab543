//! Strongly-typed record identifiers.
//!
//! Every record kind gets its own UUID newtype so a move id can never be
//! passed where a shipment id is expected. Domain crates declare their ids
//! with [`define_id!`](crate::define_id).

/// Declare a UUID-backed identifier newtype.
///
/// The generated type is `Copy`, hashable, serde-transparent, displays as the
/// bare UUID and parses from one (parse failures map to
/// [`DomainError::InvalidId`](crate::DomainError::InvalidId)).
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $t:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $t($crate::Uuid);

        impl $t {
            /// Create a new identifier (UUIDv7, time-ordered).
            pub fn new() -> Self {
                Self($crate::Uuid::now_v7())
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = <$crate::Uuid as core::str::FromStr>::from_str(s).map_err(|e| {
                    $crate::DomainError::invalid_id(format!("{}: {}", stringify!($t), e))
                })?;
                Ok(Self(uuid))
            }
        }
    };
}
