//! Closed vocabularies carried in token claims.
//!
//! Claims name roles, permissions and organization attributes as plain
//! strings. Each vocabulary is a fieldless enum whose wire form is the exact
//! (case-sensitive) variant name; unknown strings are rejected.

use thiserror::Error;

/// A claim string that does not belong to the expected vocabulary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{value}' is not a valid {vocabulary}")]
pub struct UnknownValue {
    pub vocabulary: &'static str,
    pub value: String,
}

impl UnknownValue {
    pub fn new(vocabulary: &'static str, value: impl Into<String>) -> Self {
        Self {
            vocabulary,
            value: value.into(),
        }
    }
}

/// Declare a closed vocabulary enum with `as_str`, `ALL`, `Display`,
/// `FromStr` and serde support. Variant order is the declaration order, so
/// `Ord` is meaningful where the vocabulary is ranked.
macro_rules! closed_vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::vocabulary::UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err($crate::vocabulary::UnknownValue::new(stringify!($name), other)),
                }
            }
        }
    };
}

pub(crate) use closed_vocabulary;
