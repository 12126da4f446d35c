//! Strongly-typed identifiers of the organization hierarchy.
//!
//! Identifiers arrive as JSON integers inside token claims, so they wrap
//! integers rather than UUIDs. Institutions use a narrower integer type than
//! the other units.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a user (actor identity).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// Identifier of a role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(i64);

/// Identifier of an institution (top of an organization tree).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstitutionId(i32);

/// Identifier of a directorate inside an institution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectorateId(i64);

/// Identifier of a structural unit (the unit a user sits in directly).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructureId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $inner:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$inner> for $t {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$t> for $inner {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<$inner>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_int_newtype!(UserId, i64, "UserId");
impl_int_newtype!(RoleId, i64, "RoleId");
impl_int_newtype!(InstitutionId, i32, "InstitutionId");
impl_int_newtype!(DirectorateId, i64, "DirectorateId");
impl_int_newtype!(StructureId, i64, "StructureId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_integer_ids() {
        let id: InstitutionId = "17".parse().unwrap();
        assert_eq!(id, InstitutionId::new(17));
        assert_eq!(id.to_string(), "17");
        assert_eq!(i32::from(id), 17);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let err = "abc".parse::<UserId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(msg) if msg.starts_with("UserId")));
    }

    #[test]
    fn institution_id_rejects_out_of_range_values() {
        assert!("4294967296".parse::<InstitutionId>().is_err());
        assert!("4294967296".parse::<DirectorateId>().is_ok());
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&DirectorateId::new(456)).unwrap();
        assert_eq!(json, "456");

        let back: DirectorateId = serde_json::from_str("456").unwrap();
        assert_eq!(back.get(), 456);
    }
}
