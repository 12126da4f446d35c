//! `orgscope-core`: organization hierarchy primitives.
//!
//! This crate contains **pure** identifiers and the structure path (no transport,
//! no token handling).

pub mod error;
pub mod id;
pub mod path;

pub use error::DomainError;
pub use id::{DirectorateId, InstitutionId, RoleId, StructureId, UserId};
pub use path::StructurePath;
