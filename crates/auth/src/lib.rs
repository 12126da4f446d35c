//! `orgscope-auth`: bearer claims extraction and hierarchy-aware authorization.
//!
//! This crate knows nothing about HTTP or storage. It works on an
//! already-trusted credential: signature verification happens elsewhere.
//!
//! Pipeline: [`token`] decodes the wire credential, [`claims`] projects the
//! claim tree into a [`TokenPayload`], [`principal`] resolves it into a
//! [`UserPrincipal`]. [`scope`] answers single-entity checks and [`filter`]
//! turns the same rules into query predicates.

pub mod authenticate;
pub mod claims;
pub mod context;
pub mod error;
pub mod filter;
pub mod organization;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod scope;
pub mod token;
pub mod vocabulary;

#[cfg(test)]
pub(crate) mod fixtures;

pub use authenticate::{authenticate_lenient, authenticate_strict};
pub use claims::{ClaimsError, TokenPayload, TokenValidationError, map_claims, validate_time_window};
pub use context::SecurityContext;
pub use error::AuthError;
pub use filter::{
    Column, FieldSource, FilterValue, Predicate, ScopedFilter, SqlFragment, filter_with_permission,
    scope_predicate,
};
pub use organization::{ActivityType, DirectorateInfo, InstitutionInfo, RankType};
pub use permissions::{Permission, PermissionLevel};
pub use principal::{UserPrincipal, UserRole, build_principal};
pub use roles::{Authority, AuthorityKind, ROLE_PREFIX, RoleType, derive_authorities};
pub use scope::{AuthzError, DefaultPaths, EntityScopeContext, PathResolver, ScopeDecision, ScopeResolver};
pub use token::{ClaimTree, TokenError, decode_lenient, decode_payload, decode_strict, extract_bearer};
pub use vocabulary::UnknownValue;
