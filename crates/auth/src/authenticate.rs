//! Credential → principal pipeline.

use crate::claims::map_claims;
use crate::error::AuthError;
use crate::principal::{UserPrincipal, build_principal};
use crate::roles::derive_authorities;
use crate::token::{ClaimTree, decode_lenient, decode_strict};

/// Authenticate a raw credential; every failure is an error.
pub fn authenticate_strict(token: &str) -> Result<UserPrincipal, AuthError> {
    let tree = decode_strict(token)?;
    principal_from_tree(&tree)
}

/// Authenticate a raw credential, treating an unparsable payload as "no
/// credential" (`Ok(None)`). Malformed tokens and invalid claims still fail.
pub fn authenticate_lenient(token: &str) -> Result<Option<UserPrincipal>, AuthError> {
    decode_lenient(token)?
        .map(|tree| principal_from_tree(&tree))
        .transpose()
}

fn principal_from_tree(tree: &ClaimTree) -> Result<UserPrincipal, AuthError> {
    let payload = map_claims(tree)?;
    let authorities = derive_authorities(&payload.role_type, payload.permissions.keys().map(String::as_str));
    Ok(build_principal(payload, authorities)?)
}
