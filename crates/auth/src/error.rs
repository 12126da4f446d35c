//! Authentication pipeline error.

use thiserror::Error;

use crate::claims::ClaimsError;
use crate::token::TokenError;

/// Any failure turning a credential into a principal.
///
/// None of these are server faults: they describe the client's credential.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Claims(#[from] ClaimsError),
}
