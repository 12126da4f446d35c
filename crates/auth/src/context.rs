//! Request-scoped authentication context.
//!
//! One value per request, installed by the transport layer and passed
//! explicitly to the resolver and predicate builder. There is no global
//! "current user".

use std::sync::Arc;

use orgscope_core::{DirectorateId, InstitutionId, StructurePath, UserId};

use crate::permissions::{Permission, PermissionLevel};
use crate::principal::UserPrincipal;

#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    principal: Option<Arc<UserPrincipal>>,
    bearer_token: Option<Arc<str>>,
}

impl SecurityContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// `bearer_token` is the raw credential, kept for outbound propagation.
    pub fn authenticated(principal: UserPrincipal, bearer_token: impl Into<Arc<str>>) -> Self {
        Self {
            principal: Some(Arc::new(principal)),
            bearer_token: Some(bearer_token.into()),
        }
    }

    pub fn principal(&self) -> Option<&UserPrincipal> {
        self.principal.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.principal().map(|p| p.id)
    }

    pub fn institution_id(&self) -> Option<InstitutionId> {
        self.principal().map(UserPrincipal::institution_id)
    }

    pub fn directorate_id(&self) -> Option<DirectorateId> {
        self.principal().and_then(UserPrincipal::directorate_id)
    }

    pub fn structure_path(&self) -> Option<&StructurePath> {
        self.principal().map(UserPrincipal::structure_path)
    }

    pub fn permission_level(&self, permission: Permission) -> Option<PermissionLevel> {
        self.principal().and_then(|p| p.permission_level(permission))
    }
}
