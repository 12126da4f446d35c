//! Single-entity scope checks.
//!
//! A check compares the principal's organizational scope against the scope
//! of one target entity, at the level the principal's role grants for the
//! required permission.

use serde::Serialize;
use thiserror::Error;

use orgscope_core::{DirectorateId, InstitutionId, StructurePath, UserId};

use crate::context::SecurityContext;
use crate::permissions::{Permission, PermissionLevel};
use crate::principal::UserPrincipal;

/// Denial of an authorization check. Every variant is a "forbidden"
/// outcome; the variant records why.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: no authenticated principal")]
    Unauthenticated,

    #[error("forbidden: permission '{permission}' not granted")]
    NotGranted { permission: Permission },

    #[error("forbidden: '{permission}' at {level} level does not cover the target")]
    OutOfScope {
        permission: Permission,
        level: PermissionLevel,
    },
}

/// Hierarchy attributes of the entity being accessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityScopeContext {
    pub user_id: UserId,
    pub structure_path: StructurePath,
    pub directorate_id: DirectorateId,
    pub institution_id: InstitutionId,
    /// Compare institution/directorate scope by path instead of by id.
    pub use_only_path: bool,
}

impl EntityScopeContext {
    pub fn new(
        user_id: UserId,
        structure_path: impl Into<StructurePath>,
        directorate_id: DirectorateId,
        institution_id: InstitutionId,
    ) -> Self {
        Self {
            user_id,
            structure_path: structure_path.into(),
            directorate_id,
            institution_id,
            use_only_path: false,
        }
    }

    pub fn path_only(mut self, use_only_path: bool) -> Self {
        self.use_only_path = use_only_path;
        self
    }
}

/// How institution and directorate scopes are written as path fragments.
///
/// Entity families with a different path layout override these.
pub trait PathResolver {
    fn institution_path(&self, institution_id: InstitutionId) -> String {
        institution_id.to_string()
    }

    fn directorate_path(&self, institution_id: InstitutionId, directorate_id: DirectorateId) -> String {
        format!("{institution_id}/{directorate_id}")
    }
}

/// `"<institution>"` and `"<institution>/<directorate>"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPaths;

impl PathResolver for DefaultPaths {}

/// Audit record of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeDecision {
    pub permission: Permission,
    pub level: Option<PermissionLevel>,
    pub granted: bool,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeResolver<P = DefaultPaths> {
    paths: P,
}

impl ScopeResolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: PathResolver> ScopeResolver<P> {
    pub fn with_paths(paths: P) -> Self {
        Self { paths }
    }

    /// Allow or deny `permission` on `entity` for the context's principal.
    pub fn check(
        &self,
        ctx: &SecurityContext,
        permission: Permission,
        entity: &EntityScopeContext,
    ) -> Result<(), AuthzError> {
        self.check_principal(ctx.principal(), permission, entity)
    }

    pub fn check_principal(
        &self,
        principal: Option<&UserPrincipal>,
        permission: Permission,
        entity: &EntityScopeContext,
    ) -> Result<(), AuthzError> {
        let result = self.evaluate(principal, permission, entity);
        if let Err(denial) = &result {
            tracing::debug!(%permission, %denial, "scope check denied");
        }
        result
    }

    pub fn is_allowed(&self, ctx: &SecurityContext, permission: Permission, entity: &EntityScopeContext) -> bool {
        self.check(ctx, permission, entity).is_ok()
    }

    /// Explain the decision [`ScopeResolver::check`] would make.
    pub fn explain(&self, ctx: &SecurityContext, permission: Permission, entity: &EntityScopeContext) -> ScopeDecision {
        let level = ctx.permission_level(permission);
        match self.evaluate(ctx.principal(), permission, entity) {
            Ok(()) => ScopeDecision {
                permission,
                level,
                granted: true,
                reason: match level {
                    Some(level) => format!("'{permission}' granted at {level} level covers the target"),
                    None => format!("'{permission}' granted"),
                },
            },
            Err(denial) => ScopeDecision {
                permission,
                level,
                granted: false,
                reason: denial.to_string(),
            },
        }
    }

    fn evaluate(
        &self,
        principal: Option<&UserPrincipal>,
        permission: Permission,
        entity: &EntityScopeContext,
    ) -> Result<(), AuthzError> {
        let principal = principal.ok_or(AuthzError::Unauthenticated)?;
        let level = principal
            .permission_level(permission)
            .ok_or(AuthzError::NotGranted { permission })?;

        if self.covers(principal, level, entity) {
            Ok(())
        } else {
            Err(AuthzError::OutOfScope { permission, level })
        }
    }

    fn covers(&self, principal: &UserPrincipal, level: PermissionLevel, entity: &EntityScopeContext) -> bool {
        let own_path = principal.structure_path();
        match level {
            PermissionLevel::System => true,
            PermissionLevel::Institution => {
                if entity.use_only_path {
                    contains_fragment(own_path, &self.paths.institution_path(principal.institution_id()))
                } else {
                    principal.institution_id() == entity.institution_id
                }
            }
            PermissionLevel::Directorate => match principal.directorate_id() {
                None => false,
                Some(own_directorate) if entity.use_only_path => {
                    let fragment = self
                        .paths
                        .directorate_path(principal.institution_id(), own_directorate);
                    contains_fragment(own_path, &fragment)
                }
                Some(own_directorate) => own_directorate == entity.directorate_id,
            },
            PermissionLevel::Structure => contains_fragment(own_path, entity.structure_path.as_str()),
            PermissionLevel::Personal => principal.id == entity.user_id,
        }
    }
}

/// Textual containment; an empty fragment never matches.
fn contains_fragment(path: &StructurePath, fragment: &str) -> bool {
    !fragment.is_empty() && path.contains(fragment)
}
