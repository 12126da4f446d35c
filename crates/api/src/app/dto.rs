use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use orgscope_auth::{EntityScopeContext, Permission, PermissionLevel, UserPrincipal};
use orgscope_core::{DirectorateId, InstitutionId, StructureId, UserId};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeCheckRequest {
    pub permission: Permission,
    pub entity: EntityScopeRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityScopeRequest {
    pub user_id: UserId,
    pub structure_path: String,
    pub directorate_id: DirectorateId,
    pub institution_id: InstitutionId,
    #[serde(default)]
    pub use_only_path: bool,
}

impl From<EntityScopeRequest> for EntityScopeContext {
    fn from(req: EntityScopeRequest) -> Self {
        EntityScopeContext::new(req.user_id, req.structure_path, req.directorate_id, req.institution_id)
            .path_only(req.use_only_path)
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub rank: Option<String>,
    pub position: Option<String>,
    pub direct_structure_id: StructureId,
    pub role_name: String,
    pub role_type: String,
    pub institution_id: InstitutionId,
    pub institution_name: String,
    pub directorate_id: Option<DirectorateId>,
    pub structure_path: String,
    pub permissions: BTreeMap<Permission, PermissionLevel>,
    pub authorities: Vec<String>,
}

impl From<&UserPrincipal> for MeResponse {
    fn from(p: &UserPrincipal) -> Self {
        Self {
            id: p.id,
            full_name: p.full_name(),
            email: p.email.clone(),
            rank: p.rank.clone(),
            position: p.position.clone(),
            direct_structure_id: p.direct_structure_id,
            role_name: p.role.name.clone(),
            role_type: p.role.role_type.to_string(),
            institution_id: p.institution_id(),
            institution_name: p.institution.name.clone(),
            directorate_id: p.directorate_id(),
            structure_path: p.structure_path().to_string(),
            permissions: p.role.permissions.clone(),
            authorities: p.authorities.iter().map(|a| a.as_str().to_string()).collect(),
        }
    }
}
