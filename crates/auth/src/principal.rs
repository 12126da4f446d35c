//! Principal assembly: vocabulary resolution over a mapped payload.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

use orgscope_core::{DirectorateId, InstitutionId, RoleId, StructureId, StructurePath, UserId};

use crate::claims::{ClaimsError, TokenPayload, field};
use crate::organization::{ActivityType, DirectorateInfo, InstitutionInfo, RankType};
use crate::permissions::{Permission, PermissionLevel};
use crate::roles::{Authority, RoleType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRole {
    pub id: RoleId,
    pub name: String,
    pub role_type: RoleType,
    /// Exactly one granted level per permission.
    pub permissions: BTreeMap<Permission, PermissionLevel>,
}

/// The authenticated identity of one request.
///
/// Created once by [`build_principal`] and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPrincipal {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub rank: Option<String>,
    pub position: Option<String>,
    pub direct_structure_id: StructureId,
    pub role: UserRole,
    pub institution: InstitutionInfo,
    pub authorities: Vec<Authority>,
    payload: TokenPayload,
}

impl UserPrincipal {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn institution_id(&self) -> InstitutionId {
        self.institution.id
    }

    pub fn directorate_id(&self) -> Option<DirectorateId> {
        self.institution.directorate_id()
    }

    pub fn structure_path(&self) -> &StructurePath {
        &self.institution.path
    }

    pub fn permission_level(&self, permission: Permission) -> Option<PermissionLevel> {
        self.role.permissions.get(&permission).copied()
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a.as_str() == authority)
    }

    /// Whether the principal's institution provides services.
    pub fn is_provider(&self) -> bool {
        self.institution.activity_type.provides()
    }

    /// The payload this principal was built from.
    pub fn payload(&self) -> &TokenPayload {
        &self.payload
    }
}

/// Resolve every vocabulary string of `payload` and assemble the principal.
///
/// `authorities` are taken as given (see [`crate::roles::derive_authorities`]).
pub fn build_principal(payload: TokenPayload, authorities: Vec<Authority>) -> Result<UserPrincipal, ClaimsError> {
    let role = UserRole {
        id: payload.role_id,
        name: payload.role_name.clone(),
        role_type: resolve(&role_field(field::TYPE), &payload.role_type)?,
        permissions: resolve_permissions(&payload.permissions)?,
    };

    let directorate = payload
        .directorate_id
        .map(|id| -> Result<DirectorateInfo, ClaimsError> {
            Ok(DirectorateInfo {
                id,
                name: payload.directorate_name.clone(),
                activity_type: payload
                    .directorate_activity_type
                    .as_deref()
                    .map(|raw| resolve(&directorate_field(field::ACTIVITY_TYPE), raw))
                    .transpose()?,
            })
        })
        .transpose()?;

    let institution = InstitutionInfo {
        id: payload.institution_id,
        name: payload.institution_name.clone(),
        activity_type: resolve(&institution_field(field::ACTIVITY_TYPE), &payload.institution_activity_type)?,
        rank_type: resolve::<RankType>(&institution_field(field::RANK_TYPE), &payload.institution_rank_type)?,
        path: payload.structure_path.clone(),
        directorate,
    };

    tracing::debug!(
        user_id = %payload.user_id,
        role_type = %role.role_type,
        permissions = role.permissions.len(),
        "principal built"
    );

    Ok(UserPrincipal {
        id: payload.user_id,
        first_name: payload.first_name.clone(),
        last_name: payload.last_name.clone(),
        email: payload.email.clone(),
        rank: payload.rank.clone(),
        position: payload.position.clone(),
        direct_structure_id: payload.direct_structure_id,
        role,
        institution,
        authorities,
        payload,
    })
}

fn resolve_permissions(raw: &BTreeMap<String, String>) -> Result<BTreeMap<Permission, PermissionLevel>, ClaimsError> {
    let base = role_field(field::PERMISSIONS);
    raw.iter()
        .map(|(key, level)| {
            let permission: Permission = resolve(&base, key)?;
            let level: PermissionLevel = resolve(&format!("{base}.{key}"), level)?;
            Ok((permission, level))
        })
        .collect()
}

fn resolve<T>(field: &str, raw: &str) -> Result<T, ClaimsError>
where
    T: FromStr<Err = crate::vocabulary::UnknownValue>,
{
    raw.parse().map_err(|_| ClaimsError::InvalidEnumValue {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

fn role_field(name: &str) -> String {
    format!("{}.{}.{name}", field::USER, field::ROLE)
}

fn institution_field(name: &str) -> String {
    format!("{}.{name}", field::INSTITUTION)
}

fn directorate_field(name: &str) -> String {
    format!("{}.{}.{name}", field::INSTITUTION, field::DIRECTORATE)
}
