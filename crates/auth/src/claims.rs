//! Claim tree projection into a typed payload.
//!
//! The mapper walks fixed field paths and only checks presence and JSON
//! shape. Vocabulary values (role type, levels, activity types) stay as raw
//! strings here and are resolved by [`crate::principal`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use orgscope_core::{DirectorateId, InstitutionId, RoleId, StructureId, StructurePath, UserId};

use crate::token::ClaimTree;

/// Field names of the claim tree.
pub mod field {
    pub const SUB: &str = "sub";
    pub const IAT: &str = "iat";
    pub const EXP: &str = "exp";

    pub const USER: &str = "user";
    pub const ID: &str = "id";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const RANK: &str = "rank";
    pub const POSITION: &str = "position";
    pub const DIRECT_STRUCTURE_ID: &str = "directStructureId";

    pub const ROLE: &str = "role";
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const PERMISSIONS: &str = "permissions";

    pub const INSTITUTION: &str = "institution";
    pub const ACTIVITY_TYPE: &str = "activityType";
    pub const RANK_TYPE: &str = "rankType";
    pub const PATH: &str = "path";

    pub const DIRECTORATE: &str = "directorate";
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("missing or null required claim: {0}")]
    MissingRequiredClaim(String),

    #[error("claim {path} has the wrong type (expected {expected})")]
    InvalidClaimType { path: String, expected: &'static str },

    #[error("invalid value for {field}: '{value}'")]
    InvalidEnumValue { field: String, value: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Validated, flat projection of a claim tree.
///
/// Built only by [`map_claims`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPayload {
    pub subject: String,
    /// Epoch seconds.
    pub issued_at: i64,
    /// Epoch seconds.
    pub expiration_time: i64,

    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub rank: Option<String>,
    pub position: Option<String>,
    pub direct_structure_id: StructureId,

    pub role_id: RoleId,
    pub role_name: String,
    pub role_type: String,
    /// Permission name → raw level string.
    pub permissions: BTreeMap<String, String>,

    pub institution_id: InstitutionId,
    pub institution_name: String,
    pub institution_activity_type: String,
    pub institution_rank_type: String,
    pub structure_path: StructurePath,

    pub directorate_id: Option<DirectorateId>,
    pub directorate_name: Option<String>,
    pub directorate_activity_type: Option<String>,

    claims: ClaimTree,
}

impl TokenPayload {
    /// The claim tree this payload was mapped from.
    pub fn claims(&self) -> &ClaimTree {
        &self.claims
    }

    pub fn issued_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.issued_at, 0)
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expiration_time, 0)
    }

    pub fn validate_time_window(&self, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
        validate_time_window(self, now)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.validate_time_window(now), Err(TokenValidationError::Expired))
    }
}

/// Deterministically validate the `iat`/`exp` window.
///
/// Signature verification happens elsewhere.
pub fn validate_time_window(payload: &TokenPayload, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let (Some(issued_at), Some(expires_at)) = (payload.issued_at_utc(), payload.expires_at_utc()) else {
        return Err(TokenValidationError::InvalidTimeWindow);
    };
    if expires_at <= issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

/// Project a claim tree into a [`TokenPayload`].
pub fn map_claims(tree: &ClaimTree) -> Result<TokenPayload, ClaimsError> {
    let root = Node::root(tree);
    let user = root.child(field::USER);
    let role = user.child(field::ROLE);
    let institution = root.child(field::INSTITUTION);
    let directorate = institution.child(field::DIRECTORATE);

    Ok(TokenPayload {
        subject: root.require_text(field::SUB)?,
        issued_at: root.require_i64(field::IAT)?,
        expiration_time: root.require_i64(field::EXP)?,

        user_id: UserId::new(user.require_i64(field::ID)?),
        first_name: user.require_text(field::FIRST_NAME)?,
        last_name: user.require_text(field::LAST_NAME)?,
        email: user.require_text(field::EMAIL)?,
        rank: user.optional_text(field::RANK)?,
        position: user.optional_text(field::POSITION)?,
        direct_structure_id: StructureId::new(user.require_i64(field::DIRECT_STRUCTURE_ID)?),

        role_id: RoleId::new(role.require_i64(field::ID)?),
        role_name: role.require_text(field::NAME)?,
        role_type: role.require_text(field::TYPE)?,
        permissions: role.require_text_map(field::PERMISSIONS)?,

        institution_id: InstitutionId::new(institution.require_i32(field::ID)?),
        institution_name: institution.require_text(field::NAME)?,
        institution_activity_type: institution.require_text(field::ACTIVITY_TYPE)?,
        institution_rank_type: institution.require_text(field::RANK_TYPE)?,
        structure_path: StructurePath::new(institution.require_text(field::PATH)?),

        directorate_id: directorate.optional_i64(field::ID)?.map(DirectorateId::new),
        directorate_name: directorate.optional_text(field::NAME)?,
        directorate_activity_type: directorate.optional_text(field::ACTIVITY_TYPE)?,

        claims: tree.clone(),
    })
}

/// A position in the claim tree; `value` is `None` when the node is absent
/// or JSON `null`.
struct Node<'a> {
    value: Option<&'a Value>,
    path: String,
}

impl<'a> Node<'a> {
    fn root(tree: &'a Value) -> Self {
        Self {
            value: Some(tree).filter(|v| !v.is_null()),
            path: String::new(),
        }
    }

    fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn child(&self, key: &str) -> Node<'a> {
        Node {
            value: self.get(key),
            path: self.path_of(key),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.value.and_then(|v| v.get(key)).filter(|v| !v.is_null())
    }

    fn require(&self, key: &str) -> Result<&'a Value, ClaimsError> {
        self.get(key)
            .ok_or_else(|| ClaimsError::MissingRequiredClaim(self.path_of(key)))
    }

    fn require_text(&self, key: &str) -> Result<String, ClaimsError> {
        let text = as_text(self.require(key)?, || self.path_of(key))?;
        if text.trim().is_empty() {
            return Err(ClaimsError::MissingRequiredClaim(self.path_of(key)));
        }
        Ok(text)
    }

    fn optional_text(&self, key: &str) -> Result<Option<String>, ClaimsError> {
        self.get(key)
            .map(|v| as_text(v, || self.path_of(key)))
            .transpose()
    }

    fn require_i64(&self, key: &str) -> Result<i64, ClaimsError> {
        as_i64(self.require(key)?, || self.path_of(key))
    }

    fn optional_i64(&self, key: &str) -> Result<Option<i64>, ClaimsError> {
        self.get(key)
            .map(|v| as_i64(v, || self.path_of(key)))
            .transpose()
    }

    fn require_i32(&self, key: &str) -> Result<i32, ClaimsError> {
        let wide = self.require_i64(key)?;
        i32::try_from(wide).map_err(|_| ClaimsError::InvalidClaimType {
            path: self.path_of(key),
            expected: "32-bit integer",
        })
    }

    fn require_text_map(&self, key: &str) -> Result<BTreeMap<String, String>, ClaimsError> {
        let path = self.path_of(key);
        let Value::Object(entries) = self.require(key)? else {
            return Err(ClaimsError::InvalidClaimType { path, expected: "object" });
        };

        entries
            .iter()
            .map(|(name, value)| {
                let text = as_text(value, || format!("{path}.{name}"))?;
                Ok((name.clone(), text))
            })
            .collect()
    }
}

fn as_text(value: &Value, path: impl FnOnce() -> String) -> Result<String, ClaimsError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ClaimsError::InvalidClaimType {
            path: path(),
            expected: "text",
        }),
    }
}

fn as_i64(value: &Value, path: impl FnOnce() -> String) -> Result<i64, ClaimsError> {
    value.as_i64().ok_or_else(|| ClaimsError::InvalidClaimType {
        path: path(),
        expected: "integer",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::TimeZone;

    fn remove(tree: &mut Value, pointer: &str) {
        let (parent, key) = pointer.rsplit_once('/').unwrap();
        tree.pointer_mut(parent)
            .and_then(Value::as_object_mut)
            .unwrap()
            .remove(key);
    }

    #[test]
    fn maps_full_payload() {
        let payload = map_claims(&fixtures::claims()).unwrap();

        assert_eq!(payload.subject, "abcd123");
        assert_eq!(payload.issued_at, fixtures::IAT);
        assert_eq!(payload.expiration_time, fixtures::EXP);
        assert_eq!(payload.user_id, UserId::new(7));
        assert_eq!(payload.first_name, "Farid");
        assert_eq!(payload.last_name, "Tahmazov");
        assert_eq!(payload.email, "farid@example.az");
        assert_eq!(payload.rank.as_deref(), Some("Captain"));
        assert_eq!(payload.position.as_deref(), Some("Lead specialist"));
        assert_eq!(payload.direct_structure_id, StructureId::new(4));

        assert_eq!(payload.role_id, RoleId::new(3));
        assert_eq!(payload.role_name, "Directorate admin");
        assert_eq!(payload.role_type, "DIRECTORATE_ADMIN");
        assert_eq!(payload.permissions.get("ORDER_READ").map(String::as_str), Some("INSTITUTION"));
        assert_eq!(payload.permissions.len(), 3);

        assert_eq!(payload.institution_id, InstitutionId::new(1));
        assert_eq!(payload.institution_name, "Ministry");
        assert_eq!(payload.institution_activity_type, "PROVIDER");
        assert_eq!(payload.institution_rank_type, "HEAD");
        assert_eq!(payload.structure_path.as_str(), "1/2/3/4");

        assert_eq!(payload.directorate_id, Some(DirectorateId::new(2)));
        assert_eq!(payload.directorate_name.as_deref(), Some("Logistics"));
        assert_eq!(payload.directorate_activity_type.as_deref(), Some("BOTH"));

        assert_eq!(payload.claims(), &fixtures::claims());
    }

    #[test]
    fn missing_required_fields_are_named_by_path() {
        for (pointer, path) in [
            ("/sub", "sub"),
            ("/exp", "exp"),
            ("/user/id", "user.id"),
            ("/user/email", "user.email"),
            ("/user/directStructureId", "user.directStructureId"),
            ("/user/role/type", "user.role.type"),
            ("/user/role/permissions", "user.role.permissions"),
            ("/institution/path", "institution.path"),
            ("/institution/rankType", "institution.rankType"),
        ] {
            let mut tree = fixtures::claims();
            remove(&mut tree, pointer);
            assert_eq!(
                map_claims(&tree).unwrap_err(),
                ClaimsError::MissingRequiredClaim(path.to_string()),
                "removing {pointer}"
            );
        }
    }

    #[test]
    fn null_and_blank_required_values_count_as_missing() {
        let mut tree = fixtures::claims();
        tree["user"]["firstName"] = Value::Null;
        assert_eq!(
            map_claims(&tree).unwrap_err(),
            ClaimsError::MissingRequiredClaim("user.firstName".into())
        );

        let mut tree = fixtures::claims();
        tree["user"]["role"]["name"] = Value::from("   ");
        assert_eq!(
            map_claims(&tree).unwrap_err(),
            ClaimsError::MissingRequiredClaim("user.role.name".into())
        );
    }

    #[test]
    fn missing_parent_node_reports_first_required_child() {
        let mut tree = fixtures::claims();
        remove(&mut tree, "/user");
        assert_eq!(
            map_claims(&tree).unwrap_err(),
            ClaimsError::MissingRequiredClaim("user.id".into())
        );
    }

    #[test]
    fn optional_user_fields_may_be_absent() {
        let mut tree = fixtures::claims();
        remove(&mut tree, "/user/rank");
        tree["user"]["position"] = Value::Null;

        let payload = map_claims(&tree).unwrap();
        assert_eq!(payload.rank, None);
        assert_eq!(payload.position, None);
    }

    #[test]
    fn directorate_is_optional_as_a_whole() {
        let mut tree = fixtures::claims();
        remove(&mut tree, "/institution/directorate");
        let payload = map_claims(&tree).unwrap();
        assert_eq!(payload.directorate_id, None);
        assert_eq!(payload.directorate_name, None);
        assert_eq!(payload.directorate_activity_type, None);

        let mut tree = fixtures::claims();
        tree["institution"]["directorate"] = Value::Null;
        assert_eq!(map_claims(&tree).unwrap().directorate_id, None);
    }

    #[test]
    fn wrong_json_types_are_rejected() {
        let mut tree = fixtures::claims();
        tree["user"]["id"] = Value::from("seven");
        assert_eq!(
            map_claims(&tree).unwrap_err(),
            ClaimsError::InvalidClaimType { path: "user.id".into(), expected: "integer" }
        );

        let mut tree = fixtures::claims();
        tree["user"]["role"]["permissions"] = serde_json::json!(["ORDER_READ"]);
        assert_eq!(
            map_claims(&tree).unwrap_err(),
            ClaimsError::InvalidClaimType { path: "user.role.permissions".into(), expected: "object" }
        );

        let mut tree = fixtures::claims();
        tree["institution"]["id"] = Value::from(i64::from(i32::MAX) + 1);
        assert!(matches!(
            map_claims(&tree).unwrap_err(),
            ClaimsError::InvalidClaimType { path, .. } if path == "institution.id"
        ));
    }

    #[test]
    fn scalar_text_claims_accept_numbers() {
        let mut tree = fixtures::claims();
        tree["institution"]["path"] = Value::from(1);
        tree["user"]["role"]["permissions"] = serde_json::json!({ "ORDER_READ": 5 });

        let payload = map_claims(&tree).unwrap();
        assert_eq!(payload.structure_path.as_str(), "1");
        assert_eq!(payload.permissions["ORDER_READ"], "5");
    }

    #[test]
    fn empty_permission_object_is_valid() {
        let mut tree = fixtures::claims();
        tree["user"]["role"]["permissions"] = serde_json::json!({});
        assert!(map_claims(&tree).unwrap().permissions.is_empty());
    }

    #[test]
    fn time_window_is_validated() {
        let payload = map_claims(&fixtures::claims()).unwrap();
        let inside = Utc.timestamp_opt(fixtures::IAT + 60, 0).unwrap();
        let before = Utc.timestamp_opt(fixtures::IAT - 1, 0).unwrap();
        let after = Utc.timestamp_opt(fixtures::EXP, 0).unwrap();

        assert_eq!(payload.validate_time_window(inside), Ok(()));
        assert_eq!(payload.validate_time_window(before), Err(TokenValidationError::NotYetValid));
        assert_eq!(payload.validate_time_window(after), Err(TokenValidationError::Expired));
        assert!(payload.is_expired(after));
        assert!(!payload.is_expired(inside));
    }

    #[test]
    fn inverted_time_window_is_invalid() {
        let mut tree = fixtures::claims();
        tree["exp"] = Value::from(fixtures::IAT);
        let payload = map_claims(&tree).unwrap();
        let now = Utc.timestamp_opt(fixtures::IAT, 0).unwrap();
        assert_eq!(payload.validate_time_window(now), Err(TokenValidationError::InvalidTimeWindow));
    }
}
