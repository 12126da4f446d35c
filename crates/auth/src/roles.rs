use std::borrow::Cow;

use serde::Serialize;

use crate::vocabulary::closed_vocabulary;

/// Marker prepended to the role type in the role authority.
pub const ROLE_PREFIX: &str = "ROLE_";

closed_vocabulary! {
    /// Kind of role a user holds.
    pub enum RoleType {
        SystemAdmin => "SYSTEM_ADMIN",
        InstitutionAdmin => "INSTITUTION_ADMIN",
        DirectorateAdmin => "DIRECTORATE_ADMIN",
        StructureAdmin => "STRUCTURE_ADMIN",
        Employee => "EMPLOYEE",
    }
}

/// Where an [`Authority`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityKind {
    /// `ROLE_<type>`, derived from the role type claim.
    Role,
    /// A permission key taken verbatim from the role's grants.
    Permission,
}

/// A granted authority string (`ROLE_<type>` or a permission name).
///
/// Authorities are opaque strings at this layer so that coarse
/// `has_authority` checks can run without resolving vocabularies. The kind
/// is fixed at construction: permission names such as `ROLE_READ` share the
/// role prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Authority {
    name: Cow<'static, str>,
    #[serde(skip)]
    kind: AuthorityKind,
}

impl Authority {
    /// A permission authority.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            kind: AuthorityKind::Permission,
        }
    }

    pub fn role(role_type: &str) -> Self {
        Self {
            name: Cow::Owned(format!("{ROLE_PREFIX}{role_type}")),
            kind: AuthorityKind::Role,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AuthorityKind {
        self.kind
    }

    pub fn is_role(&self) -> bool {
        self.kind == AuthorityKind::Role
    }
}

impl core::fmt::Display for Authority {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Derive authorities from raw claim strings: the role first, then one per
/// permission key in iteration order.
pub fn derive_authorities<'a, I>(role_type: &str, permission_keys: I) -> Vec<Authority>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut authorities = vec![Authority::role(role_type)];
    authorities.extend(
        permission_keys
            .into_iter()
            .map(|key| Authority::new(key.to_string())),
    );
    authorities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_authority_comes_first() {
        let authorities = derive_authorities("ADMIN", ["ORDER_READ", "USER_READ", "USER_EDIT"]);
        assert_eq!(authorities.len(), 4);
        assert_eq!(authorities[0].as_str(), "ROLE_ADMIN");
        assert!(authorities[0].is_role());
        assert_eq!(
            authorities[1..].iter().map(Authority::as_str).collect::<Vec<_>>(),
            vec!["ORDER_READ", "USER_READ", "USER_EDIT"]
        );
    }

    #[test]
    fn permissions_are_not_prefixed() {
        let authorities = derive_authorities("EMPLOYEE", ["REQUEST_READ"]);
        assert!(!authorities[1].is_role());
    }

    #[test]
    fn role_prefixed_permission_is_not_a_role() {
        let authorities = derive_authorities("EMPLOYEE", ["ROLE_READ", "ROLE_DELETE"]);
        assert_eq!(authorities[1].as_str(), "ROLE_READ");
        assert!(!authorities[1].is_role());
        assert_eq!(authorities[2].kind(), AuthorityKind::Permission);
        assert_eq!(authorities[0].kind(), AuthorityKind::Role);
        assert_ne!(Authority::new("ROLE_EMPLOYEE"), authorities[0]);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Authority::role("EMPLOYEE")).unwrap();
        assert_eq!(json, "\"ROLE_EMPLOYEE\"");
    }

    #[test]
    fn no_permissions_yields_only_the_role() {
        let authorities = derive_authorities("EMPLOYEE", std::iter::empty());
        assert_eq!(authorities, vec![Authority::role("EMPLOYEE")]);
    }

    #[test]
    fn role_types_parse_from_wire_names() {
        assert_eq!("DIRECTORATE_ADMIN".parse::<RoleType>().unwrap(), RoleType::DirectorateAdmin);
        assert!("ADMIN".parse::<RoleType>().is_err());
    }
}
