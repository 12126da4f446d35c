//! Shared test fixtures: claim trees, encoded tokens and principals.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};

use crate::claims::map_claims;
use crate::principal::{UserPrincipal, build_principal};
use crate::roles::derive_authorities;

pub const IAT: i64 = 1_625_097_600;
pub const EXP: i64 = 1_625_184_000;

pub fn claims() -> Value {
    json!({
        "sub": "abcd123",
        "iat": IAT,
        "exp": EXP,
        "user": {
            "id": 7,
            "firstName": "Farid",
            "lastName": "Tahmazov",
            "email": "farid@example.az",
            "rank": "Captain",
            "position": "Lead specialist",
            "directStructureId": 4,
            "role": {
                "id": 3,
                "name": "Directorate admin",
                "type": "DIRECTORATE_ADMIN",
                "permissions": {
                    "ORDER_READ": "INSTITUTION",
                    "ORDER_APPROVE": "DIRECTORATE",
                    "USER_READ": "PERSONAL"
                }
            }
        },
        "institution": {
            "id": 1,
            "name": "Ministry",
            "activityType": "PROVIDER",
            "rankType": "HEAD",
            "path": "1/2/3/4",
            "directorate": {
                "id": 2,
                "name": "Logistics",
                "activityType": "BOTH"
            }
        }
    })
}

pub fn token_from_text(payload: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    format!("{header}.{}.c2lnbmF0dXJl", URL_SAFE_NO_PAD.encode(payload))
}

pub fn token_for(tree: &Value) -> String {
    token_from_text(&tree.to_string())
}

fn principal_from(tree: &Value) -> UserPrincipal {
    let payload = map_claims(tree).expect("fixture claims map");
    let authorities = derive_authorities(&payload.role_type, payload.permissions.keys().map(String::as_str));
    build_principal(payload, authorities).expect("fixture claims resolve")
}

pub fn principal() -> UserPrincipal {
    principal_from(&claims())
}

/// A principal placed at `path` with the given `(permission, level)` grants.
pub fn principal_at(
    user_id: i64,
    institution_id: i32,
    directorate_id: Option<i64>,
    path: &str,
    grants: &[(&str, &str)],
) -> UserPrincipal {
    let mut tree = claims();
    tree["user"]["id"] = user_id.into();
    tree["institution"]["id"] = institution_id.into();
    tree["institution"]["path"] = path.into();
    tree["user"]["role"]["permissions"] = grants
        .iter()
        .map(|(permission, level)| (permission.to_string(), Value::from(*level)))
        .collect::<serde_json::Map<_, _>>()
        .into();
    match directorate_id {
        Some(id) => tree["institution"]["directorate"]["id"] = id.into(),
        None => tree["institution"]["directorate"] = Value::Null,
    }
    principal_from(&tree)
}
