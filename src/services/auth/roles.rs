//! `roles` claim → granted authorities.
//!
//! Mapping:
//! - `ADMINAPP_SERVICE` → `ROLE_ADMINAPP_SERVICE`
//! - `RHAPP_SERVICE`    → `ROLE_RHAPP_SERVICE`
//!
//! A token without `roles` yields no authorities, so every role guard fails closed.
//! A `roles` claim of the wrong shape rejects the token instead of being read as "no roles".

use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;

use super::access_jwt::VerifiedToken;

pub const ROLES_CLAIM: &str = "roles";
pub const ROLE_PREFIX: &str = "ROLE_";

pub const ADMINAPP_SERVICE: &str = "ADMINAPP_SERVICE";
pub const RHAPP_SERVICE: &str = "RHAPP_SERVICE";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Authority(String);

impl Authority {
    pub fn from_role(role: &str) -> Self {
        Self(format!("{ROLE_PREFIX}{role}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleClaimError {
    #[error("'roles' claim must be an array of strings")]
    NotAnArray,
    #[error("'roles' claim contains a non-string entry at index {index}")]
    NonStringEntry { index: usize },
}

pub fn convert(token: &VerifiedToken) -> Result<BTreeSet<Authority>, RoleClaimError> {
    let Some(claim) = token.claim(ROLES_CLAIM) else {
        return Ok(BTreeSet::new());
    };

    let Value::Array(roles) = claim else {
        return Err(RoleClaimError::NotAnArray);
    };

    roles
        .iter()
        .enumerate()
        .map(|(index, role)| {
            role.as_str()
                .map(Authority::from_role)
                .ok_or(RoleClaimError::NonStringEntry { index })
        })
        .collect()
}

/// Guard predicate: does the authority set grant `role`?
pub fn has_role(authorities: &BTreeSet<Authority>, role: &str) -> bool {
    authorities.contains(&Authority::from_role(role))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn token(claims: Value) -> VerifiedToken {
        VerifiedToken::from_claims(claims.as_object().cloned().unwrap_or_default())
    }

    fn names(set: &BTreeSet<Authority>) -> Vec<&str> {
        set.iter().map(Authority::as_str).collect()
    }

    #[test]
    fn prefixes_each_role() {
        let set = convert(&token(json!({ "roles": ["ADMINAPP_SERVICE"] }))).unwrap();
        assert_eq!(names(&set), vec!["ROLE_ADMINAPP_SERVICE"]);
    }

    #[test]
    fn display_is_the_prefixed_name() {
        let authority = Authority::from_role("RHAPP_SERVICE");
        assert_eq!(authority.to_string(), authority.as_str());
        assert_eq!(authority.to_string(), "ROLE_RHAPP_SERVICE");
    }

    #[test]
    fn missing_or_null_roles_yield_empty_set() {
        assert!(convert(&token(json!({}))).unwrap().is_empty());
        assert!(convert(&token(json!({ "roles": null }))).unwrap().is_empty());
        assert!(convert(&token(json!({ "roles": [] }))).unwrap().is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let set = convert(&token(json!({
            "roles": ["RHAPP_SERVICE", "ADMINAPP_SERVICE", "RHAPP_SERVICE"]
        })))
        .unwrap();
        assert_eq!(
            names(&set),
            vec!["ROLE_ADMINAPP_SERVICE", "ROLE_RHAPP_SERVICE"]
        );
    }

    #[test]
    fn wrong_shape_is_rejected() {
        assert_eq!(
            convert(&token(json!({ "roles": "ADMINAPP_SERVICE" }))),
            Err(RoleClaimError::NotAnArray)
        );
        assert_eq!(
            convert(&token(json!({ "roles": { "ADMINAPP_SERVICE": true } }))),
            Err(RoleClaimError::NotAnArray)
        );
        assert_eq!(
            convert(&token(json!({ "roles": ["RHAPP_SERVICE", 7] }))),
            Err(RoleClaimError::NonStringEntry { index: 1 })
        );
    }

    #[test]
    fn has_role_checks_prefixed_membership() {
        let set = convert(&token(json!({ "roles": [RHAPP_SERVICE] }))).unwrap();
        assert!(has_role(&set, RHAPP_SERVICE));
        assert!(!has_role(&set, ADMINAPP_SERVICE));
        assert!(!has_role(&BTreeSet::new(), RHAPP_SERVICE));
    }
}
