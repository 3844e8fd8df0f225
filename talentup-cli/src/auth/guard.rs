use super::Session;

/// Where unauthenticated users are sent
pub const LOGIN_ROUTE: &str = "/";
/// Where users without a required role are sent
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin(String),
    RedirectUnauthorized(String),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Decide whether `session` may enter a view protected by `required_roles`.
/// An empty role list only requires authentication.
pub fn guard(required_roles: &[String], session: &Session) -> GuardDecision {
    if !session.is_authenticated() {
        tracing::debug!("Guard: no session, redirecting to {}", LOGIN_ROUTE);
        return GuardDecision::RedirectToLogin(LOGIN_ROUTE.to_string());
    }

    let roles = session.roles();
    tracing::debug!(?roles, ?required_roles, "Guard: checking roles");

    if required_roles.is_empty() || required_roles.iter().any(|r| roles.contains(r)) {
        tracing::debug!("Guard: access granted");
        GuardDecision::Allow
    } else {
        tracing::debug!("Guard: missing role, redirecting to {}", UNAUTHORIZED_ROUTE);
        GuardDecision::RedirectUnauthorized(UNAUTHORIZED_ROUTE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{RoleSet, TokenClaims};
    use std::collections::HashMap;

    fn session_with(realm: &[&str], client: &[&str]) -> Session {
        let mut resource_access = HashMap::new();
        resource_access.insert(
            "talentup-frontend".to_string(),
            RoleSet {
                roles: client.iter().map(|r| r.to_string()).collect(),
            },
        );
        Session {
            access_token: Some("token".to_string()),
            refresh_token: None,
            claims: Some(TokenClaims {
                realm_access: RoleSet {
                    roles: realm.iter().map(|r| r.to_string()).collect(),
                },
                resource_access,
                ..TokenClaims::default()
            }),
            client_id: "talentup-frontend".to_string(),
        }
    }

    fn roles(values: &[&str]) -> Vec<String> {
        values.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_unauthenticated_goes_to_login() {
        let decision = guard(&roles(&["apprenant"]), &Session::anonymous("talentup-frontend"));
        assert_eq!(decision, GuardDecision::RedirectToLogin("/".to_string()));

        let decision = guard(&[], &Session::anonymous("talentup-frontend"));
        assert_eq!(decision, GuardDecision::RedirectToLogin("/".to_string()));
    }

    #[test]
    fn test_empty_requirement_allows_any_user() {
        assert!(guard(&[], &session_with(&[], &[])).is_allowed());
    }

    #[test]
    fn test_realm_or_client_role_grants_access() {
        let required = roles(&["apprenant", "admin"]);
        assert!(guard(&required, &session_with(&["admin"], &[])).is_allowed());
        assert!(guard(&required, &session_with(&[], &["apprenant"])).is_allowed());
    }

    #[test]
    fn test_other_client_roles_do_not_count() {
        let mut session = session_with(&[], &[]);
        if let Some(claims) = session.claims.as_mut() {
            claims.resource_access.insert(
                "other-app".to_string(),
                RoleSet {
                    roles: roles(&["apprenant"]),
                },
            );
        }
        assert!(!guard(&roles(&["apprenant"]), &session).is_allowed());
    }

    #[test]
    fn test_missing_role_is_unauthorized() {
        let required = roles(&["apprenant", "admin"]);
        assert_eq!(
            guard(&required, &session_with(&["formateur"], &["viewer"])),
            GuardDecision::RedirectUnauthorized("/unauthorized".to_string())
        );
    }
}
