use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Payload of an identity-provider access token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub realm_access: RoleSet,
    #[serde(default)]
    pub resource_access: HashMap<String, RoleSet>,
}

impl TokenClaims {
    /// Read the payload without checking the signature. The provider issued
    /// the token over TLS; only the claims are needed here.
    pub fn decode(token: &str) -> Result<Self, AuthError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
        Ok(data.claims)
    }

    pub fn realm_roles(&self) -> &[String] {
        &self.realm_access.roles
    }

    pub fn client_roles(&self, client_id: &str) -> &[String] {
        self.resource_access
            .get(client_id)
            .map(|r| r.roles.as_slice())
            .unwrap_or(&[])
    }

    /// Realm roles followed by client roles, without duplicates
    pub fn roles(&self, client_id: &str) -> Vec<String> {
        let mut roles: Vec<String> = Vec::new();
        for role in self.realm_roles().iter().chain(self.client_roles(client_id)) {
            if !roles.contains(role) {
                roles.push(role.clone());
            }
        }
        roles
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// Seconds left before expiry (negative once expired)
    pub fn seconds_left(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at().map(|exp| (exp - now).num_seconds())
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.preferred_username.as_deref())
            .unwrap_or(&self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn token(payload: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(b"not-the-provider-key"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_keycloak_payload() {
        let jwt = token(json!({
            "sub": "f3a1",
            "exp": 1_700_000_000,
            "preferred_username": "sophie",
            "email": "sophie.martin@example.com",
            "realm_access": { "roles": ["apprenant", "offline_access"] },
            "resource_access": {
                "talentup-frontend": { "roles": ["viewer", "apprenant"] },
                "account": { "roles": ["manage-account"] }
            }
        }));

        let claims = TokenClaims::decode(&jwt).unwrap();
        assert_eq!(claims.display_name(), "sophie");
        assert_eq!(
            claims.roles("talentup-frontend"),
            vec!["apprenant", "offline_access", "viewer"]
        );
        assert_eq!(claims.client_roles("unknown"), &[] as &[String]);
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_decode_minimal_payload() {
        let claims = TokenClaims::decode(&token(json!({ "sub": "x" }))).unwrap();
        assert!(claims.roles("any").is_empty());
        assert!(claims.seconds_left(Utc::now()).is_none());
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            TokenClaims::decode("not.a.jwt"),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
