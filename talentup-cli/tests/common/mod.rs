#![allow(dead_code)]

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub const CLIENT_ID: &str = "talentup-frontend";
pub const TOKEN_PATH: &str = "/realms/talentup/protocol/openid-connect/token";
pub const LOGOUT_PATH: &str = "/realms/talentup/protocol/openid-connect/logout";

/// Signed access token; only the claims matter to the client
pub fn access_token(username: &str, roles: &[&str], expires_in: i64) -> String {
    let claims = json!({
        "sub": format!("{}-id", username),
        "exp": Utc::now().timestamp() + expires_in,
        "preferred_username": username,
        "name": format!("{} Test", username),
        "realm_access": { "roles": roles },
    });
    sign(&claims)
}

pub fn sign(claims: &Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

pub fn token_response(access_token: &str, refresh_token: &str) -> String {
    json!({
        "access_token": access_token,
        "refresh_token": refresh_token,
        "expires_in": 300,
        "token_type": "Bearer",
    })
    .to_string()
}

/// Config file with the mock source, optional identity url and tokens
pub fn write_config(dir: &Path, identity_url: Option<&str>, token: Option<&str>) -> PathBuf {
    let mut contents = String::from("[api]\nsource = \"mock\"\nmock_latency_ms = 0\n\n");
    if let Some(url) = identity_url {
        contents.push_str(&format!("[identity]\nurl = \"{}\"\n\n", url));
    }
    if let Some(token) = token {
        contents.push_str(&format!(
            "[auth]\ntoken = \"{}\"\nrefresh_token = \"refresh-1\"\n",
            token
        ));
    }

    let path = dir.join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}
