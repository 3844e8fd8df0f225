use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not logged in. Run `talentup login` first")]
    NotAuthenticated,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("No refresh token available")]
    MissingRefreshToken,
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("Identity provider error: {0}")]
    Provider(String),
    #[error("Failed to persist session: {0}")]
    Persistence(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AuthError::InvalidToken(err.to_string())
    }
}
