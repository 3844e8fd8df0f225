mod claims;
mod error;
pub mod guard;
mod identity;
mod refresh;
mod session;

pub use claims::{RoleSet, TokenClaims};
pub use error::AuthError;
pub use guard::{guard, GuardDecision};
pub use identity::{IdentityProvider, OidcProvider, TokenSet};
pub use refresh::{SessionManager, TokenRefresher};
pub use session::{Session, SessionContext, SessionState};
