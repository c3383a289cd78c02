//! Token resolver interface used by the authentication middleware.
use async_trait::async_trait;

use crate::error::AuthError;
use crate::services::oauth::AccessToken;

/// Resolves a token identifier to the identity that owns it.
///
/// Outcomes:
/// - `Ok(token)`: the token exists and is valid
/// - `Err(AuthError::Relayed(_))`: the authorization service rejected it (404 included)
/// - `Err(AuthError::Internal { .. })`: the service was unreachable or broke its contract
///
/// Implementations are shared across in-flight requests and must not hold
/// per-request state.
#[async_trait]
pub trait TokenResolver: Send + Sync {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // `token_id` is trimmed and non-empty; callers skip the lookup otherwise.
    async fn resolve_token(&self, token_id: &str) -> Result<AccessToken, AuthError>;
}
