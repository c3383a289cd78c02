use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ErrorRecord;
use crate::state::AppState;

use super::RequestIdentity;

/// Handler で RequestIdentity を受け取るための extractor (匿名でも成功する)
/// middleware が extensions に insert 済みの値だけを使う。無ければ匿名 (ヘッダは読まない)
pub struct Identity(pub RequestIdentity);

impl FromRequestParts<AppState> for Identity
where
    AppState: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Identity(
            parts
                .extensions
                .get::<RequestIdentity>()
                .copied()
                .unwrap_or_default(),
        ))
    }
}

/// 保護リソース用の extractor
/// middleware が caller を解決済みのリクエストだけ通す。それ以外は 401
/// (middleware 未適用で extensions に無い場合も 401。`X-Public` は考慮しない)
pub struct Authenticated(pub RequestIdentity);

impl FromRequestParts<AppState> for Authenticated
where
    AppState: Send + Sync,
{
    type Rejection = ErrorRecord;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<RequestIdentity>().copied() {
            Some(identity) if identity.is_authenticated() => Ok(Authenticated(identity)),
            Some(_) => {
                tracing::debug!(path = %parts.uri.path(), "anonymous request to protected resource");
                Err(ErrorRecord::unauthorized("a valid access_token is required"))
            }
            None => {
                tracing::warn!(
                    path = %parts.uri.path(),
                    "protected resource reached without authentication middleware"
                );
                Err(ErrorRecord::unauthorized("a valid access_token is required"))
            }
        }
    }
}
