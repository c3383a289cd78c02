/*
 * Responsibility
 * - ヘッダ検査とトークン解決をつなぐ (strip → token 取り出し → 解決 → 書き込み)
 * - 失敗の扱いを決める: 404 は「トークン無し」と同じ扱い、それ以外はそのまま返す
 */
use axum::http::Request;

use crate::error::AuthError;
use crate::middleware::oauth::headers::{
    access_token_param, strip_identity_headers, write_identity,
};
use crate::services::oauth::TokenResolver;
use crate::services::oauth::token::redact;

/// Authenticates `req` in place.
///
/// Returns `Ok(())` both when an identity was written and when the request
/// stays anonymous (no token, or the token does not exist). Any other
/// resolution failure is returned unchanged and the request must be rejected.
pub async fn authenticate<B>(
    req: Option<&mut Request<B>>,
    resolver: &dyn TokenResolver,
) -> Result<(), AuthError> {
    let Some(req) = req else {
        return Ok(());
    };

    // Inbound identity headers are never trusted.
    strip_identity_headers(Some(&mut *req));

    let Some(token_id) = access_token_param(Some(&*req)) else {
        return Ok(());
    };

    match resolver.resolve_token(&token_id).await {
        Ok(token) => {
            write_identity(Some(req), &token);
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            tracing::debug!(
                token = %redact(&token_id),
                backend = resolver.backend_name(),
                "access token not found, proceeding anonymously"
            );
            Ok(())
        }
        Err(err) => Err(err),
    }
}
