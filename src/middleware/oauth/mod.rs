//! access_token (query) → 認可サービスで解決 → identity をヘッダと extensions に載せる
//!
//! - トークンが無い / 認可サービスが 404 を返した場合は匿名のまま次へ進める
//! - それ以外の解決失敗は ErrorRecord としてそのまま返す (下流の handler には届かない)
//! - 認可 (保護リソースの拒否) は extractor 側 (`Authenticated`) の責務

pub mod authenticate;
pub mod headers;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::RequestIdentity;
use crate::error::AuthError;
use crate::state::AppState;

pub use authenticate::authenticate;

/// `/api/v1/*` にリクエスト認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::oauth::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, oauth_middleware))
}

async fn oauth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    if let Err(err) = authenticate(Some(&mut req), state.resolver.as_ref()).await {
        tracing::warn!(
            error = %err,
            status = err.status(),
            path = %req.uri().path(),
            "request authentication failed"
        );
        return Err(err);
    }

    // middleware → extractor への受け渡し (ヘッダを再 parse させない)
    let identity = RequestIdentity::from_headers(req.headers());
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
