/*
 * Responsibility
 * - GET /health (疎通用、リクエスト認証の外側)
 * - 認可サービスへは問い合わせない (設定済みの backend 名だけ返す)
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "ok", "resolver": state.resolver.backend_name()})),
    )
}
