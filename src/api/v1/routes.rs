/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - リクエスト認証 (middleware::oauth) は app.rs で v1 全体に掛ける
 * - 匿名を拒否するかどうかは handler の extractor (Identity / Authenticated) で決める
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::identity::{me, private_resource};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/private", get(private_resource))
}
