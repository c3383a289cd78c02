/*
 * Responsibility
 * - Handler から見える「リクエストの identity」の型
 * - middleware がトークン解決後に request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - 0 は「未認証」を意味する (ヘッダが無い・parse できない場合も 0)
 */
use axum::http::HeaderMap;
use serde::Serialize;

use crate::middleware::oauth::headers::{X_CALLER_ID, X_CLIENT_ID, id_header};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestIdentity {
    pub client_id: i64,
    pub caller_id: i64,
}

impl RequestIdentity {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            client_id: id_header(headers, &X_CLIENT_ID),
            caller_id: id_header(headers, &X_CALLER_ID),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.caller_id != 0
    }
}
