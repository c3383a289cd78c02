/*
 * Responsibility
 * - 認証レイヤ共通のエラー型 (ErrorRecord / AuthError) 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - 認可サービスから中継したエラーも内部エラーも同じ ErrorRecord の形で返す
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// 構造化されたエラー本文
///
/// 認可サービスのエラーレスポンスと同じ JSON 形:
/// `{"message": "...", "status": 401, "error": "unauthorized", "causes": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(default)]
    pub message: String,
    pub status: u16,
    #[serde(default)]
    pub error: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub causes: Vec<String>,
}

// Remote services may send `"causes": null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ErrorRecord {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
            error: error.into(),
            causes: Vec::new(),
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_server_error",
            message,
        )
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// エラーとして返せない status (4xx/5xx 以外) は 500 に倒す
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorRecord {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// 内部エラーの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InternalKind {
    #[error("resolver unavailable")]
    ResolverUnavailable,
    #[error("malformed identity")]
    MalformedIdentity,
    #[error("malformed error body")]
    MalformedErrorBody,
}

/// トークン解決 / リクエスト認証の失敗
///
/// - `Relayed`: 認可サービスが返した ErrorRecord をそのまま中継する
/// - `Internal`: 認可サービスに届かない、もしくは契約違反のレスポンス (常に 500)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{}: {}", .0.status, .0.message)]
    Relayed(ErrorRecord),
    #[error("{kind}: {message}")]
    Internal { kind: InternalKind, message: String },
}

impl AuthError {
    pub fn internal(kind: InternalKind, message: impl Into<String>) -> Self {
        Self::Internal {
            kind,
            message: message.into(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            AuthError::Relayed(record) => record.status,
            AuthError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == StatusCode::NOT_FOUND.as_u16()
    }

    pub fn internal_kind(&self) -> Option<InternalKind> {
        match self {
            AuthError::Internal { kind, .. } => Some(*kind),
            AuthError::Relayed(_) => None,
        }
    }

    pub fn into_record(self) -> ErrorRecord {
        match self {
            AuthError::Relayed(record) => record,
            AuthError::Internal { kind, message } => {
                ErrorRecord::internal_server_error(message).with_cause(kind.to_string())
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.into_record().into_response()
    }
}
