/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - oauth::apply (リクエスト認証), http::apply (横断的な HTTP 設定)
 */
pub mod http;
pub mod oauth;
