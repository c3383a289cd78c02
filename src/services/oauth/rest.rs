/*
 * Responsibility
 * - 認可サービスへの HTTP 問い合わせ (GET /oauth/access_token/{id})
 * - status code を見て AccessToken / ErrorRecord のどちらとして読むかを決める
 * - 通信失敗・契約違反 (parse できない body) は内部エラーに分類する
 *
 * Notes
 * - リトライはしない (全認証リクエストのホットパスに乗るため、短いタイムアウトで即失敗させる)
 */
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{AuthError, ErrorRecord, InternalKind};
use crate::services::oauth::token::redact;
use crate::services::oauth::{AccessToken, TokenResolver};

/// HTTP-backed token resolver.
///
/// `timeout` bounds both the connect phase and the whole exchange.
#[derive(Debug, Clone)]
pub struct RestTokenResolver {
    base_url: Url,
    client: Client,
}

impl RestTokenResolver {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // `{base}/oauth/access_token/{token_id}` with the id encoded as one segment.
    fn token_url(&self, token_id: &str) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["oauth", "access_token", token_id]);
        Some(url)
    }
}

#[async_trait]
impl TokenResolver for RestTokenResolver {
    fn backend_name(&self) -> &'static str {
        "rest"
    }

    async fn resolve_token(&self, token_id: &str) -> Result<AccessToken, AuthError> {
        let url = self.token_url(token_id).ok_or_else(|| {
            AuthError::internal(
                InternalKind::ResolverUnavailable,
                "invalid authorization service url",
            )
        })?;

        let response = self.client.get(url).send().await.map_err(|err| {
            tracing::warn!(
                error = %err,
                token = %redact(token_id),
                timeout = err.is_timeout(),
                "access token lookup failed"
            );
            AuthError::internal(
                InternalKind::ResolverUnavailable,
                "invalid restclient response when trying to get access token",
            )
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            tracing::warn!(error = %err, %status, "access token response body unreadable");
            AuthError::internal(
                InternalKind::ResolverUnavailable,
                "invalid restclient response when trying to get access token",
            )
        })?;

        let outcome = interpret(status, &body);
        match &outcome {
            Ok(token) => tracing::debug!(
                token = %redact(token_id),
                user_id = token.user_id,
                client_id = token.client_id,
                "access token resolved"
            ),
            Err(err) => tracing::debug!(
                token = %redact(token_id),
                %status,
                error = %err,
                "access token not resolved"
            ),
        }
        outcome
    }
}

/// Maps a raw authorization-service response onto the resolution outcome.
fn interpret(status: StatusCode, body: &[u8]) -> Result<AccessToken, AuthError> {
    if status.is_success() {
        return serde_json::from_slice::<AccessToken>(body).map_err(|err| {
            tracing::warn!(error = %err, %status, "unparseable access token payload");
            AuthError::internal(
                InternalKind::MalformedIdentity,
                "error when trying to unmarshal token",
            )
        });
    }

    match serde_json::from_slice::<ErrorRecord>(body) {
        Ok(record) => Err(AuthError::Relayed(record)),
        Err(err) => {
            tracing::warn!(error = %err, %status, "unparseable authorization error body");
            Err(AuthError::internal(
                InternalKind::MalformedErrorBody,
                "invalid json error interface when trying to get access token",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn resolver(base_url: &str, timeout: Duration) -> RestTokenResolver {
        RestTokenResolver::new(Url::parse(base_url).unwrap(), timeout).unwrap()
    }

    fn mock_resolver(server: &MockServer) -> RestTokenResolver {
        resolver(&server.base_url(), Duration::from_millis(500))
    }

    // ── Pure (no HTTP) ────────────────────────────────────────────────────────

    #[test]
    fn token_url_joins_base_and_encodes_id() {
        let r = resolver("http://localhost:8081", Duration::from_millis(200));
        assert_eq!(
            r.token_url("abc").unwrap().as_str(),
            "http://localhost:8081/oauth/access_token/abc"
        );
        assert_eq!(
            r.token_url("a/b c").unwrap().as_str(),
            "http://localhost:8081/oauth/access_token/a%2Fb%20c"
        );
    }

    #[test]
    fn token_url_keeps_base_path_prefix() {
        let r = resolver("http://gateway.internal/auth/", Duration::from_millis(200));
        assert_eq!(
            r.token_url("t1").unwrap().as_str(),
            "http://gateway.internal/auth/oauth/access_token/t1"
        );
    }

    #[test]
    fn interpret_success_requires_identity_payload() {
        let err = interpret(StatusCode::OK, br#"{"id":"t1"}"#).unwrap_err();
        assert_eq!(err.internal_kind(), Some(InternalKind::MalformedIdentity));
    }

    #[test]
    fn interpret_error_status_relays_record() {
        let err = interpret(
            StatusCode::FORBIDDEN,
            br#"{"message":"revoked","status":403,"error":"forbidden","causes":["revoked"]}"#,
        )
        .unwrap_err();

        match err {
            AuthError::Relayed(record) => {
                assert_eq!(record.status, 403);
                assert_eq!(record.message, "revoked");
                assert_eq!(record.causes, vec!["revoked".to_string()]);
            }
            other => panic!("expected relayed error, got {other:?}"),
        }
    }

    // ── httpmock tests ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn resolves_token_on_200() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/oauth/access_token/t1");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":"t1","user_id":42,"client_id":7}"#);
        });

        let token = mock_resolver(&server).resolve_token("t1").await.unwrap();

        assert_eq!(token.id, "t1");
        assert_eq!(token.user_id, 42);
        assert_eq!(token.client_id, 7);
        mock.assert();
    }

    #[tokio::test]
    async fn relays_not_found_record() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/oauth/access_token/missing");
            then.status(404)
                .header("content-type", "application/json")
                .body(r#"{"message":"access token not found","status":404,"error":"not_found"}"#);
        });

        let err = mock_resolver(&server)
            .resolve_token("missing")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(matches!(err, AuthError::Relayed(_)));
        mock.assert();
    }

    #[tokio::test]
    async fn relays_unauthorized_record_verbatim() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/oauth/access_token/expired");
            then.status(401)
                .header("content-type", "application/json")
                .body(r#"{"message":"token expired","status":401,"error":"unauthorized","causes":null}"#);
        });

        let err = mock_resolver(&server)
            .resolve_token("expired")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AuthError::Relayed(ErrorRecord::unauthorized("token expired"))
        );
    }

    #[tokio::test]
    async fn garbage_success_body_is_malformed_identity() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/oauth/access_token/t1");
            then.status(200).body("<html>ok</html>");
        });

        let err = mock_resolver(&server).resolve_token("t1").await.unwrap_err();

        assert_eq!(err.internal_kind(), Some(InternalKind::MalformedIdentity));
        assert_eq!(err.status(), 500);
    }

    #[tokio::test]
    async fn garbage_error_body_is_malformed_error_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/oauth/access_token/t1");
            then.status(502).body("bad gateway");
        });

        let err = mock_resolver(&server).resolve_token("t1").await.unwrap_err();

        assert_eq!(err.internal_kind(), Some(InternalKind::MalformedErrorBody));
    }

    #[tokio::test]
    async fn slow_service_times_out_as_unavailable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/oauth/access_token/t1");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .body(r#"{"id":"t1","user_id":42,"client_id":7}"#);
        });

        let r = resolver(&server.base_url(), Duration::from_millis(100));
        let err = r.resolve_token("t1").await.unwrap_err();

        assert_eq!(err.internal_kind(), Some(InternalKind::ResolverUnavailable));
    }

    #[tokio::test]
    async fn unreachable_service_is_unavailable() {
        // Grab a free port, then close it so nothing is listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let r = resolver(&format!("http://{addr}"), Duration::from_millis(200));
        let err = r.resolve_token("t1").await.unwrap_err();

        assert_eq!(err.internal_kind(), Some(InternalKind::ResolverUnavailable));
        assert!(!err.is_not_found());
    }
}
