/*
 * Responsibility
 * - 信頼境界のマーカー (X-Public / X-Caller-Id / X-Cliend-Id) の読み書き
 * - クライアントが偽装した identity ヘッダの除去
 * - query string からのトークン ID 取り出し
 *
 * Notes
 * - request が無い (None) 場合は失敗させず、安全側のデフォルト (false / 0 / None) を返す
 * - `x-cliend-id` の綴りは下流サービスとの互換のためそのまま
 */
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};

use crate::services::oauth::AccessToken;

pub const X_PUBLIC: HeaderName = HeaderName::from_static("x-public");
pub const X_CALLER_ID: HeaderName = HeaderName::from_static("x-caller-id");
pub const X_CLIENT_ID: HeaderName = HeaderName::from_static("x-cliend-id");

pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// `X-Public: true` (完全一致) のときだけ true
pub fn is_public<B>(req: Option<&Request<B>>) -> bool {
    req.is_some_and(|req| is_public_headers(req.headers()))
}

pub fn is_public_headers(headers: &HeaderMap) -> bool {
    headers.get(&X_PUBLIC).and_then(|v| v.to_str().ok()) == Some("true")
}

/// 呼び出しユーザー ID。無い・数値でない場合は 0 (未認証)
pub fn get_caller_id<B>(req: Option<&Request<B>>) -> i64 {
    req.map_or(0, |req| id_header(req.headers(), &X_CALLER_ID))
}

/// 発行クライアント ID。無い・数値でない場合は 0 (未認証)
pub fn get_client_id<B>(req: Option<&Request<B>>) -> i64 {
    req.map_or(0, |req| id_header(req.headers(), &X_CLIENT_ID))
}

pub(crate) fn id_header(headers: &HeaderMap, name: &HeaderName) -> i64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(0)
}

/// 上流から来た identity ヘッダを無条件で削除する (トークン解決の前に必ず呼ぶ)
pub fn strip_identity_headers<B>(req: Option<&mut Request<B>>) {
    let Some(req) = req else {
        return;
    };
    let headers = req.headers_mut();
    headers.remove(&X_CLIENT_ID);
    headers.remove(&X_CALLER_ID);
}

/// 解決済みトークンの identity をヘッダに書き込む (既存値は上書き)
pub fn write_identity<B>(req: Option<&mut Request<B>>, token: &AccessToken) {
    let Some(req) = req else {
        return;
    };
    let headers = req.headers_mut();
    headers.insert(X_CLIENT_ID, HeaderValue::from(token.client_id));
    headers.insert(X_CALLER_ID, HeaderValue::from(token.user_id));
}

/// `?access_token=...` を URL decode + trim して返す。空なら None
pub fn access_token_param<B>(req: Option<&Request<B>>) -> Option<String> {
    let query = req?.uri().query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == ACCESS_TOKEN_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str, headers: &[(&str, &str)]) -> Request<()> {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap()
    }

    #[test]
    fn absent_request_yields_zero_values() {
        assert!(!is_public::<()>(None));
        assert_eq!(get_caller_id::<()>(None), 0);
        assert_eq!(get_client_id::<()>(None), 0);
        assert_eq!(access_token_param::<()>(None), None);

        // Writers are no-ops.
        strip_identity_headers::<()>(None);
        write_identity::<()>(
            None,
            &AccessToken {
                id: "t1".into(),
                user_id: 1,
                client_id: 2,
            },
        );
    }

    #[test]
    fn public_marker_must_be_exactly_true() {
        assert!(is_public(Some(&request("/", &[("X-Public", "true")]))));
        assert!(!is_public(Some(&request("/", &[("X-Public", "TRUE")]))));
        assert!(!is_public(Some(&request("/", &[("X-Public", "1")]))));
        assert!(!is_public(Some(&request("/", &[]))));
    }

    #[test]
    fn identity_headers_parse_as_base10() {
        let req = request("/", &[("X-Caller-Id", "42"), ("X-Cliend-Id", "7")]);
        assert_eq!(get_caller_id(Some(&req)), 42);
        assert_eq!(get_client_id(Some(&req)), 7);
    }

    #[test]
    fn malformed_identity_headers_fall_back_to_zero() {
        let req = request("/", &[("X-Caller-Id", "abc"), ("X-Cliend-Id", " 7")]);
        assert_eq!(get_caller_id(Some(&req)), 0);
        assert_eq!(get_client_id(Some(&req)), 0);

        let req = request("/", &[("X-Caller-Id", "99999999999999999999")]);
        assert_eq!(get_caller_id(Some(&req)), 0);
    }

    #[test]
    fn strip_removes_every_identity_value() {
        let mut req = request(
            "/",
            &[
                ("X-Caller-Id", "1"),
                ("X-Caller-Id", "2"),
                ("X-Cliend-Id", "3"),
                ("X-Public", "true"),
            ],
        );

        strip_identity_headers(Some(&mut req));

        assert!(req.headers().get(&X_CALLER_ID).is_none());
        assert!(req.headers().get(&X_CLIENT_ID).is_none());
        assert!(is_public(Some(&req)));
    }

    #[test]
    fn write_identity_overwrites_existing_values() {
        let mut req = request("/", &[("X-Caller-Id", "1"), ("X-Caller-Id", "2")]);
        let token = AccessToken {
            id: "t1".into(),
            user_id: 42,
            client_id: 7,
        };

        write_identity(Some(&mut req), &token);

        let callers: Vec<_> = req.headers().get_all(&X_CALLER_ID).iter().collect();
        assert_eq!(callers, vec![&HeaderValue::from_static("42")]);
        assert_eq!(req.headers()[&X_CLIENT_ID], "7");
    }

    #[test]
    fn access_token_param_is_decoded_and_trimmed() {
        let req = request("/users?page=2&access_token=%20abc%2B1%20", &[]);
        assert_eq!(access_token_param(Some(&req)).as_deref(), Some("abc+1"));

        let req = request("/users?access_token=first&access_token=second", &[]);
        assert_eq!(access_token_param(Some(&req)).as_deref(), Some("first"));
    }

    #[test]
    fn blank_or_missing_access_token_is_none() {
        assert_eq!(access_token_param(Some(&request("/users", &[]))), None);
        assert_eq!(
            access_token_param(Some(&request("/users?access_token=", &[]))),
            None
        );
        assert_eq!(
            access_token_param(Some(&request("/users?access_token=+++", &[]))),
            None
        );
    }
}
