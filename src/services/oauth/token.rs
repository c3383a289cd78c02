use serde::{Deserialize, Serialize};

/// 認可サービスが発行済み・有効と判断したアクセストークン
///
/// - 認可サービスへの問い合わせ成功時にのみ生成される
/// - ローカルには保存しない (1 リクエストの認証中だけ生きる)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub id: String,
    pub user_id: i64,
    pub client_id: i64,
}

/// Log-safe prefix of a token identifier.
pub fn redact(token_id: &str) -> String {
    let prefix: String = token_id.chars().take(4).collect();
    format!("{prefix}…")
}
