/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - resolver: 認可サービスへのトークン問い合わせ (構築後は read-only)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::oauth::TokenResolver;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn TokenResolver>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("resolver", &self.resolver.backend_name())
            .finish()
    }
}

impl AppState {
    pub fn new(resolver: Arc<dyn TokenResolver>) -> Self {
        Self { resolver }
    }
}
