//! In-memory `TokenResolver` double for tests.
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::services::oauth::{AccessToken, TokenResolver};

/// Answers every lookup with a fixed outcome and records the ids it saw.
pub struct StubResolver {
    outcome: Result<AccessToken, AuthError>,
    calls: Mutex<Vec<String>>,
}

impl StubResolver {
    pub fn new(outcome: Result<AccessToken, AuthError>) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn resolving(user_id: i64, client_id: i64) -> Self {
        Self::new(Ok(AccessToken {
            id: "t1".into(),
            user_id,
            client_id,
        }))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenResolver for StubResolver {
    fn backend_name(&self) -> &'static str {
        "stub"
    }

    async fn resolve_token(&self, token_id: &str) -> Result<AccessToken, AuthError> {
        self.calls.lock().unwrap().push(token_id.to_string());
        self.outcome.clone()
    }
}
