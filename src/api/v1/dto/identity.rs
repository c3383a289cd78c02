use serde::Serialize;

use crate::api::v1::extractors::RequestIdentity;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub caller_id: i64,
    pub client_id: i64,
    pub authenticated: bool,
    pub public: bool,
}

impl MeResponse {
    pub fn new(identity: RequestIdentity, public: bool) -> Self {
        Self {
            caller_id: identity.caller_id,
            client_id: identity.client_id,
            authenticated: identity.is_authenticated(),
            public,
        }
    }
}
