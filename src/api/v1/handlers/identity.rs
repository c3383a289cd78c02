/*
 * Responsibility
 * - GET /api/v1/me (匿名でも 200。解決済み identity をそのまま返す)
 * - GET /api/v1/private (Authenticated で匿名を 401 にする保護リソース)
 */
use axum::{Json, extract::Request};

use crate::api::v1::dto::identity::MeResponse;
use crate::api::v1::extractors::{Authenticated, Identity, RequestIdentity};
use crate::middleware::oauth::headers::is_public;

pub async fn me(Identity(identity): Identity, req: Request) -> Json<MeResponse> {
    Json(MeResponse::new(identity, is_public(Some(&req))))
}

pub async fn private_resource(Authenticated(identity): Authenticated) -> Json<RequestIdentity> {
    Json(identity)
}
