/*!
 * Request identity extractor
 *
 * Responsibility:
 * - 認証 middleware が確定させた identity (caller / client) を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - RequestIdentity
 * - Identity (匿名でも成功する)
 * - Authenticated (匿名なら 401)
 */

mod core;
mod types;

pub use self::core::{Authenticated, Identity};
pub use self::types::RequestIdentity;
