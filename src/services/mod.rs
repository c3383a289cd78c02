/*
 * Responsibility
 * - 外部サービスとの連携 (認可サービスへのトークン問い合わせ)
 */
pub mod oauth;
