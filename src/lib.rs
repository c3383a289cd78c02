//! Request-authentication interceptor.
//!
//! Resolves the `access_token` query parameter against a remote
//! authorization service and propagates the owning caller/client identity
//! as trusted request headers (`X-Caller-Id`, `X-Cliend-Id`).
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
