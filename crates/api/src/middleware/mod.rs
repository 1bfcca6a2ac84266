//! Request extractors and tower layers.
//!
//! - [`auth::AuthUser`] -- Resolves the bearer token to an active account.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireEditor`] -- Requires `editor` or `admin`.
//! - [`language::ContentLanguage`] -- Negotiated display language.

pub mod auth;
pub mod cors;
pub mod language;
pub mod rbac;
pub mod request_tracing;
