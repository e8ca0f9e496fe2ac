//! Session and admin middleware.
//!
//! - [`auth::Viewer`] -- The current viewer plus admin gate output (never rejects).
//! - [`auth::AuthUser`] -- Requires a valid session.
//! - [`admin::RequireAdmin`] -- Requires an allow-listed session.
//! - [`admin::require_admin`] -- Interception layer for the `/admin` subtree.

pub mod admin;
pub mod auth;
