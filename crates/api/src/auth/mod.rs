//! Session tokens issued by the external authentication provider.
//!
//! - [`session`] -- HS256 session JWT validation and cookie/header lookup.

pub mod session;
