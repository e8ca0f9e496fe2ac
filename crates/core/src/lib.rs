//! Domain rules for the Folio portfolio server.
//!
//! Everything in here is pure or trait-only: the HTTP crate (`folio-api`)
//! supplies the concrete clients and the request plumbing.

pub mod activity;
pub mod admin;
pub mod content;
pub mod course;
pub mod error;
pub mod layout;
pub mod listing;
pub mod resources;
pub mod sso;
