//! Folio server library.
//!
//! Exposes the building blocks (config, state, error handling, capability
//! dispatch, pages, routes) so integration tests and the binary entrypoint
//! share them.

pub mod auth;
pub mod capabilities;
pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
