//! External capability handlers.
//!
//! Once the router dispatches a request to a capability, that handler owns the
//! request entirely: there is no fallback to another handler and no retry.

pub mod upstream;

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::Request;
use axum::response::Response;

pub use upstream::UpstreamProxy;

/// A subsystem that fully handles every request under its path prefix.
#[async_trait]
pub trait CapabilityHandler: Send + Sync {
    /// Short name used in logs (`auth`, `jobs`, `rpc`).
    fn name(&self) -> &'static str;

    /// Handle the request unmodified and produce the response.
    async fn handle(&self, request: Request) -> Response;
}

/// The three capability handlers the router dispatches to.
#[derive(Clone)]
pub struct Capabilities {
    /// `/api/auth/*`
    pub auth: Arc<dyn CapabilityHandler>,
    /// `/api/inngest`
    pub jobs: Arc<dyn CapabilityHandler>,
    /// `/api/trpc/*`
    pub rpc: Arc<dyn CapabilityHandler>,
}
