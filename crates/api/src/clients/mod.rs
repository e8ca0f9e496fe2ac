//! Outbound clients for the external collaborators.
//!
//! - [`rpc::RpcClient`] -- course listing and content creation over the typed-RPC service.
//! - [`github::GithubClient`] -- public activity feed.
//! - [`identity::AuthProviderClient`] -- SSO redirect completion.

pub mod github;
pub mod identity;
pub mod rpc;

use std::time::Duration;

/// Build the shared outbound HTTP client.
///
/// Every call made through it is bounded by `timeout`, so no page render or
/// callback waits on an upstream forever.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}
