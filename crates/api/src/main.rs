use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_api::capabilities::{Capabilities, UpstreamProxy};
use folio_api::clients::github::GithubClient;
use folio_api::clients::identity::AuthProviderClient;
use folio_api::clients::rpc::RpcClient;
use folio_api::clients::build_http_client;
use folio_api::config::ServerConfig;
use folio_api::pages::Templates;
use folio_api::router::build_app_router;
use folio_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        app_env = %config.app_env,
        "Loaded server configuration",
    );

    // --- Admin allow-list (immutable, shared by every admin check) ---
    let admins = Arc::new(config.admin_allow_list());
    tracing::info!(admins = admins.len(), "Admin allow-list loaded");

    // --- Templates ---
    let templates = Arc::new(Templates::load().expect("Failed to compile page templates"));

    // --- Outbound HTTP ---
    let http = build_http_client(Duration::from_secs(config.upstreams.timeout_secs))
        .expect("Failed to build reqwest HTTP client");

    let capabilities = Capabilities {
        auth: Arc::new(UpstreamProxy::new(
            "auth",
            config.upstreams.auth_url.clone(),
            http.clone(),
        )),
        jobs: Arc::new(UpstreamProxy::new(
            "jobs",
            config.upstreams.jobs_url.clone(),
            http.clone(),
        )),
        rpc: Arc::new(UpstreamProxy::new(
            "rpc",
            config.upstreams.rpc_url.clone(),
            http.clone(),
        )),
    };
    tracing::info!(
        auth = %config.upstreams.auth_url,
        jobs = %config.upstreams.jobs_url,
        rpc = %config.upstreams.rpc_url,
        "Capability upstreams configured",
    );

    let rpc = Arc::new(RpcClient::new(config.upstreams.rpc_url.clone(), http.clone()));

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        admins,
        templates,
        capabilities,
        courses: rpc.clone(),
        publisher: rpc,
        activity: Arc::new(GithubClient::new(config.github_api_url.clone(), http.clone())),
        identity_provider: Arc::new(AuthProviderClient::new(
            config.upstreams.auth_url.clone(),
            http,
        )),
    };

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
