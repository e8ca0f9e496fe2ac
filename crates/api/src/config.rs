use std::fmt;
use std::str::FromStr;

use folio_core::admin::{AdminAllowList, DEFAULT_ADMIN_EMAILS};
use folio_core::course::{bounded_page_size, COURSE_PAGE_SIZE};
use folio_core::sso::RedirectTargets;

use crate::auth::session::SessionConfig;

/// Runtime mode. Only development logs RPC failures with their message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

impl AppEnv {
    pub fn is_development(&self) -> bool {
        matches!(self, AppEnv::Development)
    }
}

impl FromStr for AppEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "production" | "prod" => Ok(AppEnv::Production),
            "test" => Ok(AppEnv::Test),
            other => Err(format!("unknown APP_ENV '{other}'")),
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnv::Development => "development",
            AppEnv::Production => "production",
            AppEnv::Test => "test",
        };
        f.write_str(s)
    }
}

/// Base URLs of the external capability services.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Authentication provider (`/api/auth/*`, SSO completion).
    pub auth_url: String,
    /// Background-job runner (`/api/inngest`).
    pub jobs_url: String,
    /// Typed-RPC service (`/api/trpc/*`, course listing, content creation).
    pub rpc_url: String,
    /// Timeout for any single outbound call.
    pub timeout_secs: u64,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the session secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub app_env: AppEnv,
    pub session: SessionConfig,
    /// Admin emails. Loaded once; every admin check reads the same list.
    pub admin_emails: Vec<String>,
    pub upstreams: UpstreamConfig,
    pub sso: RedirectTargets,
    pub github_username: String,
    pub github_api_url: String,
    pub course_page_size: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `APP_ENV`               | `development`              |
    /// | `ADMIN_EMAILS`          | compiled default list      |
    /// | `AUTH_UPSTREAM_URL`     | `http://localhost:4001`    |
    /// | `JOBS_UPSTREAM_URL`     | `http://localhost:8288`    |
    /// | `RPC_UPSTREAM_URL`      | `http://localhost:4002`    |
    /// | `UPSTREAM_TIMEOUT_SECS` | `15`                       |
    /// | `SSO_SUCCESS_REDIRECT`  | `/`                        |
    /// | `SSO_FAILURE_REDIRECT`  | `/`                        |
    /// | `GITHUB_USERNAME`       | `sfilimon`                 |
    /// | `GITHUB_API_URL`        | `https://api.github.com`   |
    /// | `COURSE_PAGE_SIZE`      | `20`                       |
    ///
    /// # Panics
    ///
    /// Panics on malformed numeric values, an unknown `APP_ENV`, or a missing
    /// `SESSION_JWT_SECRET`.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(&env_or("CORS_ORIGINS", "http://localhost:3000"));

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let app_env: AppEnv = env_or("APP_ENV", "development")
            .parse()
            .unwrap_or_else(|e| panic!("APP_ENV is invalid: {e}"));

        let admin_emails = match std::env::var("ADMIN_EMAILS") {
            Ok(raw) if !raw.trim().is_empty() => split_list(&raw),
            _ => DEFAULT_ADMIN_EMAILS.iter().map(|e| e.to_string()).collect(),
        };

        let upstreams = UpstreamConfig {
            auth_url: env_or("AUTH_UPSTREAM_URL", "http://localhost:4001"),
            jobs_url: env_or("JOBS_UPSTREAM_URL", "http://localhost:8288"),
            rpc_url: env_or("RPC_UPSTREAM_URL", "http://localhost:4002"),
            timeout_secs: env_or("UPSTREAM_TIMEOUT_SECS", "15")
                .parse()
                .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64"),
        };

        let sso = RedirectTargets {
            success: env_or("SSO_SUCCESS_REDIRECT", "/"),
            fallback: env_or("SSO_FAILURE_REDIRECT", "/"),
        };

        let course_page_size: u32 = env_or("COURSE_PAGE_SIZE", &COURSE_PAGE_SIZE.to_string())
            .parse()
            .expect("COURSE_PAGE_SIZE must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_env,
            session: SessionConfig::from_env(),
            admin_emails,
            upstreams,
            sso,
            github_username: env_or("GITHUB_USERNAME", "sfilimon"),
            github_api_url: env_or("GITHUB_API_URL", "https://api.github.com"),
            course_page_size: bounded_page_size(course_page_size),
        }
    }

    /// Build the immutable allow-list shared by every admin check.
    pub fn admin_allow_list(&self) -> AdminAllowList {
        AdminAllowList::new(&self.admin_emails)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
