use std::sync::Arc;

use folio_core::activity::ActivitySource;
use folio_core::admin::AdminAllowList;
use folio_core::content::ContentPublisher;
use folio_core::course::CourseSource;
use folio_core::sso::IdentityProvider;

use crate::capabilities::Capabilities;
use crate::config::ServerConfig;
use crate::pages::Templates;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// The single allow-list instance behind every admin check.
    pub admins: Arc<AdminAllowList>,
    /// Compiled page templates.
    pub templates: Arc<Templates>,
    /// Forwarders for `/api/auth`, `/api/inngest` and `/api/trpc`.
    pub capabilities: Capabilities,
    pub courses: Arc<dyn CourseSource>,
    pub publisher: Arc<dyn ContentPublisher>,
    pub activity: Arc<dyn ActivitySource>,
    pub identity_provider: Arc<dyn IdentityProvider>,
}
