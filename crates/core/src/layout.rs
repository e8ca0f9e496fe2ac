//! Route classification for the shared site chrome.
//!
//! Breakout pages render edge-to-edge: no bordered container, no footer, no
//! newsletter prompt. Both wrappers read the same [`LayoutPlan`], so they can
//! never disagree about a path.

use serde::Serialize;

/// Path prefixes that opt out of the site chrome.
pub const BREAKOUT_PREFIXES: &[&str] = &["/resources", "/github", "/admin"];

/// Whether `path` renders without the site chrome.
///
/// Plain prefix match: `/administrator` breaks out just like `/admin/create`.
pub fn should_breakout(path: &str) -> bool {
    BREAKOUT_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Per-page chrome decisions, derived from a single [`should_breakout`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutPlan {
    /// Wrap content in the bordered container.
    pub container: bool,
    /// Render the footer and newsletter prompt.
    pub footer: bool,
}

impl LayoutPlan {
    pub fn for_path(path: &str) -> Self {
        let chrome = !should_breakout(path);
        Self {
            container: chrome,
            footer: chrome,
        }
    }

    pub fn is_breakout(&self) -> bool {
        !self.container
    }
}
