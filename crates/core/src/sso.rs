//! SSO redirect-callback completion.
//!
//! ```text
//! Pending --begin--> Completing --finish(Ok)--> Succeeded { success target }
//!                               \--finish(Err)-> Failed { fallback target }
//! ```
//!
//! Both terminal phases carry a navigation target, so every callback ends on
//! a usable page. The provider is called once per callback.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Query parameters the identity provider appended to the callback URL.
pub type CallbackParams = HashMap<String, String>;

/// What the provider hands back when the redirect flow completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGrant {
    pub session_token: String,
}

/// The external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn complete_redirect(&self, params: &CallbackParams) -> Result<SessionGrant, CoreError>;
}

/// Where to send the user after the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTargets {
    pub success: String,
    pub fallback: String,
}

impl Default for RedirectTargets {
    fn default() -> Self {
        Self {
            success: "/".to_string(),
            fallback: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackPhase {
    Pending,
    Completing,
    Succeeded { target: String },
    Failed { target: String },
}

impl CallbackPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Succeeded { target } | Self::Failed { target } => Some(target),
            Self::Pending | Self::Completing => None,
        }
    }
}

/// One callback cycle.
#[derive(Debug, Clone)]
pub struct SsoCallback {
    targets: RedirectTargets,
    phase: CallbackPhase,
}

impl SsoCallback {
    pub fn new(targets: RedirectTargets) -> Self {
        Self {
            targets,
            phase: CallbackPhase::Pending,
        }
    }

    pub fn phase(&self) -> &CallbackPhase {
        &self.phase
    }

    /// `Pending -> Completing`.
    pub fn begin(&mut self) -> Result<(), CoreError> {
        if self.phase != CallbackPhase::Pending {
            return Err(CoreError::Conflict(format!(
                "Cannot begin SSO callback from phase {:?}",
                self.phase
            )));
        }
        self.phase = CallbackPhase::Completing;
        Ok(())
    }

    /// `Completing -> Succeeded | Failed`, returning the navigation target.
    pub fn finish<T, E>(&mut self, outcome: &Result<T, E>) -> Result<&str, CoreError> {
        if self.phase != CallbackPhase::Completing {
            return Err(CoreError::Conflict(format!(
                "Cannot finish SSO callback from phase {:?}",
                self.phase
            )));
        }

        self.phase = match outcome {
            Ok(_) => CallbackPhase::Succeeded {
                target: self.targets.success.clone(),
            },
            Err(_) => CallbackPhase::Failed {
                target: self.targets.fallback.clone(),
            },
        };

        // Terminal phases always carry a target.
        self.phase
            .target()
            .ok_or_else(|| CoreError::Internal("SSO callback ended without a target".into()))
    }
}
