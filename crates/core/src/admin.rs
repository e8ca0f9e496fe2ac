//! Admin allow-list and the admin classification gate.
//!
//! The allow-list is built once at startup and shared (behind an `Arc`) by
//! every consumer: the page-level gate that decides what to display, the
//! `/admin` interception middleware, and the `RequireAdmin` extractor. Email
//! normalization lives only in [`AdminAllowList::contains`].

use serde::Serialize;

/// Addresses compiled into the binary. `ADMIN_EMAILS` replaces them at startup.
pub const DEFAULT_ADMIN_EMAILS: &[&str] = &["s.filimon@legionedge.ai", "admin@legionedge.ai"];

/// Ordered, de-duplicated set of lower-cased admin email addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAllowList {
    emails: Vec<String>,
}

impl AdminAllowList {
    /// Build an allow-list from raw addresses.
    ///
    /// Entries are trimmed and lower-cased; blanks are dropped and duplicates
    /// keep their first position.
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for email in emails {
            let email = normalize(email.as_ref().trim());
            if !email.is_empty() && !normalized.contains(&email) {
                normalized.push(email);
            }
        }
        Self { emails: normalized }
    }

    /// Case-insensitive exact membership test. Surrounding whitespace is not
    /// ignored.
    pub fn contains(&self, email: &str) -> bool {
        let email = normalize(email);
        self.emails.iter().any(|e| *e == email)
    }

    /// Classify an optional primary email. Absent email is never admin.
    pub fn is_admin(&self, email: Option<&str>) -> bool {
        email.is_some_and(|e| self.contains(e))
    }

    /// Full gate output for the given identity resolution state.
    pub fn status(&self, identity: &IdentityState) -> AdminStatus {
        match identity {
            IdentityState::Loading => AdminStatus {
                is_admin: false,
                is_loaded: false,
            },
            IdentityState::SignedOut => AdminStatus {
                is_admin: false,
                is_loaded: true,
            },
            IdentityState::SignedIn { email } => AdminStatus {
                is_admin: self.is_admin(email.as_deref()),
                is_loaded: true,
            },
        }
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

impl Default for AdminAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_EMAILS.iter().copied())
    }
}

fn normalize(email: &str) -> String {
    email.to_lowercase()
}

/// Where identity resolution stands for the current viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityState {
    /// The identity provider has not answered yet.
    Loading,
    SignedOut,
    /// Signed in; the primary email may still be missing.
    SignedIn { email: Option<String> },
}

/// Output of the admin gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatus {
    pub is_admin: bool,
    /// `false` while identity resolution is still pending.
    pub is_loaded: bool,
}
