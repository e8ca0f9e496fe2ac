//! Listing results with an explicit degraded branch.
//!
//! Server-side listing fetches never fail a page: a failed fetch becomes
//! [`Listing::Degraded`], which renders exactly like an empty listing.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<T> {
    Loaded(Vec<T>),
    /// The fetch failed; the page shows nothing.
    Degraded,
}

impl<T> Listing<T> {
    /// Items to render. Empty for a degraded listing.
    pub fn items(&self) -> &[T] {
        match self {
            Listing::Loaded(items) => items,
            Listing::Degraded => &[],
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Listing::Degraded)
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl<T, E> From<Result<Vec<T>, E>> for Listing<T> {
    fn from(result: Result<Vec<T>, E>) -> Self {
        match result {
            Ok(items) => Listing::Loaded(items),
            Err(_) => Listing::Degraded,
        }
    }
}

/// Template-facing view of a listing.
#[derive(Debug, Serialize)]
pub struct ListingView<'a, T: Serialize> {
    pub items: &'a [T],
    pub degraded: bool,
}

impl<T: Serialize> Listing<T> {
    pub fn view(&self) -> ListingView<'_, T> {
        ListingView {
            items: self.items(),
            degraded: self.is_degraded(),
        }
    }
}
