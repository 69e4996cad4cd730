//! Stale-response protection for page fetches.
//!
//! Requests are not aborted when a page goes away or starts a newer request.
//! Instead each request takes a [`FetchTicket`] and its completion handler
//! checks [`FetchScope::is_current`] before writing anything.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Clone, Debug, Default)]
pub struct FetchScope {
    generation: Rc<Cell<u64>>,
    closed: Rc<Cell<bool>>,
}

impl FetchScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request. Every earlier ticket becomes stale.
    pub fn begin(&self) -> FetchTicket {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        FetchTicket(next)
    }

    /// True while `ticket` is the latest request and the owner is still mounted.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        !self.closed.get() && self.generation.get() == ticket.0
    }

    pub fn close(&self) {
        self.closed.set(true);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

/// A [`FetchScope`] closed when the calling component unmounts.
pub fn use_fetch_scope() -> FetchScope {
    let scope = use_hook(FetchScope::new);
    use_drop({
        let scope = scope.clone();
        move || scope.close()
    });
    scope
}
