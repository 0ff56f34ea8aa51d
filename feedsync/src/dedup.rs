use crate::ItemId;
use crate::map::IdSet;

/// Session-lifetime set of item ids already reported as viewed.
///
/// The core correctness rule is mark-then-send: an id is marked reported
/// *before* the asynchronous report is issued, so a second visibility
/// transition racing the in-flight call cannot produce a duplicate report.
/// [`SessionDedup::begin_report`] performs the check and the mark in one
/// step so callers cannot get the ordering wrong.
///
/// The set never shrinks; it is cleared only by dropping the session.
#[derive(Clone, Debug, Default)]
pub struct SessionDedup {
    reported: IdSet,
}

impl SessionDedup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn already_reported(&self, id: ItemId) -> bool {
        self.reported.contains(&id)
    }

    pub fn mark_reported(&mut self, id: ItemId) {
        self.reported.insert(id);
    }

    /// Returns `true` when the caller should send a report for `id`,
    /// marking the id as reported immediately.
    pub fn begin_report(&mut self, id: ItemId) -> bool {
        let send = self.reported.insert(id);
        if !send {
            ftrace!(id, "view report suppressed (already reported)");
        }
        send
    }

    pub fn len(&self) -> usize {
        self.reported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reported.is_empty()
    }
}
