//! A headless feed synchronization engine for paginated media galleries.
//!
//! For session-controller utilities (event wiring, render commands), see the
//! `feedsync-adapter` crate.
//!
//! This crate focuses on the core state machines needed to keep a client-held
//! mirror of feed engagement state consistent with a remote source of truth:
//! batch pagination over an ordered source, viewport-membership detection for
//! load triggering and per-card view reporting, session-scoped report
//! de-duplication, and two-phase (pending, then confirmed) reconciliation of
//! engagement counters.
//!
//! It is UI-agnostic. A browser/TUI/GUI layer is expected to provide:
//! - viewport geometry (scroll offset and extent)
//! - card sizes as batches render
//! - the actual transport for engagement reports, feeding responses back in
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cursor;
mod dedup;
mod layout;
mod map;
mod observer;
mod reconcile;
mod sort;
mod store;
mod types;


pub use cursor::PaginationCursor;
pub use dedup::SessionDedup;
pub use layout::GridLayout;
pub use observer::{CardVisibility, LoadTrigger};
pub use reconcile::{
    ConfirmedPatch, LikeResponse, OutboundReport, Reconciler, RequestId, ServiceError,
    ViewResponse,
};
pub use sort::working_order;
pub use store::ItemStore;
pub use types::{CardRect, EngagementKind, Item, ItemId, SortMode, Viewport};
