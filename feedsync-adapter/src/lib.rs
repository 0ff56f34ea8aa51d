//! Session-controller utilities for the `feedsync` crate.
//!
//! The `feedsync` crate is UI-agnostic and focuses on the core state
//! machines. This crate provides the framework-neutral wiring a UI adapter
//! commonly needs:
//!
//! - a [`FeedSession`] that owns the per-page-load state (store, cursor,
//!   dedup tracker, observers, reconciler) with single-writer rules per field
//! - a render/report command stream ([`FeedCommand`]) the adapter applies to
//!   its DOM/widget tree and network layer
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui
//! bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod session;

#[cfg(test)]
mod tests;

pub use session::{FeedCommand, FeedSession, SessionOptions};
