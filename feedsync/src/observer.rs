use alloc::vec::Vec;

use crate::{GridLayout, Viewport};

/// Watches the pagination sentinel with a generous pre-trigger margin.
///
/// The sentinel is a zero-height marker positioned after the last rendered
/// card; the margin expands the viewport so the next batch starts loading
/// before the user reaches the physical bottom. The trigger fires on the
/// *transition* into the expanded viewport. Moving the sentinel (a batch
/// was appended) re-arms it, matching how a relocated target re-enters
/// intersection evaluation.
///
/// Once the source is exhausted the trigger must be disconnected;
/// disconnecting is idempotent and a disconnected trigger never fires.
#[derive(Clone, Copy, Debug)]
pub struct LoadTrigger {
    margin: u32,
    connected: bool,
    was_visible: bool,
    last_sentinel: Option<u64>,
}

impl LoadTrigger {
    /// Creates a connected trigger. `margin` expands the viewport on both
    /// ends when testing sentinel membership.
    pub fn new(margin: u32) -> Self {
        Self {
            margin,
            connected: true,
            was_visible: false,
            last_sentinel: None,
        }
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Stops observing. Safe to call when already disconnected; teardown
    /// can be reached from exhaustion, a sort switch, or a reset.
    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;
        self.was_visible = false;
        self.last_sentinel = None;
        fdebug!("LoadTrigger: disconnected");
    }

    /// Re-arms the trigger after a working-order reset.
    pub fn reconnect(&mut self) {
        self.connected = true;
        self.was_visible = false;
        self.last_sentinel = None;
        fdebug!("LoadTrigger: reconnected");
    }

    /// Feeds the current sentinel position and viewport.
    ///
    /// Returns `true` exactly when the sentinel transitions into the
    /// margin-expanded viewport, which is the signal to load the next batch.
    pub fn update(&mut self, sentinel: u64, viewport: Viewport) -> bool {
        if !self.connected {
            return false;
        }
        if self.last_sentinel != Some(sentinel) {
            // Sentinel moved: treat it as a fresh target.
            self.was_visible = false;
            self.last_sentinel = Some(sentinel);
        }

        let margin = self.margin as u64;
        let lo = viewport.offset.saturating_sub(margin);
        let hi = viewport.end().saturating_add(margin);
        let visible = sentinel >= lo && sentinel <= hi;

        let fired = visible && !self.was_visible;
        self.was_visible = visible;
        if fired {
            ftrace!(sentinel, offset = viewport.offset, "LoadTrigger: fired");
        }
        fired
    }
}

/// Per-card viewport-membership detector with a strict area threshold.
///
/// One logical watcher per rendered card. [`CardVisibility::update`] scans
/// the layout and emits an "entered viewport" event for every card that
/// *transitions* into the visible region, through the caller-supplied
/// channel. The emitter contract holds: indexes are in-bounds, ascending,
/// and fire once per transition; a card that stays visible across frames
/// does not re-fire.
///
/// Watchers are intentionally not torn down after firing: per-card callback
/// cost is O(1) and capped by the number of rendered cards, and consumers
/// gate duplicate reports through the session dedup tracker anyway.
#[derive(Clone, Debug)]
pub struct CardVisibility {
    threshold: f32,
    in_view: Vec<bool>,
}

impl CardVisibility {
    /// `threshold` is the minimum visible area fraction for a card to count
    /// as on screen, clamped to `0.0..=1.0`. With a threshold of zero any
    /// positive intersection counts.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            in_view: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Number of cards currently observed.
    pub fn observed(&self) -> usize {
        self.in_view.len()
    }

    /// Registers watchers for `additional` newly appended cards. New cards
    /// start out of view.
    pub fn observe(&mut self, additional: usize) {
        self.in_view
            .resize(self.in_view.len().saturating_add(additional), false);
    }

    /// Drops every watcher; used on a full replace.
    pub fn clear(&mut self) {
        self.in_view.clear();
    }

    /// Recomputes membership for every observed card against `viewport`,
    /// emitting the index of each card that entered the visible region.
    ///
    /// Watchers past the end of `layout` are skipped (and debug-asserted):
    /// observation must not outrun rendering.
    pub fn update(
        &mut self,
        layout: &GridLayout,
        viewport: Viewport,
        mut on_enter: impl FnMut(usize),
    ) {
        debug_assert!(
            self.in_view.len() <= layout.len(),
            "CardVisibility: observing {} cards but layout has {}",
            self.in_view.len(),
            layout.len()
        );
        for index in 0..self.in_view.len() {
            let Some(card) = layout.card(index) else {
                fwarn!(index, "CardVisibility: watcher without a layout card");
                break;
            };
            let fraction = card.visible_fraction(viewport);
            let visible = fraction > 0.0 && fraction >= self.threshold;
            if visible && !self.in_view[index] {
                ftrace!(index, "card entered viewport");
                on_enter(index);
            }
            self.in_view[index] = visible;
        }
    }
}
