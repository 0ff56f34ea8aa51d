use alloc::string::String;

/// Stable identity of a feed item, unique across the item store.
///
/// Ids are the join key for every other structure: dedup tracking, pending
/// reports, render patches.
pub type ItemId = u64;

/// One gallery entry mirrored from the provider.
///
/// `views` and `likes` are authoritative as of the last confirmed
/// reconciliation; they never decrease within a session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    /// Opaque reference to the displayable asset.
    pub url: String,
    pub views: u64,
    pub likes: u64,
}

impl Item {
    /// Creates an item with zeroed counters.
    pub fn new(id: ItemId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            views: 0,
            likes: 0,
        }
    }

    pub fn with_counts(mut self, views: u64, likes: u64) -> Self {
        self.views = views;
        self.likes = likes;
        self
    }

    /// Returns the counter a report of `kind` mutates.
    pub fn count(&self, kind: EngagementKind) -> u64 {
        match kind {
            EngagementKind::View => self.views,
            EngagementKind::Like => self.likes,
        }
    }
}

/// Which engagement counter a report mutates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngagementKind {
    View,
    Like,
}

/// The active ranking driving render output.
///
/// `Provider` keeps the order the feed arrived in and paginates
/// incrementally; the metric modes replace the working order wholesale and
/// bypass pagination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortMode {
    #[default]
    Provider,
    MostViewed,
    MostLiked,
}

/// A 1-D scroll-axis window over the rendered feed.
///
/// `offset` is the scroll position and `main` the viewport extent along the
/// scroll axis. Cross-axis geometry never affects visibility decisions, so
/// it is not modeled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub offset: u64,
    pub main: u32,
}

impl Viewport {
    pub fn new(offset: u64, main: u32) -> Self {
        Self { offset, main }
    }

    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.main as u64)
    }
}

/// Scroll-axis extent of one rendered card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardRect {
    pub start: u64,
    pub size: u32,
}

impl CardRect {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }

    /// Fraction of the card's extent inside `viewport`, in `0.0..=1.0`.
    pub fn visible_fraction(&self, viewport: Viewport) -> f32 {
        if self.size == 0 {
            return 0.0;
        }
        let lo = self.start.max(viewport.offset);
        let hi = self.end().min(viewport.end());
        if hi <= lo {
            return 0.0;
        }
        (hi - lo) as f32 / self.size as f32
    }
}
