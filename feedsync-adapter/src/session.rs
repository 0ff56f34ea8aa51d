use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

use feedsync::{
    CardVisibility, EngagementKind, GridLayout, Item, ItemId, ItemStore, LikeResponse,
    LoadTrigger, OutboundReport, PaginationCursor, Reconciler, RequestId, ServiceError,
    SessionDedup, SortMode, ViewResponse, Viewport, working_order,
};

#[cfg(feature = "std")]
type IdSet = HashSet<ItemId>;
#[cfg(not(feature = "std"))]
type IdSet = BTreeSet<ItemId>;

/// Configuration for [`FeedSession`].
///
/// Defaults follow the gallery client this engine was built for: batches of
/// 12 cards, a 400-unit pre-trigger margin so the next batch loads before
/// the user reaches the bottom, and a majority-area view threshold so a
/// sliver scroll-past does not count as a view.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionOptions {
    /// Items rendered per pagination step.
    pub batch_size: usize,
    /// Main-axis extent of one rendered card.
    pub card_size: u32,
    /// Space between cards.
    pub gap: u32,
    /// Pre-trigger margin for the pagination sentinel.
    pub trigger_margin: u32,
    /// Minimum visible area fraction for a view to count.
    pub view_threshold: f32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            batch_size: 12,
            card_size: 600,
            gap: 16,
            trigger_margin: 400,
            view_threshold: 0.5,
        }
    }
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_card_size(mut self, card_size: u32) -> Self {
        self.card_size = card_size;
        self
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_trigger_margin(mut self, trigger_margin: u32) -> Self {
        self.trigger_margin = trigger_margin;
        self
    }

    pub fn with_view_threshold(mut self, view_threshold: f32) -> Self {
        self.view_threshold = view_threshold;
        self
    }
}

/// An instruction for the UI/network adapter.
///
/// Render commands never reorder existing cards except through `Replace`;
/// a `Patch` updates one card's counters in place even when the new value
/// would change its rank under the active sort.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeedCommand {
    /// Append cards for `ids` to the end of the grid (incremental mode).
    Append { ids: Vec<ItemId> },
    /// Discard the grid and render `ids` in order (full-replace mode).
    Replace { ids: Vec<ItemId> },
    /// Update one card's counters and liked flag in place.
    Patch {
        id: ItemId,
        views: u64,
        likes: u64,
        liked: bool,
    },
    /// Put an engagement report on the wire (best-effort, fire-and-forget
    /// on failure).
    Send(OutboundReport),
}

/// A framework-neutral feed session controller.
///
/// Owns the whole per-page-load state with single-writer rules per field:
/// item counters are written only by the reconciler, the pagination offset
/// only by the cursor, the dedup set only through mark-then-send gating.
///
/// Adapters drive it with four event sources and apply the emitted
/// [`FeedCommand`]s:
/// - [`FeedSession::initial_load`] once after construction
/// - [`FeedSession::on_frame`] whenever the viewport scrolls or resizes
/// - [`FeedSession::on_like_click`] for the like affordance
/// - [`FeedSession::on_like_response`] / [`FeedSession::on_view_response`]
///   when the engagement service answers
///
/// The session never performs I/O; network round trips exist only as
/// `Send` commands going out and response events coming back, so any
/// interleaving of frames, clicks, and resolutions between them is safe.
#[derive(Clone, Debug)]
pub struct FeedSession {
    options: SessionOptions,
    store: ItemStore,
    cursor: PaginationCursor,
    dedup: SessionDedup,
    reconciler: Reconciler,
    layout: GridLayout,
    cards: CardVisibility,
    trigger: LoadTrigger,
    sort_mode: SortMode,
    working: Vec<ItemId>,
    rendered: Vec<ItemId>,
    liked: IdSet,
}

impl FeedSession {
    /// Creates a session over the provider's pre-ranked feed. Nothing is
    /// rendered until [`FeedSession::initial_load`].
    pub fn new(items: impl IntoIterator<Item = Item>, options: SessionOptions) -> Self {
        let store = ItemStore::from_provider(items);
        let working = store.provider_order();
        Self {
            cursor: PaginationCursor::new(options.batch_size),
            dedup: SessionDedup::new(),
            reconciler: Reconciler::new(),
            layout: GridLayout::new(options.gap),
            cards: CardVisibility::new(options.view_threshold),
            trigger: LoadTrigger::new(options.trigger_margin),
            sort_mode: SortMode::Provider,
            rendered: Vec::new(),
            liked: IdSet::default(),
            options,
            store,
            working,
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// The currently rendered card order (the displayed subset).
    pub fn rendered(&self) -> &[ItemId] {
        &self.rendered
    }

    /// The active working order driving render output.
    pub fn working_order(&self) -> &[ItemId] {
        &self.working
    }

    pub fn load_trigger_connected(&self) -> bool {
        self.trigger.is_connected()
    }

    /// Number of engagement reports currently in flight.
    pub fn pending_reports(&self) -> usize {
        self.reconciler.pending_len()
    }

    /// True once the cursor has consumed the working order.
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_exhausted(self.working.len())
    }

    /// Renders the first batch.
    pub fn initial_load(&mut self, mut emit: impl FnMut(FeedCommand)) {
        self.load_next_batch(&mut emit);
    }

    /// Feeds a viewport update (scroll or resize).
    ///
    /// Drives both observers: the load trigger appends batches while the
    /// sentinel stays within the margin-expanded viewport, and per-card
    /// visibility emits dedup-gated view reports for cards that entered.
    pub fn on_frame(&mut self, viewport: Viewport, mut emit: impl FnMut(FeedCommand)) {
        // The sentinel moves with every appended batch; keep loading while
        // it remains in reach so a tall viewport fills without further
        // scroll events.
        while self.trigger.update(self.layout.total_size(), viewport) {
            if self.load_next_batch(&mut emit) == 0 {
                break;
            }
        }

        let mut entered: Vec<usize> = Vec::new();
        self.cards
            .update(&self.layout, viewport, |index| entered.push(index));

        for index in entered {
            let Some(&id) = self.rendered.get(index) else {
                continue;
            };
            // Mark-then-send: the id is committed to the dedup set before
            // the report exists, so an interleaved re-entry cannot race a
            // duplicate.
            if !self.dedup.begin_report(id) {
                continue;
            }
            let report = self.reconciler.begin(id, EngagementKind::View);
            emit(FeedCommand::Send(report));
        }
    }

    /// Handles a click on a card's like affordance.
    ///
    /// The liked flag is applied optimistically before the round trip;
    /// the flag is one-way (the service contract is increment-only) and is
    /// never rolled back on failure. Dedup applies to views only; every
    /// click issues its own report.
    pub fn on_like_click(&mut self, id: ItemId, mut emit: impl FnMut(FeedCommand)) {
        let Some(item) = self.store.get(id) else {
            return;
        };
        let (views, likes) = (item.views, item.likes);

        self.liked.insert(id);
        emit(FeedCommand::Patch {
            id,
            views,
            likes,
            liked: true,
        });

        let report = self.reconciler.begin(id, EngagementKind::Like);
        emit(FeedCommand::Send(report));
    }

    /// Resolves an in-flight report from a raw outcome.
    ///
    /// Emits a `Patch` when the confirmation applied and the card is still
    /// rendered; a confirmation for an absent card updates the store but
    /// patches nothing (there is no cancellation of in-flight calls).
    pub fn on_service_response(
        &mut self,
        request: RequestId,
        outcome: Result<u64, ServiceError>,
        mut emit: impl FnMut(FeedCommand),
    ) {
        let Some(confirmed) = self.reconciler.complete(&mut self.store, request, outcome) else {
            return;
        };
        if !self.rendered.contains(&confirmed.item) {
            return;
        }
        let Some(item) = self.store.get(confirmed.item) else {
            return;
        };
        emit(FeedCommand::Patch {
            id: item.id,
            views: item.views,
            likes: item.likes,
            liked: self.liked.contains(&item.id),
        });
    }

    /// Resolves a like report from its wire response.
    pub fn on_like_response(
        &mut self,
        request: RequestId,
        response: LikeResponse,
        emit: impl FnMut(FeedCommand),
    ) {
        self.on_service_response(request, response.into_outcome(), emit);
    }

    /// Resolves a view report from its wire response.
    pub fn on_view_response(
        &mut self,
        request: RequestId,
        response: ViewResponse,
        emit: impl FnMut(FeedCommand),
    ) {
        self.on_service_response(request, response.into_outcome(), emit);
    }

    /// Switches the working order.
    ///
    /// `Provider` restores incremental pagination from offset zero with a
    /// reconnected load trigger; the metric modes render every item at once
    /// and disconnect the trigger, since there is nothing left to paginate.
    /// Selecting the active mode again re-renders, matching a repeated
    /// button activation.
    pub fn set_sort_mode(&mut self, mode: SortMode, mut emit: impl FnMut(FeedCommand)) {
        self.sort_mode = mode;
        self.working = working_order(&self.store, mode);

        self.layout.clear();
        self.cards.clear();
        self.rendered.clear();
        self.cursor.reset();

        match mode {
            SortMode::Provider => {
                self.trigger.reconnect();
                let ids = self.cursor.next_batch(&self.working).to_vec();
                self.track_rendered(&ids);
                emit(FeedCommand::Replace { ids });
                if self.cursor.is_exhausted(self.working.len()) {
                    self.trigger.disconnect();
                }
            }
            SortMode::MostViewed | SortMode::MostLiked => {
                self.trigger.disconnect();
                let ids = self.working.clone();
                self.track_rendered(&ids);
                emit(FeedCommand::Replace { ids });
            }
        }
    }

    /// Appends the next batch; returns its length. An empty batch is the
    /// exhausted terminal state and tears the load trigger down.
    fn load_next_batch(&mut self, emit: &mut impl FnMut(FeedCommand)) -> usize {
        let ids = self.cursor.next_batch(&self.working).to_vec();
        if ids.is_empty() {
            self.trigger.disconnect();
            return 0;
        }
        self.track_rendered(&ids);
        let len = ids.len();
        emit(FeedCommand::Append { ids });
        if self.cursor.is_exhausted(self.working.len()) {
            self.trigger.disconnect();
        }
        len
    }

    fn track_rendered(&mut self, ids: &[ItemId]) {
        for _ in ids {
            self.layout.push_card(self.options.card_size);
        }
        self.cards.observe(ids.len());
        self.rendered.extend_from_slice(ids);
    }
}
