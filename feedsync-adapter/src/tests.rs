use crate::*;

use alloc::format;
use alloc::vec::Vec;

use feedsync::{
    EngagementKind, Item, ItemId, LikeResponse, OutboundReport, SortMode, ViewResponse, Viewport,
};

fn feed(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| Item::new(i as ItemId, format!("https://img.example/{i}")))
        .collect()
}

/// 30 items, batches of 12, 100-unit cards with no gap: three pagination
/// steps end-to-end.
fn gallery() -> FeedSession {
    FeedSession::new(
        feed(30),
        SessionOptions::new()
            .with_batch_size(12)
            .with_card_size(100)
            .with_gap(0),
    )
}

fn appends(commands: &[FeedCommand]) -> Vec<Vec<ItemId>> {
    commands
        .iter()
        .filter_map(|c| match c {
            FeedCommand::Append { ids } => Some(ids.clone()),
            _ => None,
        })
        .collect()
}

fn sends(commands: &[FeedCommand]) -> Vec<OutboundReport> {
    commands
        .iter()
        .filter_map(|c| match c {
            FeedCommand::Send(report) => Some(*report),
            _ => None,
        })
        .collect()
}

fn ids(range: core::ops::Range<u64>) -> Vec<ItemId> {
    range.collect()
}

#[test]
fn thirty_items_paginate_in_three_batches_then_disconnect() {
    let mut session = gallery();

    let mut out = Vec::new();
    session.initial_load(|c| out.push(c));
    assert_eq!(appends(&out), [ids(0..12)]);
    assert_eq!(session.rendered(), &ids(0..12)[..]);
    assert!(session.load_trigger_connected());

    // Near the top: sentinel (1200) is out of reach of end (250) + margin.
    let mut out = Vec::new();
    session.on_frame(Viewport::new(0, 250), |c| out.push(c));
    assert!(appends(&out).is_empty());

    // Scrolling toward the bottom pre-triggers the second batch.
    let mut out = Vec::new();
    session.on_frame(Viewport::new(600, 250), |c| out.push(c));
    assert_eq!(appends(&out), [ids(12..24)]);

    // Third batch is the 6-item remainder; the trigger tears down.
    let mut out = Vec::new();
    session.on_frame(Viewport::new(1750, 250), |c| out.push(c));
    assert_eq!(appends(&out), [ids(24..30)]);
    assert!(session.is_exhausted());
    assert!(!session.load_trigger_connected());
    assert_eq!(session.rendered().len(), 30);

    // A further scroll causes no additional render.
    let mut out = Vec::new();
    session.on_frame(Viewport::new(2600, 250), |c| out.push(c));
    assert!(appends(&out).is_empty());
}

#[test]
fn tall_viewport_fills_in_one_frame() {
    let mut session = gallery();
    session.initial_load(|_| {});

    // A viewport taller than a batch keeps the sentinel in reach after
    // every append, so one frame drains the whole source.
    let mut out = Vec::new();
    session.on_frame(Viewport::new(0, 3000), |c| out.push(c));
    assert_eq!(appends(&out), [ids(12..24), ids(24..30)]);
    assert!(!session.load_trigger_connected());
}

#[test]
fn views_are_reported_once_per_session() {
    let mut session = gallery();
    session.initial_load(|_| {});

    let mut out = Vec::new();
    session.on_frame(Viewport::new(0, 250), |c| out.push(c));
    let first = sends(&out);
    assert_eq!(
        first.iter().map(|r| r.item).collect::<Vec<_>>(),
        ids(0..3),
        "fully or half visible cards report a view"
    );
    assert!(first.iter().all(|r| r.kind == EngagementKind::View));

    // Scroll away and back: the cards re-enter the viewport, but the
    // session dedup tracker already holds their ids.
    session.on_frame(Viewport::new(600, 250), |_| {});
    let mut out = Vec::new();
    session.on_frame(Viewport::new(0, 250), |c| out.push(c));
    assert!(sends(&out).is_empty());

    // Reports were marked before any response resolved (mark-then-send):
    // the three from the first frame plus the three newly visible cards
    // from the second are all still in flight, and nothing was duplicated.
    assert_eq!(session.pending_reports(), 6);
}

#[test]
fn view_confirmation_patches_the_card_in_place() {
    let mut session = gallery();
    session.initial_load(|_| {});

    let mut out = Vec::new();
    session.on_frame(Viewport::new(0, 250), |c| out.push(c));
    let report = sends(&out)[0];
    let rendered_before: Vec<ItemId> = session.rendered().to_vec();

    let mut out = Vec::new();
    session.on_view_response(
        report.request,
        ViewResponse {
            success: true,
            new_views: 41,
        },
        |c| out.push(c),
    );
    assert_eq!(
        out,
        [FeedCommand::Patch {
            id: report.item,
            views: 41,
            likes: 0,
            liked: false,
        }]
    );
    // A patch never moves cards, even though 41 views would outrank
    // neighbours under a metric sort.
    assert_eq!(session.rendered(), &rendered_before[..]);
}

#[test]
fn like_is_optimistic_then_overwritten_by_the_confirmed_count() {
    let mut session = gallery();
    session.initial_load(|_| {});

    let mut out = Vec::new();
    session.on_like_click(5, |c| out.push(c));

    // Immediate feedback: the liked flag flips before the round trip, but
    // the counter still shows the last confirmed value.
    let report = sends(&out)[0];
    assert_eq!(report.item, 5);
    assert_eq!(report.kind, EngagementKind::Like);
    assert_eq!(
        out[0],
        FeedCommand::Patch {
            id: 5,
            views: 0,
            likes: 0,
            liked: true,
        }
    );

    // The confirmed number wins over any locally assumed value.
    let mut out = Vec::new();
    session.on_like_response(
        report.request,
        LikeResponse {
            success: true,
            new_likes: 7,
        },
        |c| out.push(c),
    );
    assert_eq!(
        out,
        [FeedCommand::Patch {
            id: 5,
            views: 0,
            likes: 7,
            liked: true,
        }]
    );
}

#[test]
fn rapid_double_click_issues_two_independent_calls() {
    let mut session = gallery();
    session.initial_load(|_| {});

    let mut out = Vec::new();
    session.on_like_click(3, |c| out.push(c));
    session.on_like_click(3, |c| out.push(c));

    // Dedup applies to views only: both clicks go out.
    let reports = sends(&out);
    assert_eq!(reports.len(), 2);
    assert_ne!(reports[0].request, reports[1].request);
    assert_eq!(session.pending_reports(), 2);

    let mut out = Vec::new();
    session.on_like_response(
        reports[0].request,
        LikeResponse {
            success: true,
            new_likes: 1,
        },
        |c| out.push(c),
    );
    session.on_like_response(
        reports[1].request,
        LikeResponse {
            success: true,
            new_likes: 2,
        },
        |c| out.push(c),
    );
    assert_eq!(out.len(), 2);
    assert_eq!(session.store().get(3).unwrap().likes, 2);
    assert_eq!(session.pending_reports(), 0);
}

#[test]
fn failed_like_keeps_the_optimistic_flag_without_feedback() {
    let mut session = gallery();
    session.initial_load(|_| {});

    let mut out = Vec::new();
    session.on_like_click(2, |c| out.push(c));
    let report = sends(&out)[0];

    let mut out = Vec::new();
    session.on_like_response(
        report.request,
        LikeResponse {
            success: false,
            new_likes: 0,
        },
        |c| out.push(c),
    );
    // Best-effort policy: no patch, no rollback, no user-visible error.
    assert!(out.is_empty());
    assert_eq!(session.store().get(2).unwrap().likes, 0);
    assert_eq!(session.pending_reports(), 0);

    // A later confirmation still renders the liked flag.
    let mut out = Vec::new();
    session.on_like_click(2, |c| out.push(c));
    let report = sends(&out)[0];
    let mut out = Vec::new();
    session.on_like_response(
        report.request,
        LikeResponse {
            success: true,
            new_likes: 1,
        },
        |c| out.push(c),
    );
    assert_eq!(
        out,
        [FeedCommand::Patch {
            id: 2,
            views: 0,
            likes: 1,
            liked: true,
        }]
    );
}

#[test]
fn like_on_missing_item_is_a_no_op() {
    let mut session = gallery();
    session.initial_load(|_| {});

    let mut out = Vec::new();
    session.on_like_click(999, |c| out.push(c));
    assert!(out.is_empty());
    assert_eq!(session.pending_reports(), 0);
}

#[test]
fn metric_sort_renders_everything_and_bypasses_pagination() {
    let mut session = FeedSession::new(
        (0..30).map(|i| Item::new(i, format!("u{i}")).with_counts(0, i)),
        SessionOptions::new()
            .with_batch_size(12)
            .with_card_size(100)
            .with_gap(0),
    );
    session.initial_load(|_| {});

    let mut out = Vec::new();
    session.set_sort_mode(SortMode::MostLiked, |c| out.push(c));

    let expected: Vec<ItemId> = (0..30).rev().collect();
    assert_eq!(out, [FeedCommand::Replace { ids: expected.clone() }]);
    assert_eq!(session.rendered(), &expected[..]);
    assert!(!session.load_trigger_connected());

    // Nothing left to paginate: frames never append.
    let mut out = Vec::new();
    session.on_frame(Viewport::new(2900, 250), |c| out.push(c));
    assert!(appends(&out).is_empty());
}

#[test]
fn switching_back_to_provider_order_restarts_pagination_from_zero() {
    let mut session = gallery();
    session.initial_load(|_| {});
    // Advance the cursor well past the first batch.
    session.on_frame(Viewport::new(600, 250), |_| {});
    assert_eq!(session.rendered().len(), 24);

    session.set_sort_mode(SortMode::MostLiked, |_| {});

    let mut out = Vec::new();
    session.set_sort_mode(SortMode::Provider, |c| out.push(c));
    assert_eq!(out, [FeedCommand::Replace { ids: ids(0..12) }]);
    assert!(session.load_trigger_connected());
    assert!(!session.is_exhausted());

    // Incremental batching resumes from offset zero, not from 24.
    let mut out = Vec::new();
    session.on_frame(Viewport::new(600, 250), |c| out.push(c));
    assert_eq!(appends(&out), [ids(12..24)]);
}

#[test]
fn late_confirmation_for_an_unrendered_card_skips_the_patch() {
    let mut session = gallery();
    session.initial_load(|_| {});
    session.on_frame(Viewport::new(600, 250), |_| {});

    // Item 17 becomes visible and reports a view.
    let mut out = Vec::new();
    session.on_frame(Viewport::new(1750, 250), |c| out.push(c));
    let report = sends(&out)
        .into_iter()
        .find(|r| r.item == 17)
        .expect("item 17 reported");

    // A sort round-trip leaves only the first provider batch rendered.
    session.set_sort_mode(SortMode::MostLiked, |_| {});
    session.set_sort_mode(SortMode::Provider, |_| {});
    assert!(!session.rendered().contains(&17));

    // The resolved call still reconciles the store, but patches nothing.
    let mut out = Vec::new();
    session.on_view_response(
        report.request,
        ViewResponse {
            success: true,
            new_views: 5,
        },
        |c| out.push(c),
    );
    assert!(out.is_empty());
    assert_eq!(session.store().get(17).unwrap().views, 5);
}

#[test]
fn empty_feed_renders_nothing_and_tears_down_immediately() {
    let mut session = FeedSession::new(feed(0), SessionOptions::new());
    let mut out = Vec::new();
    session.initial_load(|c| out.push(c));
    assert!(out.is_empty());
    assert!(!session.load_trigger_connected());
    assert!(session.is_exhausted());

    let mut out = Vec::new();
    session.on_frame(Viewport::new(0, 800), |c| out.push(c));
    assert!(out.is_empty());
}

#[test]
fn session_options_defaults_match_the_gallery_client() {
    let options = SessionOptions::default();
    assert_eq!(options.batch_size, 12);
    assert_eq!(options.trigger_margin, 400);
    assert_eq!(options.view_threshold, 0.5);
}
