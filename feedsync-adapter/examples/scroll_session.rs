// Example: a full simulated gallery session (paginate, view, like, sort).
use feedsync::{LikeResponse, SortMode, ViewResponse, Viewport};
use feedsync_adapter::{FeedCommand, FeedSession, SessionOptions};

fn main() {
    let mut session = FeedSession::new(
        (0..30).map(|i| feedsync::Item::new(i, format!("https://img.example/{i}"))),
        SessionOptions::new().with_card_size(100).with_gap(0),
    );

    let mut wire = Vec::new();
    let mut apply = |c: FeedCommand, wire: &mut Vec<_>| {
        println!("{c:?}");
        if let FeedCommand::Send(report) = c {
            wire.push(report);
        }
    };

    session.initial_load(|c| apply(c, &mut wire));
    for offset in [0u64, 600, 1750, 2600] {
        println!("-- scroll to {offset}");
        session.on_frame(Viewport::new(offset, 250), |c| apply(c, &mut wire));
    }

    println!("-- user double-clicks like on item 5");
    session.on_like_click(5, |c| apply(c, &mut wire));
    session.on_like_click(5, |c| apply(c, &mut wire));

    println!("-- the engagement service answers everything");
    for report in wire.drain(..).collect::<Vec<_>>() {
        match report.kind {
            feedsync::EngagementKind::View => session.on_view_response(
                report.request,
                ViewResponse {
                    success: true,
                    new_views: 1,
                },
                |c| apply(c, &mut wire),
            ),
            feedsync::EngagementKind::Like => session.on_like_response(
                report.request,
                LikeResponse {
                    success: true,
                    new_likes: 2,
                },
                |c| apply(c, &mut wire),
            ),
        }
    }

    println!("-- re-rank by likes");
    session.set_sort_mode(SortMode::MostLiked, |c| apply(c, &mut wire));
    println!("first rendered: {:?}", &session.rendered()[..3]);
}
