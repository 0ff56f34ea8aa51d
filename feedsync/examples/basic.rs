// Example: minimal pagination + reconciliation round trip.
use feedsync::{EngagementKind, Item, ItemStore, PaginationCursor, Reconciler, SortMode, working_order};

fn main() {
    let mut store = ItemStore::from_provider(
        (0..30).map(|i| Item::new(i, format!("https://picsum.photos/id/{}/800/600", i * 10))),
    );
    let order = store.provider_order();

    let mut cursor = PaginationCursor::new(12);
    loop {
        let batch = cursor.next_batch(&order);
        if batch.is_empty() {
            break;
        }
        println!("batch: {:?} (offset now {})", batch, cursor.offset());
    }

    // A like round trip: pending, then confirmed by the service.
    let mut rec = Reconciler::new();
    let report = rec.begin(3, EngagementKind::Like);
    println!("outbound: {report:?}");
    let patch = rec.complete(&mut store, report.request, Ok(41));
    println!("confirmed: {patch:?}");

    println!("most liked: {:?}", working_order(&store, SortMode::MostLiked));
}
