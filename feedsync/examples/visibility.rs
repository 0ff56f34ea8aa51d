// Example: driving the two observers with a simulated scroll.
use feedsync::{CardVisibility, GridLayout, LoadTrigger, SessionDedup, Viewport};

fn main() {
    let mut layout = GridLayout::new(16);
    for _ in 0..12 {
        layout.push_card(600);
    }

    let mut trigger = LoadTrigger::new(400);
    let mut cards = CardVisibility::new(0.5);
    cards.observe(layout.len());
    let mut dedup = SessionDedup::new();

    for offset in (0..layout.total_size()).step_by(900) {
        let view = Viewport::new(offset, 900);
        if trigger.update(layout.total_size(), view) {
            println!("offset {offset}: sentinel in reach, next batch would load here");
        }
        cards.update(&layout, view, |index| {
            if dedup.begin_report(index as u64) {
                println!("offset {offset}: card {index} entered, reporting view");
            }
        });
    }
}
