//! Property-based invariant tests for geometry and the scroll signal.
//!
//! 1. `split_columns` widths sum to the parent width.
//! 2. `split_columns` columns are contiguous and never differ by more than one.
//! 3. `ScrollSignal::offset` is never negative and prefers `scroll_top`.
//! 4. Every live subscription sees every emitted signal exactly once.

use dropbar_core::geometry::Rect;
use dropbar_core::scroll::{ScrollHost, ScrollSignal};
use proptest::prelude::*;

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (0u16..=500, 0u16..=500, 0u16..=500, 0u16..=50).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn split_columns_cover_width(area in rect_strategy(), count in 1usize..=12) {
        let cols = area.split_columns(count);
        prop_assert_eq!(cols.len(), count);
        let total: u32 = cols.iter().map(|c| u32::from(c.width)).sum();
        prop_assert_eq!(total, u32::from(area.width));
    }

    #[test]
    fn split_columns_contiguous_and_balanced(area in rect_strategy(), count in 1usize..=12) {
        let cols = area.split_columns(count);
        let mut x = area.x;
        for col in &cols {
            prop_assert_eq!(col.x, x);
            prop_assert_eq!(col.y, area.y);
            prop_assert_eq!(col.height, area.height);
            x = x.saturating_add(col.width);
        }
        let min = cols.iter().map(|c| c.width).min().unwrap_or(0);
        let max = cols.iter().map(|c| c.width).max().unwrap_or(0);
        prop_assert!(max - min <= 1, "unbalanced widths: {:?}", cols);
    }

    #[test]
    fn scroll_offset_never_negative(top in proptest::option::of(any::<i32>()), page in any::<i32>()) {
        let signal = ScrollSignal { scroll_top: top, page_y_offset: page };
        let expected = top.unwrap_or(page).max(0) as u32;
        prop_assert_eq!(signal.offset(), expected);
    }

    #[test]
    fn subscribers_see_every_signal(steps in proptest::collection::vec(-200i32..=200, 0..32)) {
        let mut host = ScrollHost::window();
        let a = host.subscribe();
        let b = host.subscribe();
        for step in &steps {
            host.scroll_by(*step);
        }
        let seen_a = a.drain();
        let seen_b = b.drain();
        prop_assert_eq!(seen_a.len(), steps.len());
        prop_assert_eq!(&seen_a, &seen_b);
        if let Some(last) = seen_a.last() {
            prop_assert_eq!(*last, ScrollSignal::page(host.offset()));
        }
    }
}
