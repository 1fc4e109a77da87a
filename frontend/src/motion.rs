//! Numbers and CSS strings behind the scroll effects. Kept free of web-sys so
//! they can be checked natively.

/// Document offset to scroll to so that an element whose bounding rect starts
/// at `rect_top` (viewport coordinates) lands right under the fixed nav.
pub fn anchor_scroll_top(rect_top: f64, page_offset: f64, nav_height: f64) -> f64 {
    rect_top + page_offset - nav_height
}

pub fn is_scrolled(page_offset: f64, threshold: f64) -> bool {
    page_offset > threshold
}

pub fn parallax_offset(page_offset: f64, rate: f64) -> f64 {
    page_offset * rate
}

pub fn translate_y(px: f64) -> String {
    format!("translateY({}px)", px)
}

/// Delay before revealing the `index`-th entry of an observer batch.
pub fn stagger_delay(index: usize, step_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(step_ms)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn anchor_lands_below_nav() {
        // Target 640px down the viewport, page already scrolled 200px, 80px nav.
        assert_eq!(anchor_scroll_top(640.0, 200.0, 80.0), 760.0);
        // Target above the viewport.
        assert_eq!(anchor_scroll_top(-150.0, 900.0, 72.0), 678.0);
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!is_scrolled(100.0, 100.0));
        assert!(is_scrolled(100.5, 100.0));
        assert!(!is_scrolled(0.0, 100.0));
    }

    #[test]
    fn translate_formatting() {
        assert_eq!(translate_y(parallax_offset(100.0, 0.3)), format!("translateY({}px)", 100.0 * 0.3));
        assert_eq!(translate_y(0.0), "translateY(0px)");
        assert_eq!(translate_y(45.0), "translateY(45px)");
    }

    #[test]
    fn stagger_steps() {
        assert_eq!(stagger_delay(0, 100), 0);
        assert_eq!(stagger_delay(3, 100), 300);
        assert_eq!(stagger_delay(2, 150), 300);
        assert_eq!(stagger_delay(usize::MAX, 100), u32::MAX);
    }

    proptest! {
        #[test]
        fn scrolled_flips_exactly_at_threshold(offset in 0.0f64..10_000.0) {
            prop_assert_eq!(is_scrolled(offset, 100.0), offset > 100.0);
        }

        #[test]
        fn parallax_moves_slower_than_page(offset in 0.0f64..100_000.0) {
            let moved = parallax_offset(offset, 0.3);
            prop_assert!(moved <= offset);
            prop_assert!(moved >= 0.0);
        }
    }
}
