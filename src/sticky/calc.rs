//! Geometry cache and boundary computation.

use crate::geometry::{Bounds, Offset, Px, Size};

/// Measurements taken by `calculate()` plus the bounds derived from them.
///
/// Valid until the next resize, mutation or explicit recalculation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Calc {
    pub elem_offset: Offset,
    pub elem_size: Size,
    pub context_offset: Offset,
    pub context_height: Px,
    pub bounds: Bounds,
    /// How far the element overflows the viewport (0 when it fits).
    pub over_sized: Px,
}

impl Calc {
    /// Whether the context leaves at least `scroll_space` of slack.
    pub fn has_scroll_space(&self, scroll_space: Px) -> bool {
        self.elem_size.height + scroll_space < self.context_height
    }

    /// Derive `bounds` and `over_sized` from the measurements.
    ///
    /// An element taller than the viewport only sticks once its bottom edge
    /// (plus `bottom_offset`) is in view, and is then pinned with a negative
    /// top of `-over_sized`.
    pub fn set_bounds(&mut self, top_offset: Px, bottom_offset: Px, viewport_height: Px) {
        self.bounds = Bounds {
            top: self.elem_offset.top - top_offset,
            bottom: self.context_offset.top + self.context_height - bottom_offset,
        };

        if self.elem_size.height > viewport_height {
            self.over_sized = self.elem_size.height - viewport_height + bottom_offset;
            self.bounds.top += self.over_sized + top_offset;
            self.bounds.bottom += top_offset;
        } else {
            self.over_sized = 0.0;
        }
    }

    /// Where the element's trailing edge would be at `scroll_top` if fixed.
    pub fn elem_bottom(&self, scroll_top: Px, top_offset: Px) -> Px {
        scroll_top + top_offset + self.elem_size.height - self.over_sized
    }

    /// The `top` value while fixed to the viewport.
    pub fn fixed_top(&self, top_offset: Px) -> Px {
        if self.over_sized != 0.0 {
            -self.over_sized
        } else {
            top_offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(elem_top: Px, elem_height: Px, context_top: Px, context_height: Px) -> Calc {
        Calc {
            elem_offset: Offset::new(0.0, elem_top),
            elem_size: Size::new(300.0, elem_height),
            context_offset: Offset::new(0.0, context_top),
            context_height,
            ..Calc::default()
        }
    }

    #[test]
    fn bounds_for_fitting_element() {
        let mut c = calc(500.0, 400.0, 0.0, 3000.0);
        c.set_bounds(10.0, 20.0, 800.0);
        assert_eq!(c.bounds, Bounds::new(490.0, 2980.0));
        assert_eq!(c.over_sized, 0.0);
        assert_eq!(c.fixed_top(10.0), 10.0);
    }

    #[test]
    fn bounds_for_oversized_element() {
        let mut c = calc(500.0, 1200.0, 0.0, 3000.0);
        c.set_bounds(10.0, 20.0, 800.0);
        assert_eq!(c.over_sized, 420.0);
        // Base top 490 shifted by 420 + 10.
        assert_eq!(c.bounds.top, 920.0);
        // Base bottom 2980 shifted by the top offset.
        assert_eq!(c.bounds.bottom, 2990.0);
        assert_eq!(c.fixed_top(10.0), -420.0);
    }

    #[test]
    fn element_exactly_viewport_high_is_not_oversized() {
        let mut c = calc(100.0, 800.0, 0.0, 3000.0);
        c.set_bounds(0.0, 0.0, 800.0);
        assert_eq!(c.over_sized, 0.0);
        assert_eq!(c.bounds, Bounds::new(100.0, 3000.0));
    }

    #[test]
    fn recomputing_resets_over_sized() {
        let mut c = calc(500.0, 1200.0, 0.0, 3000.0);
        c.set_bounds(0.0, 0.0, 800.0);
        assert_eq!(c.over_sized, 400.0);
        c.set_bounds(0.0, 0.0, 1400.0);
        assert_eq!(c.over_sized, 0.0);
        assert_eq!(c.bounds.top, 500.0);
    }

    #[test]
    fn elem_bottom_accounts_for_oversize() {
        let mut c = calc(500.0, 1200.0, 0.0, 3000.0);
        c.set_bounds(10.0, 20.0, 800.0);
        // 1000 + 10 + 1200 - 420
        assert_eq!(c.elem_bottom(1000.0, 10.0), 1790.0);
    }

    #[test]
    fn scroll_space_guard() {
        let c = calc(0.0, 900.0, 0.0, 1000.0);
        assert!(!c.has_scroll_space(200.0));
        assert!(!c.has_scroll_space(100.0));
        assert!(c.has_scroll_space(99.0));
    }
}
