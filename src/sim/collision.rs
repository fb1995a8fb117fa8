//! Axis-aligned overlap tests
//!
//! Every comparison is strict, so rectangles that only share an edge do not
//! collide.

use super::state::Rect;

/// True if the two rectangles overlap by a positive amount on both axes
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// True if `a` overlaps any rectangle in `others`
pub fn overlaps_any<'a>(a: &Rect, others: impl IntoIterator<Item = &'a Rect>) -> bool {
    others.into_iter().any(|b| overlaps(a, b))
}
