/// Extra rows rendered outside the viewport in each direction to mask
/// rendering latency during fast scrolls.
pub const DEFAULT_OVERSCAN: usize = 5;

/// The contiguous slice of a fixed-height list that must be materialized
/// for the current scroll position, plus the geometry the host needs to
/// keep the scrollbar honest: `offset_y` translates the rendered slice to
/// its true position, `total_height` is the full content height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ListWindow {
    pub start: usize,
    pub end: usize,
    pub total_height: f32,
    pub offset_y: f32,
}

impl ListWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Compute the `[start, end)` window of a uniform-height list visible at
/// `scroll_top` in a viewport of `viewport_height`, padded by `overscan`
/// rows on each side. Pure and total: an empty list (or a non-positive
/// item height, which callers are not supposed to pass) yields the empty
/// window, and a `scroll_top` past the content clamps to an empty tail
/// window rather than an inverted range.
pub fn list_window(
    scroll_top: f32,
    item_height: f32,
    viewport_height: f32,
    total: usize,
    overscan: usize,
) -> ListWindow {
    if total == 0 || item_height <= 0.0 {
        return ListWindow::default();
    }
    let scroll_top = scroll_top.max(0.0);
    let first = (scroll_top / item_height).floor() as usize;
    let visible = (viewport_height.max(0.0) / item_height).ceil() as usize;
    let end = first
        .saturating_add(visible)
        .saturating_add(overscan)
        .min(total);
    let start = first.saturating_sub(overscan).min(end);
    ListWindow {
        start,
        end,
        total_height: total as f32 * item_height,
        offset_y: start as f32 * item_height,
    }
}
