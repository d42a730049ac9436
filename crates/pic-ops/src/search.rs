//! Brute-force sub-image search.
//!
//! Finds where a needle view occurs inside a haystack view by testing every
//! candidate top-left offset with a relative window of the haystack and
//! [`PixelView::equals`]. Candidates are visited in row-major order (outer
//! loop over y, inner over x), so the first hit is the leftmost match in the
//! topmost row that has one.
//!
//! Cost is O(H·W·h·w) in the worst case. There is no skip table; treat this
//! as the reference algorithm for small needles.
//!
//! # Edge policy
//!
//! Historically the candidate range was `0 <= x < W - w` and
//! `0 <= y < H - h`: a placement whose far edge touches the haystack's far
//! edge is never tested. [`EdgePolicy::Exclusive`] keeps that behavior and is
//! the default; [`EdgePolicy::Inclusive`] tests every placement.
//!
//! ```rust
//! use pic_core::{PixelView, Rect, Rgba};
//! use pic_ops::search::{locate, locate_with, EdgePolicy, SearchOptions};
//!
//! let hay = PixelView::from_fn(10, 10, |x, y| Rgba::new(x as u8, y as u8, 0, 255));
//! let needle = hay.copy_sub_region(Rect::new(4, 5, 3, 3))?;
//! assert_eq!(locate(&hay, &needle)?, Some((4, 5)));
//!
//! // The bottom-right corner is only reachable with the inclusive policy
//! let corner = hay.copy_sub_region(Rect::new(7, 7, 3, 3))?;
//! assert_eq!(locate(&hay, &corner)?, None);
//! let inclusive = SearchOptions::default().with_edge(EdgePolicy::Inclusive);
//! assert_eq!(locate_with(&hay, &corner, &inclusive)?, Some((7, 7)));
//! # Ok::<(), pic_core::Error>(())
//! ```

use std::ops::ControlFlow;
use std::sync::Arc;

use pic_core::{PixelView, Rect, Result};
use tracing::{debug, trace};

/// Which top-left offsets are tested along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgePolicy {
    /// `0 <= offset < haystack - needle`; the far-edge placement is skipped.
    #[default]
    Exclusive,
    /// `0 <= offset <= haystack - needle`; every placement is tested.
    Inclusive,
}

impl EdgePolicy {
    /// Number of candidate offsets along one axis.
    ///
    /// Zero when the needle is longer than the haystack.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pic_ops::search::EdgePolicy;
    ///
    /// assert_eq!(EdgePolicy::Exclusive.candidates(10, 3), 7);
    /// assert_eq!(EdgePolicy::Inclusive.candidates(10, 3), 8);
    /// assert_eq!(EdgePolicy::Exclusive.candidates(3, 3), 0);
    /// assert_eq!(EdgePolicy::Inclusive.candidates(2, 3), 0);
    /// ```
    #[inline]
    pub fn candidates(self, haystack: u32, needle: u32) -> u32 {
        let Some(span) = haystack.checked_sub(needle) else {
            return 0;
        };
        match self {
            Self::Exclusive => span,
            Self::Inclusive => span.saturating_add(1),
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    /// Candidate range policy
    pub edge: EdgePolicy,
}

impl SearchOptions {
    /// Sets the edge policy.
    #[inline]
    pub fn with_edge(mut self, edge: EdgePolicy) -> Self {
        self.edge = edge;
        self
    }
}

/// Candidate grid for one haystack/needle pair.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Grid {
    pub(crate) cols: u32,
    pub(crate) rows: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Grid {
    pub(crate) fn new(haystack: &PixelView, needle: &PixelView, options: &SearchOptions) -> Self {
        let (width, height) = needle.dimensions();
        let (cols, rows) = if needle.is_empty() {
            // An empty needle never matches.
            (0, 0)
        } else {
            (
                options.edge.candidates(haystack.width(), width),
                options.edge.candidates(haystack.height(), height),
            )
        };
        Self {
            cols,
            rows,
            width,
            height,
        }
    }

    #[inline]
    pub(crate) fn window(&self, parent: &Arc<PixelView>, x: u32, y: u32) -> PixelView {
        PixelView::relative(Arc::clone(parent), Rect::new(x, y, self.width, self.height))
    }

    /// Tests the candidates of row `y` left to right.
    pub(crate) fn scan_row<F>(
        &self,
        parent: &Arc<PixelView>,
        needle: &PixelView,
        y: u32,
        mut on_match: F,
    ) -> Result<ControlFlow<()>>
    where
        F: FnMut((u32, u32)) -> ControlFlow<()>,
    {
        for x in 0..self.cols {
            if self.window(parent, x, y).equals(needle)? {
                trace!(x, y, "needle match");
                if on_match((x, y)).is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}

/// Visits every match in row-major order until `on_match` breaks.
fn scan<F>(
    haystack: &PixelView,
    needle: &PixelView,
    options: &SearchOptions,
    mut on_match: F,
) -> Result<()>
where
    F: FnMut((u32, u32)) -> ControlFlow<()>,
{
    let grid = Grid::new(haystack, needle, options);
    debug!(
        haystack_w = haystack.width(),
        haystack_h = haystack.height(),
        needle_w = grid.width,
        needle_h = grid.height,
        cols = grid.cols,
        rows = grid.rows,
        edge = ?options.edge,
        "searching for needle"
    );
    if grid.cols == 0 || grid.rows == 0 {
        return Ok(());
    }
    // One shared parent for every candidate window.
    let parent = Arc::new(haystack.clone());
    for y in 0..grid.rows {
        if grid.scan_row(&parent, needle, y, &mut on_match)?.is_break() {
            break;
        }
    }
    Ok(())
}

/// Returns the first top-left offset where `needle` occurs in `haystack`.
///
/// Uses [`EdgePolicy::Exclusive`]; see [`locate_with`].
///
/// # Errors
///
/// Propagates [`Error::OutOfRange`](pic_core::Error::OutOfRange) from pixel
/// access, e.g. when the needle is a relative view reaching outside its
/// parent.
pub fn locate(haystack: &PixelView, needle: &PixelView) -> Result<Option<(u32, u32)>> {
    locate_with(haystack, needle, &SearchOptions::default())
}

/// Returns the first top-left offset where `needle` occurs in `haystack`.
///
/// Returns `Ok(None)` when nothing matches, when the needle is empty, and
/// when the needle does not fit in the haystack.
pub fn locate_with(
    haystack: &PixelView,
    needle: &PixelView,
    options: &SearchOptions,
) -> Result<Option<(u32, u32)>> {
    let mut found = None;
    scan(haystack, needle, options, |pos| {
        found = Some(pos);
        ControlFlow::Break(())
    })?;
    debug!(?found, "search finished");
    Ok(found)
}

/// Returns every top-left offset where `needle` occurs, in scan order.
pub fn locate_all(
    haystack: &PixelView,
    needle: &PixelView,
    options: &SearchOptions,
) -> Result<Vec<(u32, u32)>> {
    let mut found = Vec::new();
    scan(haystack, needle, options, |pos| {
        found.push(pos);
        ControlFlow::Continue(())
    })?;
    debug!(matches = found.len(), "search finished");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pic_core::Rgba;

    /// 10x10 haystack where every pixel is unique.
    fn haystack() -> PixelView {
        PixelView::from_fn(10, 10, |x, y| Rgba::new(x as u8, y as u8, 0x80, 0xFF))
    }

    fn inclusive() -> SearchOptions {
        SearchOptions::default().with_edge(EdgePolicy::Inclusive)
    }

    #[test]
    fn test_locate_found() {
        let hay = haystack();
        let needle = hay.copy_sub_region(Rect::new(4, 5, 3, 3)).unwrap();
        assert_eq!(locate(&hay, &needle).unwrap(), Some((4, 5)));
    }

    #[test]
    fn test_locate_origin() {
        let hay = haystack();
        let needle = hay.copy_sub_region(Rect::new(0, 0, 2, 2)).unwrap();
        assert_eq!(locate(&hay, &needle).unwrap(), Some((0, 0)));
    }

    #[test]
    fn test_locate_not_found() {
        let hay = haystack();
        let needle = PixelView::filled(3, 3, Rgba::splat(0x42));
        assert_eq!(locate(&hay, &needle).unwrap(), None);
    }

    #[test]
    fn test_locate_needle_larger_than_haystack() {
        let hay = haystack();
        let needle = PixelView::new(11, 2);
        assert_eq!(locate(&hay, &needle).unwrap(), None);
        assert_eq!(locate_with(&hay, &needle, &inclusive()).unwrap(), None);
    }

    #[test]
    fn test_locate_needle_same_size() {
        let hay = haystack();
        let needle = hay.copy_sub_region(Rect::from_size(10, 10)).unwrap();
        // strict bound leaves no candidates
        assert_eq!(locate(&hay, &needle).unwrap(), None);
        assert_eq!(locate_with(&hay, &needle, &inclusive()).unwrap(), Some((0, 0)));
    }

    #[test]
    fn test_locate_far_edge() {
        let hay = haystack();
        let last_col = hay.copy_sub_region(Rect::new(8, 2, 2, 2)).unwrap();
        let last_row = hay.copy_sub_region(Rect::new(3, 8, 2, 2)).unwrap();
        assert_eq!(locate(&hay, &last_col).unwrap(), None);
        assert_eq!(locate(&hay, &last_row).unwrap(), None);
        assert_eq!(locate_with(&hay, &last_col, &inclusive()).unwrap(), Some((8, 2)));
        assert_eq!(locate_with(&hay, &last_row, &inclusive()).unwrap(), Some((3, 8)));
    }

    #[test]
    fn test_locate_empty_needle() {
        let hay = haystack();
        assert_eq!(locate(&hay, &PixelView::new(0, 0)).unwrap(), None);
        assert_eq!(locate(&hay, &PixelView::new(0, 3)).unwrap(), None);
    }

    #[test]
    fn test_locate_first_in_scan_order() {
        // Repeating 3x3 tiles: the needle occurs at every multiple of 3
        let hay = PixelView::from_fn(12, 12, |x, y| Rgba::splat(((y % 3) * 3 + x % 3) as u8));
        let needle = hay.copy_sub_region(Rect::new(3, 3, 3, 3)).unwrap();
        assert_eq!(locate(&hay, &needle).unwrap(), Some((0, 0)));

        let all = locate_all(&hay, &needle, &SearchOptions::default()).unwrap();
        assert_eq!(
            all,
            vec![
                (0, 0), (3, 0), (6, 0),
                (0, 3), (3, 3), (6, 3),
                (0, 6), (3, 6), (6, 6),
            ]
        );
        let all = locate_all(&hay, &needle, &inclusive()).unwrap();
        assert_eq!(all.len(), 16);
        assert_eq!(all.last(), Some(&(9, 9)));
    }

    #[test]
    fn test_locate_prefers_topmost_row() {
        let hay = PixelView::from_fn(8, 8, |x, y| {
            if (x, y) == (1, 4) || (x, y) == (5, 2) {
                Rgba::splat(0xFF)
            } else {
                Rgba::TRANSPARENT
            }
        });
        let needle = PixelView::filled(1, 1, Rgba::splat(0xFF));
        assert_eq!(locate(&hay, &needle).unwrap(), Some((5, 2)));
    }

    #[test]
    fn test_locate_in_relative_haystack() {
        let hay = haystack();
        let window = hay.sub_view_relative(Rect::new(2, 2, 7, 7));
        let needle = hay.copy_sub_region(Rect::new(4, 5, 3, 3)).unwrap();
        assert_eq!(locate(&window, &needle).unwrap(), Some((2, 3)));
    }

    #[test]
    fn test_locate_propagates_out_of_range() {
        let hay = haystack();
        // needle matches the haystack at (0, 0), then reads past its
        // parent's right edge
        let broken = hay
            .copy_sub_region(Rect::new(0, 0, 1, 1))
            .unwrap()
            .sub_view_relative(Rect::from_size(2, 2));
        let err = locate(&hay, &broken).unwrap_err();
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_locate_skips_unreadable_non_matches() {
        // the needle's readable first pixel never occurs, so no candidate
        // reaches the unreadable one
        let hay = haystack();
        let needle = PixelView::filled(1, 1, Rgba::splat(0x42)).sub_view_relative(Rect::from_size(2, 2));
        assert_eq!(locate(&hay, &needle).unwrap(), None);
    }

    #[test]
    fn test_edge_policy_candidates() {
        assert_eq!(EdgePolicy::default(), EdgePolicy::Exclusive);
        assert_eq!(EdgePolicy::Exclusive.candidates(0, 0), 0);
        assert_eq!(EdgePolicy::Inclusive.candidates(0, 0), 1);
        assert_eq!(EdgePolicy::Inclusive.candidates(u32::MAX, 0), u32::MAX);
    }
}
