//! Parallel pattern search using Rayon.
//!
//! Same results as [`crate::search`], with haystack rows fanned out across
//! the global Rayon pool. Views are immutable, so every worker reads the
//! shared haystack buffer without synchronization.
//!
//! # Example
//!
//! ```rust
//! use pic_core::{PixelView, Rect, Rgba};
//! use pic_ops::{parallel, SearchOptions};
//!
//! let hay = PixelView::from_fn(64, 64, |x, y| Rgba::new(x as u8, y as u8, 7, 255));
//! let needle = hay.copy_sub_region(Rect::new(40, 12, 5, 5))?;
//! assert_eq!(parallel::locate(&hay, &needle, &SearchOptions::default())?, Some((40, 12)));
//! # Ok::<(), pic_core::Error>(())
//! ```

use std::ops::ControlFlow;
use std::sync::Arc;

use pic_core::{PixelView, Result};
use rayon::prelude::*;
use tracing::debug;

use crate::search::{Grid, SearchOptions};

/// Parallel [`locate_with`](crate::search::locate_with).
///
/// Rows are searched concurrently but the result is still the first match in
/// row-major order. An access error in an earlier row wins over a match in a
/// later one, as in the sequential scan.
pub fn locate(
    haystack: &PixelView,
    needle: &PixelView,
    options: &SearchOptions,
) -> Result<Option<(u32, u32)>> {
    let grid = Grid::new(haystack, needle, options);
    debug!(cols = grid.cols, rows = grid.rows, "parallel search");
    if grid.cols == 0 {
        return Ok(None);
    }
    let parent = Arc::new(haystack.clone());

    let hit = (0..grid.rows)
        .into_par_iter()
        .map(|y| -> Result<Option<(u32, u32)>> {
            let mut found = None;
            grid.scan_row(&parent, needle, y, |pos| {
                found = Some(pos);
                ControlFlow::Break(())
            })?;
            Ok(found)
        })
        .find_map_first(|row| row.transpose());

    hit.transpose()
}

/// Parallel [`locate_all`](crate::search::locate_all).
pub fn locate_all(
    haystack: &PixelView,
    needle: &PixelView,
    options: &SearchOptions,
) -> Result<Vec<(u32, u32)>> {
    let grid = Grid::new(haystack, needle, options);
    debug!(cols = grid.cols, rows = grid.rows, "parallel search (all)");
    if grid.cols == 0 {
        return Ok(Vec::new());
    }
    let parent = Arc::new(haystack.clone());

    let rows: Vec<Vec<(u32, u32)>> = (0..grid.rows)
        .into_par_iter()
        .map(|y| -> Result<Vec<(u32, u32)>> {
            let mut found = Vec::new();
            grid.scan_row(&parent, needle, y, |pos| {
                found.push(pos);
                ControlFlow::Continue(())
            })?;
            Ok(found)
        })
        .collect::<Result<_>>()?;

    Ok(rows.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{self, EdgePolicy};
    use pic_core::{Rect, Rgba};

    fn tiled() -> PixelView {
        PixelView::from_fn(40, 30, |x, y| Rgba::splat(((y % 5) * 5 + x % 5) as u8))
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let hay = tiled();
        let needle = hay.copy_sub_region(Rect::new(7, 3, 4, 4)).unwrap();
        for edge in [EdgePolicy::Exclusive, EdgePolicy::Inclusive] {
            let options = SearchOptions::default().with_edge(edge);
            assert_eq!(
                locate(&hay, &needle, &options).unwrap(),
                search::locate_with(&hay, &needle, &options).unwrap()
            );
            assert_eq!(
                locate_all(&hay, &needle, &options).unwrap(),
                search::locate_all(&hay, &needle, &options).unwrap()
            );
        }
    }

    #[test]
    fn test_parallel_first_match() {
        let hay = tiled();
        let needle = hay.copy_sub_region(Rect::new(7, 3, 4, 4)).unwrap();
        assert_eq!(locate(&hay, &needle, &SearchOptions::default()).unwrap(), Some((2, 3)));
    }

    #[test]
    fn test_parallel_not_found() {
        let hay = tiled();
        let needle = PixelView::filled(2, 2, Rgba::splat(0xFF));
        let options = SearchOptions::default();
        assert_eq!(locate(&hay, &needle, &options).unwrap(), None);
        assert!(locate_all(&hay, &needle, &options).unwrap().is_empty());
    }

    #[test]
    fn test_parallel_propagates_out_of_range() {
        let hay = tiled();
        // matches at (0, 0), then reads past its parent's right edge
        let broken = hay
            .copy_sub_region(Rect::new(0, 0, 1, 1))
            .unwrap()
            .sub_view_relative(Rect::from_size(2, 2));
        let options = SearchOptions::default();
        assert!(locate(&hay, &broken, &options).unwrap_err().is_bounds_error());
        assert!(locate_all(&hay, &broken, &options).unwrap_err().is_bounds_error());
    }
}
