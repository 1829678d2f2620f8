//! Median (order-statistic) smoothing.
//!
//! Removes salt-and-pepper noise while preserving edges. Neighbors that fall
//! outside the grid are replaced by the nearest edge sample, so every window
//! holds exactly `mask_size²` values and the middle one is a true median.

use crate::grid::PixelGrid;

/// Median of the clamped `mask_size × mask_size` window centered on `(row, col)`.
///
/// `mask_size` must be odd; callers go through [`Filter::validate`](super::Filter::validate).
pub fn median_at(grid: &PixelGrid, row: usize, col: usize, mask_size: usize) -> u8 {
    let mut window = Vec::with_capacity(mask_size * mask_size);
    median_with_scratch(grid, row, col, mask_size, &mut window)
}

/// Same as [`median_at`] but reuses `window` between calls to avoid
/// allocating once per pixel.
pub(crate) fn median_with_scratch(
    grid: &PixelGrid,
    row: usize,
    col: usize,
    mask_size: usize,
    window: &mut Vec<u8>,
) -> u8 {
    let offset = (mask_size / 2) as isize;
    let (row, col) = (row as isize, col as isize);

    window.clear();
    for dy in -offset..=offset {
        for dx in -offset..=offset {
            window.push(grid.clamped(row + dy, col + dx));
        }
    }

    let mid = window.len() / 2;
    *window.select_nth_unstable(mid).1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_median(values: &[u8]) -> u8 {
        let mut v = values.to_vec();
        v.sort_unstable();
        v[v.len() / 2]
    }

    #[test]
    fn test_median_removes_salt() {
        let grid = PixelGrid::from_fn(5, 5, |(r, c)| if (r, c) == (2, 2) { 255 } else { 128 })
            .unwrap();
        assert_eq!(median_at(&grid, 2, 2, 3), 128);
    }

    #[test]
    fn test_corner_uses_edge_replication() {
        // 1 2 3
        // 4 5 6
        // 7 8 9
        let grid = PixelGrid::new(3, 3, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();

        // Window at (0,0) after clamping:
        // 1 1 2
        // 1 1 2
        // 4 4 5
        let expected = sorted_median(&[1, 1, 2, 1, 1, 2, 4, 4, 5]);
        assert_eq!(expected, 2);
        assert_eq!(median_at(&grid, 0, 0, 3), expected);

        // Bottom-right corner:
        // 5 6 6
        // 8 9 9
        // 8 9 9
        assert_eq!(median_at(&grid, 2, 2, 3), 8);
    }

    #[test]
    fn test_window_larger_than_grid() {
        let grid = PixelGrid::new(2, 1, vec![10, 200]).unwrap();
        // 7x7 window over a 2x1 grid: columns clamp to {0,1}; at col 0 the
        // offsets -3..=0 map to 10 and 1..=3 map to 200, so 4 of 7 are 10.
        assert_eq!(median_at(&grid, 0, 0, 7), 10);
        assert_eq!(median_at(&grid, 0, 1, 7), 200);
    }

    #[test]
    fn test_selection_matches_full_sort() {
        let grid = PixelGrid::from_fn(9, 7, |(r, c)| ((r * 37 + c * 101) % 256) as u8).unwrap();
        let mut scratch = Vec::new();
        for mask in [3, 5, 7] {
            let offset = (mask / 2) as isize;
            for r in 0..grid.height() {
                for c in 0..grid.width() {
                    let mut values = Vec::new();
                    for dy in -offset..=offset {
                        for dx in -offset..=offset {
                            values.push(grid.clamped(r as isize + dy, c as isize + dx));
                        }
                    }
                    assert_eq!(
                        median_with_scratch(&grid, r, c, mask, &mut scratch),
                        sorted_median(&values),
                        "mask {mask} at ({r},{c})"
                    );
                }
            }
        }
    }
}
