//! Discrete Laplacian edge detection.
//!
//! Fixed 3x3 kernel with center weight 8 and every neighbor at -1. Only
//! interior pixels are computed; the one-pixel border has no full
//! neighborhood and stays 0. Unlike the median filter there is no edge
//! replication here.

use crate::grid::PixelGrid;

/// The only mask size this filter accepts.
pub const MASK_SIZE: usize = 3;

pub const KERNEL: [[i32; 3]; 3] = [[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]];

#[inline]
pub fn is_interior(grid: &PixelGrid, row: usize, col: usize) -> bool {
    row >= 1 && col >= 1 && row + 1 < grid.height() && col + 1 < grid.width()
}

/// Laplacian response at `(row, col)`, or `None` on the border.
///
/// The signed sum is clamped to `[0, 255]`: negative responses become 0.
pub fn laplacian_at(grid: &PixelGrid, row: usize, col: usize) -> Option<u8> {
    if !is_interior(grid, row, col) {
        return None;
    }

    let mut sum = 0i32;
    for (ky, kernel_row) in KERNEL.iter().enumerate() {
        for (kx, &weight) in kernel_row.iter().enumerate() {
            sum += grid[(row + ky - 1, col + kx - 1)] as i32 * weight;
        }
    }

    Some(sum.clamp(0, 255) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_region_is_zero() {
        let grid = PixelGrid::filled(4, 4, 90).unwrap();
        assert_eq!(laplacian_at(&grid, 1, 1), Some(0));
        assert_eq!(laplacian_at(&grid, 2, 2), Some(0));
    }

    #[test]
    fn test_bright_spot_saturates() {
        let grid = PixelGrid::from_fn(3, 3, |(r, c)| if (r, c) == (1, 1) { 200 } else { 10 })
            .unwrap();
        // 8 * 200 - 8 * 10 = 1520
        assert_eq!(laplacian_at(&grid, 1, 1), Some(255));
    }

    #[test]
    fn test_dark_spot_clamps_to_zero() {
        let grid = PixelGrid::from_fn(3, 3, |(r, c)| if (r, c) == (1, 1) { 0 } else { 50 })
            .unwrap();
        // -400 clamps to 0 rather than taking the magnitude
        assert_eq!(laplacian_at(&grid, 1, 1), Some(0));
    }

    #[test]
    fn test_moderate_response_is_exact() {
        let grid = PixelGrid::from_fn(3, 3, |(r, c)| if (r, c) == (1, 1) { 30 } else { 20 })
            .unwrap();
        assert_eq!(laplacian_at(&grid, 1, 1), Some(80));
    }

    #[test]
    fn test_border_is_not_computed() {
        let grid = PixelGrid::filled(5, 4, 255).unwrap();
        for col in 0..5 {
            assert_eq!(laplacian_at(&grid, 0, col), None);
            assert_eq!(laplacian_at(&grid, 3, col), None);
        }
        for row in 0..4 {
            assert_eq!(laplacian_at(&grid, row, 0), None);
            assert_eq!(laplacian_at(&grid, row, 4), None);
        }
    }

    #[test]
    fn test_thin_grid_has_no_interior() {
        let grid = PixelGrid::filled(10, 2, 1).unwrap();
        assert!((0..2).all(|r| (0..10).all(|c| laplacian_at(&grid, r, c).is_none())));
    }
}
