//! Brightness profile along one image row.
//!
//! The test image is a row of `n` equally wide gray patches. We sample the
//! center of each patch: column `i` is `linspace(0, L - 1, n + 1)[i] + L / n / 2`
//! rounded half to even, for an image `L` pixels wide.

use ::image::GrayImage;

use crate::domain::MAX_LEVEL;
use crate::error::{AppError, AppResult};

/// Sampled patch centers and their gray levels, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub row: u32,
    pub columns: Vec<u32>,
    pub levels: Vec<u8>,
}

impl Profile {
    /// Same profile read right to left.
    pub fn reversed(mut self) -> Self {
        self.columns.reverse();
        self.levels.reverse();
        self
    }
}

pub fn breakpoint_columns(width: usize, count: usize) -> AppResult<Vec<u32>> {
    if count == 0 {
        return Err(AppError::invalid("At least one breakpoint is required"));
    }
    if width < count {
        return Err(AppError::invalid(format!(
            "Image width {width} is smaller than the number of breakpoints {count}"
        )));
    }

    let step = (width - 1) as f64 / count as f64;
    let half_patch = width as f64 / count as f64 * 0.5;
    Ok((0..count)
        .map(|i| {
            let c = (i as f64 * step + half_patch).round_ties_even();
            (c as usize).min(width - 1) as u32
        })
        .collect())
}

/// Sample `count` patch centers on `row`; negative rows count from the bottom.
pub fn sample_profile(gray: &GrayImage, row: isize, count: usize) -> AppResult<Profile> {
    let (width, height) = gray.dimensions();
    let resolved = if row < 0 { height as isize + row } else { row };
    if resolved < 0 || resolved >= height as isize {
        return Err(AppError::invalid(format!(
            "Row {row} is outside an image {height} pixels high"
        )));
    }
    let row = resolved as u32;

    let columns = breakpoint_columns(width as usize, count)?;
    let levels = columns.iter().map(|&c| gray.get_pixel(c, row)[0]).collect();

    Ok(Profile {
        row,
        columns,
        levels,
    })
}

/// Nominal patch levels: `linspace(0, 255, count)` truncated to integers.
pub fn reference_levels(count: usize) -> AppResult<Vec<u8>> {
    match count {
        0 => Err(AppError::invalid("At least one breakpoint is required")),
        1 => Ok(vec![0]),
        _ => {
            let step = MAX_LEVEL as f64 / (count - 1) as f64;
            let mut levels: Vec<u8> = (0..count).map(|i| (i as f64 * step).trunc() as u8).collect();
            // Endpoint is exact, not accumulated.
            levels[count - 1] = MAX_LEVEL;
            Ok(levels)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::Luma;

    #[test]
    fn sixteen_patches_on_a_1024_wide_image() {
        let cols = breakpoint_columns(1024, 16).unwrap();
        assert_eq!(cols.len(), 16);
        assert_eq!(cols[0], 32);
        // 1023 / 16 + 32 = 95.9375
        assert_eq!(cols[1], 96);
        // 15 * 63.9375 + 32 = 991.0625
        assert_eq!(cols[15], 991);
    }

    #[test]
    fn half_pixel_centers_round_to_even() {
        // width 5, n 2: [0 + 1.25, 2 + 1.25] -> 1.25, 3.25
        assert_eq!(breakpoint_columns(5, 2).unwrap(), vec![1, 3]);
        // width 3, n 3: step 2/3, half 0.5 -> 0.5, 1.1667, 1.8333
        assert_eq!(breakpoint_columns(3, 3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn too_narrow_images_are_rejected() {
        assert!(matches!(breakpoint_columns(8, 16), Err(AppError::InvalidInput(_))));
        assert!(matches!(breakpoint_columns(8, 0), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn reference_levels_truncate() {
        let levels = reference_levels(16).unwrap();
        assert_eq!(levels[0], 0);
        assert_eq!(levels[1], 17);
        assert_eq!(levels[15], 255);
        assert_eq!(reference_levels(3).unwrap(), vec![0, 127, 255]);
        assert_eq!(reference_levels(1).unwrap(), vec![0]);
    }

    #[test]
    fn negative_rows_count_from_the_bottom() {
        let gray = GrayImage::from_fn(8, 3, |x, y| Luma([(x * 10 + y) as u8]));
        let top = sample_profile(&gray, 0, 4).unwrap();
        let bottom = sample_profile(&gray, -1, 4).unwrap();
        assert_eq!(top.row, 0);
        assert_eq!(bottom.row, 2);
        // step 7/4, half 1: 1, 2.75, 4.5, 6.25 -> 1, 3, 4, 6
        assert_eq!(top.columns, vec![1, 3, 4, 6]);
        assert_eq!(top.levels, vec![10, 30, 40, 60]);
        assert_eq!(bottom.levels, vec![12, 32, 42, 62]);

        let rev = bottom.reversed();
        assert_eq!(rev.levels, vec![62, 42, 32, 12]);

        assert!(sample_profile(&gray, 3, 4).is_err());
        assert!(sample_profile(&gray, -4, 4).is_err());
    }
}
