//! Image decoding and resampling into a per-cell color grid.

use image::imageops::{self, FilterType};
use image::DynamicImage;

use crate::error::SampleError;
use crate::format::Rgb;
use crate::grid::ColorGrid;
use crate::params::MAX_CELLS;

/// Smooth filter used for every resample. Nearest-neighbor would pick one
/// source pixel per cell instead of blending the region it covers.
const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

/// Decode an uploaded image, guessing the format from its content
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, SampleError> {
    image::load_from_memory(bytes).map_err(|e| SampleError::Decode(e.to_string()))
}

/// Row count that keeps the aspect ratio at `num_columns` columns (at least 1)
pub fn target_rows(width: u32, height: u32, num_columns: u32) -> u32 {
    let rows = (f64::from(height) * f64::from(num_columns) / f64::from(width)).round();
    if rows < 1.0 {
        1
    } else if rows >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rows as u32
    }
}

/// Resample `image` to `num_columns` columns and read one color per cell.
///
/// Alpha is discarded before resampling; callers that care about
/// transparency must composite onto a background first.
pub fn sample(image: &DynamicImage, num_columns: u32) -> Result<ColorGrid, SampleError> {
    sample_within(image, num_columns, MAX_CELLS)
}

/// [`sample`] with an explicit ceiling on `rows * num_columns`.
///
/// The ceiling is checked before any pixel buffer is allocated.
pub fn sample_within(
    image: &DynamicImage,
    num_columns: u32,
    max_cells: u64,
) -> Result<ColorGrid, SampleError> {
    if num_columns < 1 {
        return Err(SampleError::Dimension(
            "number of columns must be at least 1".to_string(),
        ));
    }
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(SampleError::Decode(format!(
            "image has no pixels ({}x{})",
            width, height
        )));
    }

    let rows = target_rows(width, height, num_columns);
    if u64::from(rows) * u64::from(num_columns) > max_cells {
        return Err(SampleError::TooLarge {
            rows,
            cols: num_columns,
            max_cells,
        });
    }
    let opaque = image.to_rgb8();
    let resized = imageops::resize(&opaque, num_columns, rows, RESAMPLE_FILTER);

    let cells: Vec<Vec<Rgb>> = (0..rows)
        .map(|i| {
            (0..num_columns)
                .map(|j| Rgb::from(*resized.get_pixel(j, i)))
                .collect()
        })
        .collect();

    let grid = ColorGrid::from_rows(cells).map_err(|e| SampleError::Dimension(e.to_string()))?;
    debug_assert_eq!(grid.rows(), rows as usize);
    debug_assert_eq!(grid.cols(), num_columns as usize);
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ClampConfig;
    use image::{ImageFormat, Rgba, RgbaImage, RgbImage};
    use std::io::Cursor;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }))
    }

    #[test]
    fn test_target_rows_rounding() {
        assert_eq!(target_rows(4, 2, 2), 1);
        assert_eq!(target_rows(100, 50, 10), 5);
        assert_eq!(target_rows(3, 2, 2), 1); // 1.33
        assert_eq!(target_rows(4, 3, 2), 2); // 1.5 rounds up
        assert_eq!(target_rows(1000, 1, 1), 1); // minimum
    }

    #[test]
    fn test_grid_dimensions_follow_aspect_ratio() {
        let image = gradient(640, 480);
        for cols in [1u32, 7, 50, 300] {
            let grid = sample(&image, cols).unwrap();
            assert_eq!(grid.cols(), cols as usize);
            assert_eq!(grid.rows(), target_rows(640, 480, cols) as usize);
        }
    }

    #[test]
    fn test_four_by_two_to_two_columns() {
        let image = gradient(4, 2);
        let grid = sample(&image, 2).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (1, 2));
    }

    #[test]
    fn test_clamped_request_matches_limit() {
        let config = ClampConfig::default();
        let image = gradient(600, 300);
        let clamped = sample(&image, config.clamp_columns(500).unwrap()).unwrap();
        let limit = sample(&image, config.clamp_columns(300).unwrap()).unwrap();
        assert_eq!(clamped, limit);
    }

    #[test]
    fn test_zero_columns_rejected() {
        let image = gradient(4, 4);
        assert!(matches!(sample(&image, 0), Err(SampleError::Dimension(_))));
    }

    #[test]
    fn test_empty_image_is_undecodable() {
        let image = DynamicImage::new_rgb8(0, 0);
        assert!(matches!(sample(&image, 3), Err(SampleError::Decode(_))));
    }

    #[test]
    fn test_tall_narrow_image_rejected() {
        let mut bytes = Vec::new();
        gradient(1, 20_000)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let image = decode(&bytes).unwrap();

        assert_eq!(target_rows(1, 20_000, 300), 6_000_000);
        assert_eq!(
            sample(&image, 300),
            Err(SampleError::TooLarge {
                rows: 6_000_000,
                cols: 300,
                max_cells: MAX_CELLS,
            })
        );
    }

    #[test]
    fn test_ceiling_is_inclusive() {
        let image = gradient(4, 4);
        assert_eq!(sample_within(&image, 3, 9).unwrap().cell_count(), 9);
        assert!(matches!(
            sample_within(&image, 3, 8),
            Err(SampleError::TooLarge { rows: 3, cols: 3, .. })
        ));
    }

    #[test]
    fn test_resample_blends_regions() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                image::Rgb([0, 0, 0])
            } else {
                image::Rgb([255, 255, 255])
            }
        }));
        let grid = sample(&image, 1).unwrap();
        let cell = grid.get(0, 0).unwrap();
        // Nearest-neighbor would yield pure black or pure white
        assert!(cell.r > 0 && cell.r < 255, "got {:?}", cell);
    }

    #[test]
    fn test_uniform_image_keeps_color() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 20, image::Rgb([200, 10, 90])));
        let grid = sample(&image, 8).unwrap();
        assert!(grid.iter_rows().flatten().all(|c| *c == Rgb::new(200, 10, 90)));
    }

    #[test]
    fn test_alpha_is_dropped() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 0])));
        let grid = sample(&image, 2).unwrap();
        assert_eq!(grid.get(0, 0), Some(Rgb::new(10, 20, 30)));
    }

    #[test]
    fn test_decode_png() {
        let mut bytes = Vec::new();
        gradient(8, 4)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let image = decode(&bytes).unwrap();
        assert_eq!((image.width(), image.height()), (8, 4));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode(b"definitely not an image"),
            Err(SampleError::Decode(_))
        ));
    }
}
