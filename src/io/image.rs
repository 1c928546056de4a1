//! Image loading and RGB to 8-bit gray conversion.
//!
//! Pixels are decoded to floating RGB in `[0, 1]`, converted with the chosen
//! [`GrayMethod`], scaled by 255 and rounded half to even.

use std::path::Path;

use ::image::{DynamicImage, GrayImage, ImageError, Luma, Rgb32FImage};

use crate::domain::{GrayMethod, MAX_LEVEL, quantize_level};
use crate::error::{AppError, AppResult};

/// Decode an image file and convert it to 8-bit gray.
pub fn load_gray8(path: &Path, method: GrayMethod) -> AppResult<GrayImage> {
    let decoded = ::image::open(path).map_err(|e| image_error(path, "read", e))?;
    tracing::debug!(
        path = %path.display(),
        width = decoded.width(),
        height = decoded.height(),
        ?method,
        "image decoded"
    );
    Ok(to_gray8(&decoded, method))
}

/// Convert an already-decoded image to 8-bit gray.
pub fn to_gray8(image: &DynamicImage, method: GrayMethod) -> GrayImage {
    let rgb: Rgb32FImage = image.to_rgb32f();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([gray_level(r as f64, g as f64, b as f64, method)])
    })
}

/// Gray level of one normalized RGB pixel.
pub fn gray_level(r: f64, g: f64, b: f64, method: GrayMethod) -> u8 {
    quantize_level(method.convert(r, g, b) * MAX_LEVEL as f64)
}

/// Save an 8-bit gray image; the format follows the file extension.
pub fn save_gray8(path: &Path, image: &GrayImage) -> AppResult<()> {
    image.save(path).map_err(|e| image_error(path, "write", e))
}

fn image_error(path: &Path, action: &str, err: ImageError) -> AppError {
    match err {
        ImageError::IoError(source) => {
            AppError::io(format!("Failed to {action} image '{}'", path.display()), source)
        }
        other => AppError::unsupported(format!("Cannot {action} image '{}': {other}", path.display())),
    }
}
