use std::borrow::Cow;
use std::io::Cursor;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use tracing::debug;

/// Longest side Claude vision accepts, with some headroom under the 8000px hard limit.
pub const MAX_EDGE_PX: u32 = 7680;

/// Raw size ceiling. Base64 inflates by 4/3 and the API caps an image at 5 MB.
pub const MAX_IMAGE_BYTES: usize = 3_750_000;

/// Width a full-page capture is scaled to when it has to be re-encoded.
const TARGET_WIDTH: u32 = 1280;
const JPEG_QUALITY: u8 = 80;
const MIN_WIDTH: u32 = 320;

/// Bound a page capture to what the vision API accepts.
///
/// Captures already inside the limits are returned untouched, as are small
/// captures whose format cannot be read. Anything larger is scaled to
/// `TARGET_WIDTH`, cropped to the top `MAX_EDGE_PX` rows and re-encoded as
/// JPEG, halving again until it fits `MAX_IMAGE_BYTES`.
pub fn fit_for_vision(image: &[u8]) -> Result<Cow<'_, [u8]>> {
    if image.len() <= MAX_IMAGE_BYTES {
        match dimensions(image) {
            Some((w, h)) if w <= MAX_EDGE_PX && h <= MAX_EDGE_PX => return Ok(Cow::Borrowed(image)),
            None => return Ok(Cow::Borrowed(image)),
            Some(_) => {}
        }
    }

    let decoded = image::load_from_memory(image).context("Failed to decode page capture")?;
    let (width, height) = (decoded.width(), decoded.height());

    let scaled = if width > TARGET_WIDTH {
        let scaled_height = (u64::from(height) * u64::from(TARGET_WIDTH) / u64::from(width)).max(1) as u32;
        decoded.resize_exact(TARGET_WIDTH, scaled_height, FilterType::Triangle)
    } else {
        decoded
    };

    // Landing pages lead with their pitch, so the top of the page is kept.
    let mut bounded = scaled.crop_imm(0, 0, scaled.width(), scaled.height().min(MAX_EDGE_PX));

    loop {
        let encoded = encode_jpeg(&bounded)?;
        if encoded.len() <= MAX_IMAGE_BYTES || bounded.width() <= MIN_WIDTH {
            debug!(
                original_width = width,
                original_height = height,
                width = bounded.width(),
                height = bounded.height(),
                bytes = encoded.len(),
                "Capture downscaled for vision"
            );
            return Ok(Cow::Owned(encoded));
        }
        bounded = bounded.resize(bounded.width() / 2, bounded.height() / 2, FilterType::Triangle);
    }
}

fn dimensions(image: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(image))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .encode_image(&image.to_rgb8())
        .context("Failed to encode page capture")?;
    Ok(buf)
}
