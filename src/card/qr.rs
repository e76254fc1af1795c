//! Verification URL building and QR rasterization.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use qrcode::{Color, EcLevel, QrCode};

use super::CardError;

/// Quiet-zone width around the code, in modules.
const QUIET_ZONE_MODULES: u32 = 4;
/// Minimum raster edge for print-scale reproduction.
const MIN_RASTER_PX: u32 = 200;

/// Build the public verification URL embedded in the card QR.
///
/// A single trailing slash on the origin is trimmed; no other normalization.
pub fn verification_url(origin: &str, vin: &str) -> Result<String, CardError> {
    if vin.trim().is_empty() {
        return Err(CardError::InvalidInput(
            "vin must not be empty".to_string(),
        ));
    }
    let origin = origin.strip_suffix('/').unwrap_or(origin);
    Ok(format!("{}/verify/{}", origin, vin))
}

/// A rasterized QR code: raw 8-bit greyscale pixels plus PNG encoding.
#[derive(Debug, Clone)]
pub struct QrImage {
    /// Row-major greyscale pixels, `size_px * size_px` bytes, 0 = dark.
    pub pixels: Vec<u8>,
    /// Edge length in pixels (the raster is square).
    pub size_px: u32,
    /// PNG encoding of the raster.
    pub png: Vec<u8>,
}

impl QrImage {
    /// Base64 data URL, for callers that want an embeddable string.
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", BASE64.encode(&self.png))
    }
}

/// Encode a verification URL as a QR raster at error-correction level H.
///
/// Level H survives roughly 30% surface damage, which is what a laminated
/// card in a wallet needs. The module scale is chosen so the raster edge is
/// at least [`MIN_RASTER_PX`]; encoding is deterministic for a given URL.
pub fn encode_verification_qr(url: &str) -> Result<QrImage, CardError> {
    let code = QrCode::with_error_correction_level(url, EcLevel::H)
        .map_err(|e| CardError::QrEncodingFailed(e.to_string()))?;

    let width = code.width() as u32;
    let total_modules = width + 2 * QUIET_ZONE_MODULES;
    let scale = MIN_RASTER_PX.div_ceil(total_modules).max(1);
    let size_px = total_modules * scale;

    let mut pixels = vec![0xFFu8; (size_px * size_px) as usize];
    for y in 0..width {
        for x in 0..width {
            if code[(x as usize, y as usize)] == Color::Dark {
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = (QUIET_ZONE_MODULES + x) * scale + dx;
                        let py = (QUIET_ZONE_MODULES + y) * scale + dy;
                        pixels[(py * size_px + px) as usize] = 0x00;
                    }
                }
            }
        }
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&pixels, size_px, size_px, image::ColorType::L8)
        .map_err(|e| CardError::QrEncodingFailed(e.to_string()))?;

    Ok(QrImage {
        pixels,
        size_px,
        png,
    })
}
