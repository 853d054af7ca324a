use std::io::Cursor;
use std::sync::Arc;

use anyhow::Context as _;
use base64::Engine as _;

use crate::foundation::error::{MemeError, MemeResult};
use crate::render::backend::{FrameRGBA, unpremul_px};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A finished meme raster, PNG encoded.
///
/// Cloning is cheap; the encoded bytes are shared and never change after rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    /// Width in pixels (equals the template's natural width).
    pub width: u32,
    /// Height in pixels (equals the template's natural height).
    pub height: u32,
    png: Arc<[u8]>,
}

impl RenderedImage {
    /// Encode a frame losslessly.
    pub fn from_frame(frame: &FrameRGBA) -> MemeResult<Self> {
        let png = encode_png(frame)?;
        Ok(Self {
            width: frame.width,
            height: frame.height,
            png: png.into(),
        })
    }

    /// Encoded PNG bytes.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Self-contained `data:image/png;base64,...` URL.
    pub fn data_url(&self) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.png);
        format!("{PNG_DATA_URL_PREFIX}{b64}")
    }
}

/// Encode a frame as PNG, un-premultiplying alpha first when needed.
pub fn encode_png(frame: &FrameRGBA) -> MemeResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(MemeError::surface_unavailable(format!(
            "frame byte length {} does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let straight = if frame.premultiplied {
        let mut out = Vec::with_capacity(frame.data.len());
        for px in frame.data.chunks_exact(4) {
            out.extend_from_slice(&unpremul_px([px[0], px[1], px[2], px[3]]));
        }
        out
    } else {
        frame.data.clone()
    };

    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| MemeError::surface_unavailable("frame buffer has the wrong size"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Extract the PNG bytes from a `data:image/png;base64,...` URL.
pub fn decode_data_url(url: &str) -> MemeResult<Vec<u8>> {
    let b64 = url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| MemeError::validation("not a base64 PNG data URL"))?;
    base64::engine::general_purpose::STANDARD
        .decode(b64)
        .map_err(|e| MemeError::validation(format!("invalid base64 in data URL: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
