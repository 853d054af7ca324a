use std::sync::Arc;

use crate::foundation::error::{MemeError, MemeResult};

/// Decoded template artwork in premultiplied RGBA8 form, at its natural resolution.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded template bytes (PNG, JPEG, ...) into a [`PreparedImage`].
///
/// Undecodable or empty artwork is an [`MemeError::AssetLoad`]; no partial image is returned.
pub fn decode_image(bytes: &[u8]) -> MemeResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| MemeError::asset_load(format!("decode template image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(MemeError::asset_load(format!(
            "template image has degenerate size {width}x{height}"
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
