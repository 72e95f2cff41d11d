use std::path::Path;

use anyhow::Context;

use crate::foundation::error::OrbitResult;
use crate::foundation::math::force_opaque_rgba8_in_place;
use crate::render::backend::FrameRGBA;

/// Decode an encoded image (PNG, JPEG) into an opaque straight-alpha frame.
///
/// Alpha is discarded: video frames carry color only.
pub fn decode_image(bytes: &[u8]) -> OrbitResult<FrameRGBA> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut data = rgba.into_raw();
    force_opaque_rgba8_in_place(&mut data);

    Ok(FrameRGBA {
        width,
        height,
        data,
        premultiplied: false,
    })
}

pub fn decode_image_file(path: &Path) -> OrbitResult<FrameRGBA> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let frame =
        decode_image(&bytes).with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
