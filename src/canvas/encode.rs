use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::canvas::composite;
use crate::color::ColorPair;
use crate::foundation::error::{PlacegenError, PlacegenResult};
use crate::label::LabelLayer;
use crate::table::row::{ImageFormat, ValidatedRow};

/// Final encoded image bytes for one row.
#[derive(Clone, Debug)]
pub struct GeneratedImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

/// Build the background canvas, composite the label layer, and encode.
///
/// The canvas is exactly `width x height`, filled with the pair's background
/// color and fully opaque. Encoded channel layout follows the format: RGBA for
/// png, RGB for jpg/gif.
pub fn compose(
    row: &ValidatedRow,
    colors: &ColorPair,
    label: &LabelLayer,
) -> PlacegenResult<GeneratedImage> {
    let byte_len = (row.width as usize)
        .checked_mul(row.height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| PlacegenError::render("canvas size overflow"))?;

    let bg = colors.background;
    let mut canvas = vec![0u8; byte_len];
    for px in canvas.chunks_exact_mut(4) {
        px.copy_from_slice(&[bg.r, bg.g, bg.b, 255]);
    }

    composite::over_canvas(&mut canvas, row.width, row.height, label)?;

    let bytes = encode_canvas(canvas, row.width, row.height, row.format)?;
    Ok(GeneratedImage {
        format: row.format,
        bytes,
    })
}

/// Persist an encoded image as `{out_dir}/{width}x{height}.{format}`, using
/// the literal width/height text from the row.
pub fn write_image(
    out_dir: &Path,
    row: &ValidatedRow,
    image: &GeneratedImage,
) -> PlacegenResult<PathBuf> {
    let path = out_dir.join(row.file_name());
    std::fs::write(&path, &image.bytes)
        .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(path)
}

fn encode_canvas(
    rgba: Vec<u8>,
    width: u32,
    height: u32,
    format: ImageFormat,
) -> PlacegenResult<Vec<u8>> {
    let dyn_img = match format {
        ImageFormat::Png => {
            let img = image::RgbaImage::from_raw(width, height, rgba)
                .ok_or_else(|| PlacegenError::encode("canvas buffer does not match dimensions"))?;
            image::DynamicImage::ImageRgba8(img)
        }
        ImageFormat::Jpg | ImageFormat::Gif => {
            // Opaque canvas: dropping alpha loses nothing.
            let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
            for px in rgba.chunks_exact(4) {
                rgb.extend_from_slice(&px[..3]);
            }
            let img = image::RgbImage::from_raw(width, height, rgb)
                .ok_or_else(|| PlacegenError::encode("canvas buffer does not match dimensions"))?;
            image::DynamicImage::ImageRgb8(img)
        }
    };

    let mut bytes = Vec::new();
    dyn_img
        .write_to(&mut Cursor::new(&mut bytes), encoder_format(format))
        .with_context(|| format!("encode {format} image"))?;
    Ok(bytes)
}

fn encoder_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Jpg => image::ImageFormat::Jpeg,
        ImageFormat::Gif => image::ImageFormat::Gif,
        ImageFormat::Png => image::ImageFormat::Png,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/encode.rs"]
mod tests;
