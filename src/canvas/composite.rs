use crate::foundation::error::{PlacegenError, PlacegenResult};
use crate::label::LabelLayer;

pub type PremulRgba8 = [u8; 4];

/// Standard alpha-over of one premultiplied pixel onto another.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite `layer` onto an RGBA8 canvas with the layer's top-left corner at
/// the canvas origin. Layer pixels falling outside the canvas are clipped.
///
/// The canvas is expected to be opaque (alpha 255 everywhere), so its
/// premultiplied and straight representations coincide and the result stays
/// opaque.
pub fn over_canvas(
    canvas: &mut [u8],
    canvas_w: u32,
    canvas_h: u32,
    layer: &LabelLayer,
) -> PlacegenResult<()> {
    let expected = (canvas_w as usize)
        .checked_mul(canvas_h as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| PlacegenError::render("canvas size overflow"))?;
    if canvas.len() != expected {
        return Err(PlacegenError::render(
            "over_canvas expects an rgba8 buffer matching width*height*4",
        ));
    }
    if layer.rgba8_premul.len() != (layer.width as usize) * (layer.height as usize) * 4 {
        return Err(PlacegenError::render(
            "label layer buffer does not match its dimensions",
        ));
    }

    let rows = layer.height.min(canvas_h) as usize;
    let cols = layer.width.min(canvas_w) as usize;
    for y in 0..rows {
        let src_base = y * layer.width as usize * 4;
        let dst_base = y * canvas_w as usize * 4;
        for x in 0..cols {
            let s = &layer.rgba8_premul[src_base + x * 4..src_base + x * 4 + 4];
            let d = &mut canvas[dst_base + x * 4..dst_base + x * 4 + 4];
            let blended = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&blended);
        }
    }

    Ok(())
}

fn mul_div255(a: u16, b: u16) -> u8 {
    ((a * b + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/composite.rs"]
mod tests;
