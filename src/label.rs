use std::sync::Arc;

use anyhow::Context as _;

use crate::color::Rgb;
use crate::foundation::error::{PlacegenError, PlacegenResult};

/// Fraction of each canvas axis reserved for the label bounding box. The
/// remaining margin stays blank around the label.
const LABEL_FRACTION: f64 = 0.8;

/// Nominal font size of the label glyph outlines, in SVG user units.
const FONT_SIZE: f32 = 72.0;

/// Rendered label text as a premultiplied RGBA8 pixel layer.
///
/// The layer is sized to `floor(0.8 * w) x floor(0.8 * h)` of the target
/// canvas, with the glyphs scaled (aspect-preserving) and centered inside it.
/// Owned by a single row's pipeline and discarded after compositing.
#[derive(Clone, Debug)]
pub struct LabelLayer {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Vec<u8>,
}

/// Build a fontdb holding the system fonts, shared across row tasks.
///
/// Done once per batch so individual rows don't re-scan font directories.
pub fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
}

/// Rasterize `text` into a foreground-colored layer fitting within
/// `0.8 * target_w` by `0.8 * target_h`.
///
/// The text is laid out as vector glyph outlines at a fixed nominal size and
/// then scaled uniformly into the layer, centered on both axes; an
/// aspect-preserving fit may under-fill one axis. A target too small to hold
/// even a one-pixel layer is a rasterization failure. Text that resolves to no
/// glyphs at all (no usable fonts) yields a blank transparent layer instead of
/// an error.
pub fn render_label(
    text: &str,
    foreground: Rgb,
    target_w: u32,
    target_h: u32,
    fontdb: &Arc<usvg::fontdb::Database>,
) -> PlacegenResult<LabelLayer> {
    let layer_w = (f64::from(target_w) * LABEL_FRACTION).floor() as u32;
    let layer_h = (f64::from(target_h) * LABEL_FRACTION).floor() as u32;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(layer_w, layer_h).ok_or_else(|| {
        PlacegenError::render(format!(
            "label layer {layer_w}x{layer_h} for target {target_w}x{target_h} is empty"
        ))
    })?;

    let svg = label_svg(text, foreground);
    let opts = usvg::Options {
        fontdb: Arc::clone(fontdb),
        font_resolver: any_face_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse label svg")?;

    let bbox = tree.root().abs_bounding_box();
    if bbox.width() > 0.0 && bbox.height() > 0.0 {
        let scale = (layer_w as f32 / bbox.width()).min(layer_h as f32 / bbox.height());
        let tx = (layer_w as f32 - bbox.width() * scale) / 2.0 - bbox.x() * scale;
        let ty = (layer_h as f32 - bbox.height() * scale) / 2.0 - bbox.y() * scale;
        let transform =
            resvg::tiny_skia::Transform::from_scale(scale, scale).post_translate(tx, ty);
        resvg::render(&tree, transform, &mut pixmap.as_mut());
    }

    Ok(LabelLayer {
        width: layer_w,
        height: layer_h,
        rgba8_premul: pixmap.data().to_vec(),
    })
}

/// Single `<text>` document at the fixed nominal font size, foreground fill,
/// no stroke. The document canvas is generous; the glyph bounding box is
/// measured after parsing and the raster transform does the actual fitting.
fn label_svg(text: &str, fill: Rgb) -> String {
    let doc_w = (text.chars().count().max(1) as f32) * FONT_SIZE;
    let doc_h = FONT_SIZE * 2.0;
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"#,
            r#"<text x="0" y="{base}" font-family="sans-serif" font-size="{size}" "#,
            r#"fill="rgb({r},{g},{b})" stroke="none">{text}</text></svg>"#
        ),
        w = doc_w,
        h = doc_h,
        base = FONT_SIZE,
        size = FONT_SIZE,
        r = fill.r,
        g = fill.g,
        b = fill.b,
        text = xml_escape(text),
    )
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Font resolver that falls back to any available face when the requested
/// family query fails. Generic-family lookups can come up empty on hosts whose
/// fontdb lacks the default family names, and a placeholder label rendered in
/// the wrong face beats no label at all.
fn any_face_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../tests/unit/label.rs"]
mod tests;
