use super::*;

const FG: Rgb = Rgb {
    r: 10,
    g: 200,
    b: 30,
};

#[test]
fn layer_is_sized_to_eighty_percent_of_target() {
    let db = system_fontdb();
    let layer = render_label("400x300.png", FG, 400, 300, &db).unwrap();
    assert_eq!(layer.width, 320);
    assert_eq!(layer.height, 240);
    assert_eq!(layer.rgba8_premul.len(), 320 * 240 * 4);
}

#[test]
fn odd_targets_floor_the_layer_size() {
    let db = system_fontdb();
    let layer = render_label("99x51.gif", FG, 99, 51, &db).unwrap();
    assert_eq!(layer.width, 79); // floor(99 * 0.8)
    assert_eq!(layer.height, 40); // floor(51 * 0.8)
}

#[test]
fn target_too_small_for_one_pixel_layer_fails() {
    let db = system_fontdb();
    let err = render_label("1x600.png", FG, 1, 600, &db).unwrap_err();
    assert!(matches!(err, PlacegenError::Render(_)), "got: {err}");
}

#[test]
fn glyphs_are_foreground_colored_when_fonts_exist() {
    let db = system_fontdb();
    if db.faces().next().is_none() {
        // Fontless host: rendering still succeeds, but there is nothing to
        // assert about glyph pixels.
        return;
    }

    let layer = render_label("800x600.png", FG, 800, 600, &db).unwrap();
    assert!(
        layer.rgba8_premul.chunks_exact(4).any(|px| px[3] != 0),
        "expected some opaque glyph coverage"
    );

    // Fully opaque glyph interiors carry the premultiplied foreground.
    let solid = layer
        .rgba8_premul
        .chunks_exact(4)
        .find(|px| px[3] == 255);
    if let Some(px) = solid {
        assert_eq!(&px[..3], &[FG.r, FG.g, FG.b]);
    }
}

#[test]
fn blank_layer_when_text_resolves_to_no_glyphs() {
    // An empty fontdb cannot shape any glyphs; the layer must come back
    // transparent rather than failing the row.
    let db = std::sync::Arc::new(usvg::fontdb::Database::new());
    let layer = render_label("800x600.png", FG, 100, 100, &db).unwrap();
    assert_eq!(layer.width, 80);
    assert!(layer.rgba8_premul.iter().all(|&b| b == 0));
}

#[test]
fn label_svg_escapes_markup_and_carries_fill() {
    let svg = label_svg("10<20&.png", Rgb { r: 1, g: 2, b: 3 });
    assert!(svg.contains("10&lt;20&amp;.png"));
    assert!(svg.contains(r#"fill="rgb(1,2,3)""#));
    assert!(svg.contains(r#"font-size="72""#));
    assert!(svg.contains(r#"stroke="none""#));
}

#[test]
fn xml_escape_passes_plain_labels_through() {
    assert_eq!(xml_escape("800x600.png"), "800x600.png");
    assert_eq!(xml_escape("a&b<c>d"), "a&amp;b&lt;c&gt;d");
}
