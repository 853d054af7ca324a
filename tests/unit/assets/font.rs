use super::*;

#[test]
fn from_bytes_rejects_non_font_data() {
    let err = CaptionFont::from_bytes(b"not a font".to_vec()).unwrap_err();
    assert!(matches!(err, MemeError::RenderSurfaceUnavailable(_)));
}

#[test]
fn from_file_missing_path_errors() {
    assert!(CaptionFont::from_file("/no/such/font.ttf").is_err());
}

#[test]
fn discover_returns_face_bytes_when_fonts_exist() {
    // Machines without any fonts legitimately report an unavailable surface.
    match CaptionFont::discover(&["Anton".to_string()], &[]) {
        Ok(font) => {
            assert!(!font.bytes.is_empty());
            let again = CaptionFont::from_bytes(font.bytes.as_ref().clone()).unwrap();
            assert!(!again.bytes.is_empty());
        }
        Err(err) => assert!(matches!(err, MemeError::RenderSurfaceUnavailable(_))),
    }
}

#[test]
fn fallback_prefers_bold_upright_sans() {
    // (family, weight, upright, monospaced)
    let faces = [
        ("DejaVu Math TeX Gyre", 400, true, false),
        ("DejaVu Sans", 400, true, false),
        ("DejaVu Sans", 700, false, false),
        ("DejaVu Sans Mono", 700, true, true),
        ("DejaVu Serif", 700, true, false),
        ("DejaVu Sans", 700, true, false),
        ("Noto Color Emoji", 700, true, false),
    ];
    let best = faces
        .iter()
        .min_by_key(|(family, weight, upright, mono)| {
            fallback_rank(family, *weight, *upright, *mono)
        })
        .unwrap();
    assert_eq!(*best, ("DejaVu Sans", 700, true, false));
}

#[test]
fn fallback_takes_nearest_weight_when_no_bold_exists() {
    let regular = fallback_rank("Liberation Sans", 400, true, false);
    let black = fallback_rank("Liberation Sans", 900, true, false);
    let light = fallback_rank("Liberation Sans", 300, true, false);
    assert!(black < regular);
    assert!(regular < light);
}

#[test]
fn discover_picks_a_bold_face_when_one_is_installed() {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let has_bold = db
        .faces()
        .any(|f| f.weight.0 >= 700 && f.style == usvg::fontdb::Style::Normal && !f.monospaced);
    if !has_bold {
        return;
    }
    let font = CaptionFont::discover(&["No Such Caption Family".to_string()], &[]).unwrap();
    assert!(font.weight >= 600, "{} weight {}", font.family, font.weight);
}
