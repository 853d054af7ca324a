use super::*;

#[test]
fn empty_json_uses_defaults() {
    let cfg: StudioConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, StudioConfig::default());
    cfg.validate().unwrap();
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(serde_json::from_str::<StudioConfig>(r#"{"bogus": 1}"#).is_err());
}

#[test]
fn zero_timeout_is_invalid() {
    let cfg = StudioConfig {
        asset_timeout_ms: 0,
        ..StudioConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(MemeError::Validation(_))));
}

#[test]
fn style_rejects_out_of_range_ratios() {
    let style = CaptionStyle {
        bottom_ratio: 1.5,
        ..CaptionStyle::default()
    };
    assert!(style.validate().is_err());

    let style = CaptionStyle {
        font_divisor: 0.0,
        ..CaptionStyle::default()
    };
    assert!(style.validate().is_err());
}

#[test]
fn metrics_scale_with_surface() {
    let m = CaptionStyle::default().metrics_for(600, 400);
    assert_eq!(m.font_size, 40.0);
    assert!((m.stroke_width - 40.0 / 15.0).abs() < 1e-5);
    assert!((m.line_height - 44.0).abs() < 1e-4);
    assert!((m.max_width - 540.0).abs() < 1e-4);
    assert_eq!(m.center_x, 300.0);
    assert!((m.top.y() - 20.0).abs() < 1e-4);
    assert!((m.bottom.y() - 380.0).abs() < 1e-4);
    assert!(matches!(m.top, CaptionAnchor::Top { .. }));
    assert!(matches!(m.bottom, CaptionAnchor::Bottom { .. }));
}

#[test]
fn load_reads_json_file() {
    let dir = std::env::temp_dir().join(format!("memepulse-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("studio.json");
    std::fs::write(&path, r#"{"asset_timeout_ms": 250, "font_families": ["Impact"]}"#).unwrap();

    let cfg = StudioConfig::load(&path).unwrap();
    assert_eq!(cfg.asset_timeout_ms, 250);
    assert_eq!(cfg.font_families, vec!["Impact".to_string()]);
    assert_eq!(cfg.asset_timeout(), std::time::Duration::from_millis(250));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn load_missing_file_is_other_error() {
    let err = StudioConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, MemeError::Other(_)));
}
