use super::*;

#[test]
fn builtin_catalog_has_the_classics_in_order() {
    let catalog = TemplateCatalog::builtin();
    assert_eq!(catalog.len(), 7);
    let first = catalog.iter().next().unwrap();
    assert_eq!(first.id, "distracted-boyfriend");
    assert_eq!(catalog.get("success-kid").unwrap().name, "Success Kid");
}

#[test]
fn resolve_unknown_id_falls_back_to_first_entry() {
    let catalog = TemplateCatalog::builtin();
    let (t, fallback) = catalog.resolve_or_fallback("this-is-fine");
    assert_eq!(t.id, "this-is-fine");
    assert!(!fallback);

    let (t, fallback) = catalog.resolve_or_fallback("no-such-template");
    assert_eq!(t.id, "distracted-boyfriend");
    assert!(fallback);
}

#[test]
fn from_json_validates_entries() {
    let ok = TemplateCatalog::from_json(r#"[{"id":"t1","name":"One","url":"u1"}]"#).unwrap();
    assert_eq!(ok.get("t1").unwrap().url, "u1");

    assert!(TemplateCatalog::from_json("[]").is_err());
    assert!(TemplateCatalog::from_json(r#"[{"id":" ","name":"x","url":"u"}]"#).is_err());
    assert!(
        TemplateCatalog::from_json(
            r#"[{"id":"a","name":"x","url":"u"},{"id":"a","name":"y","url":"v"}]"#
        )
        .is_err()
    );
    assert!(TemplateCatalog::from_json("{").is_err());
}

#[test]
fn catalog_serializes_as_plain_array() {
    let catalog = TemplateCatalog::new(vec![Template::new("t1", "One", "u1")]).unwrap();
    let json = serde_json::to_string(&catalog).unwrap();
    assert_eq!(json, r#"[{"id":"t1","name":"One","url":"u1"}]"#);
}
