use super::*;

struct NoCaptions;

#[async_trait::async_trait]
impl CaptionSource for NoCaptions {
    async fn select_template_and_captions(
        &self,
        _source_text: &str,
        _refinement: Option<&str>,
        _catalog: &TemplateCatalog,
    ) -> MemeResult<CaptionPlan> {
        Err(MemeError::caption_generation("unused"))
    }
}

#[test]
fn from_config_rejects_invalid_config_before_touching_fonts() {
    let cfg = StudioConfig {
        events_capacity: 0,
        ..Default::default()
    };
    let err = MemeStudio::from_config(&cfg, Arc::new(NoCaptions))
        .err()
        .unwrap();
    assert!(matches!(err, MemeError::Validation(_)));
}

#[test]
fn from_config_surfaces_catalog_errors() {
    let dir = std::env::temp_dir().join(format!("memepulse-studio-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("catalog.json");
    std::fs::write(&path, "[]").unwrap();

    let cfg = StudioConfig {
        catalog_path: Some(path),
        ..Default::default()
    };
    let err = MemeStudio::from_config(&cfg, Arc::new(NoCaptions))
        .err()
        .unwrap();
    assert!(matches!(err, MemeError::Validation(_)));
}

#[test]
fn events_without_subscribers_are_dropped_quietly() {
    let studio = MemeStudio::new(
        &StudioConfig::default(),
        TemplateCatalog::builtin(),
        Arc::new(NoCaptions),
        Arc::new(FsTemplateLoader::new(".")),
        CompositorPool::new(1, || {
            Ok(Compositor::new(
                crate::config::CaptionStyle::default(),
                Box::new(crate::render::BlockTypesetter),
            ))
        })
        .unwrap(),
    )
    .unwrap();
    studio.inner.publish(FeedEvent::Added(MemeId::new()));

    let mut rx = studio.subscribe();
    let id = MemeId::new();
    studio.inner.publish(FeedEvent::Updated(id));
    assert_eq!(rx.try_recv().unwrap(), FeedEvent::Updated(id));
}
