//! Composition root: wires the caption source, template loader, compositor and feed together.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, broadcast};

use crate::assets::{CaptionFont, FsTemplateLoader, TemplateCatalog, TemplateLoader, fetch_with_timeout};
use crate::caption::{CaptionPlan, CaptionSource};
use crate::config::StudioConfig;
use crate::feed::MemeFeed;
use crate::foundation::core::{MemeId, Reaction, SourceRef};
use crate::foundation::error::{MemeError, MemeResult};
use crate::meme::{Lifecycle, Meme, Refinement};
use crate::render::{Compositor, CompositorPool, ParleyTypesetter, RenderedImage};

/// Change notification published after every successful feed mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedEvent {
    /// A generated meme was prepended to the feed.
    Added(MemeId),
    /// A meme was approved, reacted to, commented on, or refined.
    Updated(MemeId),
    /// A refine claimed the meme's refine slot.
    RefineStarted(MemeId),
    /// A refine failed; the meme is unchanged.
    RefineFailed {
        /// Target meme.
        id: MemeId,
        /// Rendered error message.
        error: String,
    },
}

/// Async front door for generating, moderating and interacting with memes.
///
/// Cheap to clone; clones share one feed. The feed lock is only held for the synchronous feed
/// operations, so reactions and comments stay responsive while a render is in flight.
#[derive(Clone)]
pub struct MemeStudio {
    inner: Arc<Inner>,
}

struct Inner {
    feed: Mutex<MemeFeed>,
    catalog: TemplateCatalog,
    captions: Arc<dyn CaptionSource>,
    loader: Arc<dyn TemplateLoader>,
    compositors: Arc<CompositorPool>,
    asset_timeout: Duration,
    events: broadcast::Sender<FeedEvent>,
}

impl MemeStudio {
    /// Assemble a studio from explicit collaborators. Only `asset_timeout_ms` and
    /// `events_capacity` are read from `config`.
    pub fn new(
        config: &StudioConfig,
        catalog: TemplateCatalog,
        captions: Arc<dyn CaptionSource>,
        loader: Arc<dyn TemplateLoader>,
        compositors: CompositorPool,
    ) -> MemeResult<Self> {
        config.validate()?;
        let (events, _) = broadcast::channel(config.events_capacity);
        Ok(Self {
            inner: Arc::new(Inner {
                feed: Mutex::new(MemeFeed::new()),
                catalog,
                captions,
                loader,
                compositors: Arc::new(compositors),
                asset_timeout: config.asset_timeout(),
                events,
            }),
        })
    }

    /// Build the standard studio: catalog from config (or built-in), filesystem template loader,
    /// and a pool of font-backed compositors sized to the machine's parallelism.
    pub fn from_config(config: &StudioConfig, captions: Arc<dyn CaptionSource>) -> MemeResult<Self> {
        config.validate()?;
        let catalog = match &config.catalog_path {
            Some(path) => TemplateCatalog::load(path)?,
            None => TemplateCatalog::builtin(),
        };
        let font = match &config.font_path {
            Some(path) => CaptionFont::from_file(path)?,
            None => CaptionFont::discover(&config.font_families, &config.font_dirs)?,
        };
        tracing::info!(family = %font.family, templates = catalog.len(), "studio ready");
        let style = config.style.clone();
        let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
        let compositors = CompositorPool::new(workers, move || {
            let typesetter = ParleyTypesetter::new(&font)?;
            Ok(Compositor::new(style.clone(), Box::new(typesetter)))
        })?;
        let loader = Arc::new(FsTemplateLoader::new(config.asset_root.clone()));
        Self::new(config, catalog, captions, loader, compositors)
    }

    /// Template catalog the caption source chooses from.
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.inner.catalog
    }

    /// Subscribe to feed change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.inner.events.subscribe()
    }

    /// Generate a meme from free user text.
    pub async fn generate(&self, source_text: &str) -> MemeResult<Meme> {
        self.generate_from(source_text, SourceRef::Custom).await
    }

    /// Generate a meme from `source_text`, recording `source` as its provenance.
    ///
    /// On any failure nothing is added to the feed.
    #[tracing::instrument(skip_all, fields(source = %source))]
    pub async fn generate_from(&self, source_text: &str, source: SourceRef) -> MemeResult<Meme> {
        if source_text.trim().is_empty() {
            return Err(MemeError::validation("source text must not be blank"));
        }
        let inner = &self.inner;
        let plan = inner
            .captions
            .select_template_and_captions(source_text, None, &inner.catalog)
            .await?;
        let image = inner.render(&plan).await?;
        let meme = Meme::new(
            &plan.template,
            plan.top_text,
            plan.bottom_text,
            image,
            source,
            source_text,
        );

        let meme = inner.feed.lock().await.add(meme)?.clone();
        tracing::info!(meme_id = %meme.id(), template = %meme.template_id(), "meme generated");
        inner.publish(FeedEvent::Added(meme.id()));
        Ok(meme)
    }

    /// Regenerate captions (and possibly the template) for an existing meme.
    ///
    /// The meme always comes back pending. At most one refine per meme runs at a time; a second
    /// one fails with [`MemeError::RefineInProgress`]. On failure the meme is left untouched.
    /// The work runs on its own task, so dropping the returned future does not strand the
    /// refine slot.
    pub async fn refine(&self, id: MemeId, instruction: &str) -> MemeResult<Meme> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(MemeError::validation("refine instruction must not be blank"));
        }

        let (ticket, source_text) = {
            let mut feed = self.inner.feed.lock().await;
            let source_text = feed.get(id)?.source_text().to_string();
            let ticket = feed.begin_refine(id).inspect_err(|e| {
                tracing::info!(meme_id = %id, error = %e, "refine rejected");
            })?;
            (ticket, source_text)
        };
        tracing::info!(meme_id = %id, "refine started");
        self.inner.publish(FeedEvent::RefineStarted(id));

        let inner = Arc::clone(&self.inner);
        let instruction = instruction.to_string();
        let task = tokio::spawn(async move {
            let outcome = inner.produce_refinement(&source_text, &instruction).await;
            let mut feed = inner.feed.lock().await;
            match outcome {
                Ok(refinement) => {
                    let meme = feed.finish_refine(ticket, refinement)?.clone();
                    drop(feed);
                    tracing::info!(meme_id = %id, template = %meme.template_id(), "refine finished");
                    inner.publish(FeedEvent::Updated(id));
                    Ok(meme)
                }
                Err(e) => {
                    feed.abandon_refine(ticket);
                    drop(feed);
                    tracing::warn!(meme_id = %id, error = %e, "refine failed");
                    inner.publish(FeedEvent::RefineFailed {
                        id,
                        error: e.to_string(),
                    });
                    Err(e)
                }
            }
        });

        match task.await {
            Ok(result) => result,
            Err(join) => {
                self.inner.feed.lock().await.release_refine(id);
                Err(MemeError::Other(anyhow::anyhow!("refine task failed: {join}")))
            }
        }
    }

    /// Approve a meme, making it visible in the user projection.
    pub async fn approve(&self, id: MemeId) -> MemeResult<Meme> {
        let meme = self.inner.feed.lock().await.approve(id)?.clone();
        tracing::info!(meme_id = %id, "meme approved");
        self.inner.publish(FeedEvent::Updated(id));
        Ok(meme)
    }

    /// Toggle the viewer's reaction.
    pub async fn react(&self, id: MemeId, reaction: Reaction) -> MemeResult<Meme> {
        let meme = self.inner.feed.lock().await.react(id, reaction)?.clone();
        tracing::debug!(meme_id = %id, %reaction, "reaction toggled");
        self.inner.publish(FeedEvent::Updated(id));
        Ok(meme)
    }

    /// Append a comment. Surrounding whitespace is trimmed; blank comments are rejected.
    pub async fn comment(&self, id: MemeId, text: &str) -> MemeResult<Meme> {
        let meme = self.inner.feed.lock().await.add_comment(id, text)?.clone();
        tracing::debug!(meme_id = %id, "comment added");
        self.inner.publish(FeedEvent::Updated(id));
        Ok(meme)
    }

    /// Admin projection, newest first.
    pub async fn list_all(&self) -> Vec<Meme> {
        self.inner.feed.lock().await.all().to_vec()
    }

    /// User projection: approved memes only, newest first.
    pub async fn list_approved(&self) -> Vec<Meme> {
        self.inner.feed.lock().await.approved().cloned().collect()
    }

    pub async fn get(&self, id: MemeId) -> MemeResult<Meme> {
        self.inner.feed.lock().await.get(id).cloned()
    }

    /// Current lifecycle phase, including `Refining` while a refine is in flight.
    pub async fn lifecycle(&self, id: MemeId) -> MemeResult<Lifecycle> {
        self.inner.feed.lock().await.lifecycle(id)
    }

    /// Encoded PNG bytes of a meme's current image, for download or sharing.
    pub async fn export_image(&self, id: MemeId) -> MemeResult<Vec<u8>> {
        let feed = self.inner.feed.lock().await;
        Ok(feed.get(id)?.image().png_bytes().to_vec())
    }
}

impl Inner {
    fn publish(&self, event: FeedEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    async fn produce_refinement(&self, source_text: &str, instruction: &str) -> MemeResult<Refinement> {
        let plan = self
            .captions
            .select_template_and_captions(source_text, Some(instruction), &self.catalog)
            .await?;
        let image = self.render(&plan).await?;
        Ok(Refinement {
            template: plan.template,
            top_text: plan.top_text,
            bottom_text: plan.bottom_text,
            image,
        })
    }

    async fn render(&self, plan: &CaptionPlan) -> MemeResult<RenderedImage> {
        let bytes = fetch_with_timeout(self.loader.as_ref(), &plan.template, self.asset_timeout)
            .await
            .inspect_err(|e| {
                tracing::warn!(template = %plan.template.id, error = %e, "template load failed");
            })?;

        let compositors = Arc::clone(&self.compositors);
        let top = plan.top_text.clone();
        let bottom = plan.bottom_text.clone();
        tokio::task::spawn_blocking(move || compositors.render_png(&bytes, &top, &bottom))
            .await
            .map_err(|e| MemeError::Other(anyhow::anyhow!("render task failed: {e}")))?
    }
}

#[cfg(test)]
#[path = "../tests/unit/studio.rs"]
mod tests;
