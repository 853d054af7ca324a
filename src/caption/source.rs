use async_trait::async_trait;

use crate::assets::TemplateCatalog;
use crate::caption::plan::CaptionPlan;
use crate::caption::prompt::build_prompt;
use crate::foundation::error::{MemeError, MemeResult};

/// Chooses a template and writes captions for a piece of source text.
///
/// Implementations must return [`MemeError::CaptionGeneration`] when the upstream call fails or
/// its answer is malformed, and must map unknown template ids onto a valid catalog entry.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    async fn select_template_and_captions(
        &self,
        source_text: &str,
        refinement: Option<&str>,
        catalog: &TemplateCatalog,
    ) -> MemeResult<CaptionPlan>;
}

/// A text-completion backend: prompt in, raw answer out.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Run one completion.
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

/// [`CaptionSource`] that prompts a [`CompletionModel`] and parses its JSON answer.
pub struct PromptedCaptionSource<M> {
    model: M,
}

impl<M: CompletionModel> PromptedCaptionSource<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

#[async_trait]
impl<M: CompletionModel> CaptionSource for PromptedCaptionSource<M> {
    #[tracing::instrument(skip_all, fields(model = %self.model.name(), refine = refinement.is_some()))]
    async fn select_template_and_captions(
        &self,
        source_text: &str,
        refinement: Option<&str>,
        catalog: &TemplateCatalog,
    ) -> MemeResult<CaptionPlan> {
        let prompt = build_prompt(source_text, refinement, catalog);
        let response = self.model.complete(&prompt).await.map_err(|e| {
            MemeError::caption_generation(format!("{} completion failed: {e:#}", self.model.name()))
        })?;
        CaptionPlan::from_model_response(&response, catalog).inspect_err(|e| {
            tracing::warn!(error = %e, response = %response, "could not read caption model answer");
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/source.rs"]
mod tests;
