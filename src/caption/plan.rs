use crate::assets::{Template, TemplateCatalog};
use crate::foundation::error::{MemeError, MemeResult};

/// A template choice plus the two captions to draw on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionPlan {
    pub template: Template,
    pub top_text: String,
    pub bottom_text: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlan {
    template_id: Option<String>,
    top_text: Option<String>,
    bottom_text: Option<String>,
}

impl CaptionPlan {
    pub fn new(template: Template, top_text: impl Into<String>, bottom_text: impl Into<String>) -> Self {
        Self {
            template,
            top_text: top_text.into(),
            bottom_text: bottom_text.into(),
        }
    }

    /// Read a model's JSON answer.
    ///
    /// Both caption fields must be present, though either may be empty. An empty or missing
    /// `templateId` is an error; an unknown one falls back to the first catalog template and keeps
    /// the captions.
    pub fn from_model_response(response: &str, catalog: &TemplateCatalog) -> MemeResult<Self> {
        let body = strip_code_fence(response.trim());
        let raw: RawPlan = serde_json::from_str(body)
            .map_err(|e| MemeError::caption_generation(format!("model response is not a plan: {e}")))?;

        let (Some(top_text), Some(bottom_text)) = (raw.top_text, raw.bottom_text) else {
            return Err(MemeError::caption_generation(
                "model response is missing topText or bottomText",
            ));
        };
        let template_id = raw
            .template_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| MemeError::caption_generation("model response has no templateId"))?;

        let (template, fell_back) = catalog.resolve_or_fallback(template_id.trim());
        if fell_back {
            tracing::warn!(
                requested = %template_id,
                fallback = %template.id,
                "unknown template id from caption model, using fallback"
            );
        }
        Ok(Self::new(template.clone(), top_text, bottom_text))
    }
}

fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
#[path = "../../tests/unit/caption/plan.rs"]
mod tests;
