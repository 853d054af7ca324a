use crate::assets::Template;
use crate::foundation::core::{MemeId, Reaction, SourceRef};
use crate::foundation::error::{MemeError, MemeResult};
use crate::meme::reactions::ReactionTally;
use crate::render::RenderedImage;

/// Suggested file name when a meme is downloaded or shared.
pub const DOWNLOAD_FILE_NAME: &str = "memepulse-meme.png";

/// Persistent moderation flag of a meme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationState {
    /// Visible only to admins; may be approved or refined.
    Pending,
    /// Visible to everyone. No un-approve exists.
    Approved,
}

/// Observable lifecycle phase of a meme held by the feed.
///
/// `Refining` is transient and tracked by the feed while a refine is in flight; it is never
/// stored on the meme itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Awaiting moderation.
    Pending,
    /// A refine is in flight; the previous image and captions are still current.
    Refining,
    /// Approved and publicly visible.
    Approved,
}

/// Replacement content produced by a successful refine.
#[derive(Clone, Debug)]
pub struct Refinement {
    /// Template the new image was drawn on.
    pub template: Template,
    /// New top caption.
    pub top_text: String,
    /// New bottom caption.
    pub bottom_text: String,
    /// New rendered image.
    pub image: RenderedImage,
}

/// A generated meme.
///
/// Fields are read-only outside the crate; every mutation goes through the feed so the reaction
/// and moderation invariants hold after each operation.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meme {
    id: MemeId,
    #[serde(rename = "imageUrl", serialize_with = "serialize_data_url")]
    image: RenderedImage,
    template_id: String,
    top_text: String,
    bottom_text: String,
    #[serde(rename = "sourceUrl")]
    source: SourceRef,
    #[serde(skip)]
    source_text: String,
    #[serde(flatten)]
    reactions: ReactionTally,
    comments: Vec<String>,
    #[serde(rename = "isApproved", serialize_with = "serialize_approved")]
    state: ModerationState,
}

impl Meme {
    /// A freshly generated meme: pending, no reactions, no comments.
    pub(crate) fn new(
        template: &Template,
        top_text: impl Into<String>,
        bottom_text: impl Into<String>,
        image: RenderedImage,
        source: SourceRef,
        source_text: impl Into<String>,
    ) -> Self {
        Self {
            id: MemeId::new(),
            image,
            template_id: template.id.clone(),
            top_text: top_text.into(),
            bottom_text: bottom_text.into(),
            source,
            source_text: source_text.into(),
            reactions: ReactionTally::default(),
            comments: Vec::new(),
            state: ModerationState::Pending,
        }
    }

    pub fn id(&self) -> MemeId {
        self.id
    }

    /// Rendered image.
    pub fn image(&self) -> &RenderedImage {
        &self.image
    }

    /// Self-contained `data:` URL of the rendered image.
    pub fn image_url(&self) -> String {
        self.image.data_url()
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn top_text(&self) -> &str {
        &self.top_text
    }

    pub fn bottom_text(&self) -> &str {
        &self.bottom_text
    }

    /// Provenance of the generating text.
    pub fn source(&self) -> &SourceRef {
        &self.source
    }

    /// The text the captions were generated from; reused by refine.
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn reactions(&self) -> &ReactionTally {
        &self.reactions
    }

    /// Comments in posting order.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn state(&self) -> ModerationState {
        self.state
    }

    pub fn is_approved(&self) -> bool {
        self.state == ModerationState::Approved
    }

    pub(crate) fn approve(&mut self) {
        self.state = ModerationState::Approved;
    }

    /// Swap in refined content. Approval is always dropped.
    pub(crate) fn apply_refinement(&mut self, refinement: Refinement) {
        self.template_id = refinement.template.id;
        self.top_text = refinement.top_text;
        self.bottom_text = refinement.bottom_text;
        self.image = refinement.image;
        self.state = ModerationState::Pending;
    }

    pub(crate) fn react(&mut self, reaction: Reaction) {
        self.reactions.toggle(reaction);
    }

    pub(crate) fn add_comment(&mut self, text: &str) -> MemeResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MemeError::validation("comment must not be blank"));
        }
        self.comments.push(text.to_string());
        Ok(())
    }
}

fn serialize_data_url<S: serde::Serializer>(
    image: &RenderedImage,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_str(&image.data_url())
}

fn serialize_approved<S: serde::Serializer>(
    state: &ModerationState,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_bool(*state == ModerationState::Approved)
}

#[cfg(test)]
#[path = "../../tests/unit/meme/entity.rs"]
mod tests;
