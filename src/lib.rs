//! memepulse turns a piece of text into a captioned meme and keeps it in a moderated feed.
//!
//! - The caption source picks a template and writes top/bottom captions ([`CaptionSource`]).
//! - The [`Compositor`] draws the template at natural size and overlays outlined, word-wrapped
//!   captions, producing a lossless PNG.
//! - The [`MemeFeed`] holds memes newest first and enforces the moderation lifecycle and
//!   reaction rules.
//! - [`MemeStudio`] is the async composition root tying these together.
#![forbid(unsafe_code)]

mod assets;
mod foundation;

/// Caption-source seam and prompt handling.
pub mod caption;
/// Studio configuration and caption style.
pub mod config;
pub(crate) mod feed;
/// Caption layout: word wrap and anchored line placement.
pub mod layout;
pub(crate) mod meme;
/// Compositing and encoding.
pub mod render;
mod studio;

pub use crate::assets::{
    CaptionFont, FsTemplateLoader, PreparedImage, Template, TemplateCatalog, TemplateLoader,
    decode_image, fetch_with_timeout,
};
pub use crate::caption::{CaptionPlan, CaptionSource, CompletionModel, PromptedCaptionSource};
pub use crate::config::{CaptionMetrics, CaptionStyle, StudioConfig};
pub use crate::feed::{MemeFeed, RefineTicket};
pub use crate::foundation::core::{MemeId, Reaction, SourceRef};
pub use crate::foundation::error::{MemeError, MemeResult};
pub use crate::meme::{
    DOWNLOAD_FILE_NAME, Lifecycle, Meme, ModerationState, ReactionTally, Refinement,
};
pub use crate::render::{
    BlockTypesetter, Compositor, CompositorPool, ParleyTypesetter, RenderedImage,
};
pub use crate::studio::{FeedEvent, MemeStudio};
