//! Caption-source seam: picks a template and writes the two captions for a piece of text.

pub(crate) mod plan;
pub(crate) mod prompt;
pub(crate) mod source;

pub use plan::CaptionPlan;
pub use prompt::build_prompt;
pub use source::{CaptionSource, CompletionModel, PromptedCaptionSource};
