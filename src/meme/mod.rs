//! The meme entity and its moderation lifecycle.

pub(crate) mod entity;
pub(crate) mod reactions;

pub use entity::{DOWNLOAD_FILE_NAME, Lifecycle, Meme, ModerationState, Refinement};
pub use reactions::ReactionTally;
