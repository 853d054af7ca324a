use crate::foundation::core::MemeId;

/// Convenience result type used across memepulse.
pub type MemeResult<T> = Result<T, MemeError>;

/// Top-level error taxonomy used by the studio, compositor, and feed APIs.
///
/// Every variant is recoverable at the call boundary. A failed `generate` never inserts a meme
/// and a failed `refine` never mutates the target meme.
#[derive(thiserror::Error, Debug)]
pub enum MemeError {
    /// The caption source failed or returned a structurally invalid plan.
    #[error("caption generation error: {0}")]
    CaptionGeneration(String),

    /// Template artwork could not be fetched or decoded (including load timeouts).
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// No raster surface or caption font could be set up for a render.
    #[error("render surface unavailable: {0}")]
    RenderSurfaceUnavailable(String),

    /// An operation referenced a meme id the feed does not hold.
    #[error("meme not found: {0}")]
    NotFound(MemeId),

    /// A refine was requested while another refine of the same meme is in flight.
    #[error("refine already in progress for meme {0}")]
    RefineInProgress(MemeId),

    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MemeError {
    /// Build a [`MemeError::CaptionGeneration`] value.
    pub fn caption_generation(msg: impl Into<String>) -> Self {
        Self::CaptionGeneration(msg.into())
    }

    /// Build a [`MemeError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`MemeError::RenderSurfaceUnavailable`] value.
    pub fn surface_unavailable(msg: impl Into<String>) -> Self {
        Self::RenderSurfaceUnavailable(msg.into())
    }

    /// Build a [`MemeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True for failures the presentation layer should offer to retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::CaptionGeneration(_)
                | Self::AssetLoad(_)
                | Self::RefineInProgress(_)
                | Self::Other(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
