use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{MemeError, MemeResult};

/// Opaque, immutable meme identifier assigned at creation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct MemeId(pub uuid::Uuid);

impl MemeId {
    /// Allocate a fresh random id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for MemeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for MemeId {
    type Err = MemeError;

    fn from_str(s: &str) -> MemeResult<Self> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| MemeError::validation(format!("invalid meme id '{s}': {e}")))
    }
}

/// The fixed reaction palette offered on every meme.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Reaction {
    /// 👍
    #[serde(rename = "👍")]
    ThumbsUp,
    /// ❤️
    #[serde(rename = "❤️")]
    Heart,
    /// 😂
    #[serde(rename = "😂")]
    Laugh,
}

impl Reaction {
    /// Palette in display order.
    pub const ALL: [Reaction; 3] = [Reaction::ThumbsUp, Reaction::Heart, Reaction::Laugh];

    /// Emoji symbol shown for this reaction.
    pub fn symbol(self) -> &'static str {
        match self {
            Reaction::ThumbsUp => "👍",
            Reaction::Heart => "❤️",
            Reaction::Laugh => "😂",
        }
    }

    /// Parse a reaction from its emoji symbol.
    pub fn from_symbol(symbol: &str) -> MemeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.symbol() == symbol)
            .ok_or_else(|| MemeError::validation(format!("unknown reaction symbol '{symbol}'")))
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Provenance of the text a meme was generated from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceRef {
    /// Link to the article or document the caption was drawn from.
    Url(String),
    /// Free text typed by a user; there is nothing to link to.
    Custom,
}

impl SourceRef {
    /// Wire sentinel for [`SourceRef::Custom`].
    pub const CUSTOM_SENTINEL: &'static str = "Custom User Input";

    /// Whether the presentation layer has an external link to show.
    pub fn is_linkable(&self) -> bool {
        matches!(self, SourceRef::Url(_))
    }

    /// Stable string form (the URL, or the custom sentinel).
    pub fn as_str(&self) -> &str {
        match self {
            SourceRef::Url(u) => u,
            SourceRef::Custom => Self::CUSTOM_SENTINEL,
        }
    }
}

impl From<String> for SourceRef {
    fn from(s: String) -> Self {
        if s == Self::CUSTOM_SENTINEL {
            SourceRef::Custom
        } else {
            SourceRef::Url(s)
        }
    }
}

impl From<SourceRef> for String {
    fn from(s: SourceRef) -> Self {
        match s {
            SourceRef::Url(u) => u,
            SourceRef::Custom => SourceRef::CUSTOM_SENTINEL.to_string(),
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
