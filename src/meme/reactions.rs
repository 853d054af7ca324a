use std::collections::BTreeMap;

use crate::foundation::core::Reaction;

/// Per-meme reaction counts plus the viewer's single active reaction.
///
/// Invariant: if `user` is set, its count is at least 1. The toggle rules below preserve it, so
/// counts never underflow.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionTally {
    #[serde(rename = "reactions")]
    counts: BTreeMap<Reaction, u32>,
    #[serde(rename = "userReaction")]
    user: Option<Reaction>,
}

impl Default for ReactionTally {
    fn default() -> Self {
        Self {
            counts: Reaction::ALL.into_iter().map(|r| (r, 0)).collect(),
            user: None,
        }
    }
}

impl ReactionTally {
    /// Current count for `reaction`.
    pub fn count(&self, reaction: Reaction) -> u32 {
        self.counts.get(&reaction).copied().unwrap_or(0)
    }

    /// The viewer's active reaction, if any.
    pub fn user_reaction(&self) -> Option<Reaction> {
        self.user
    }

    /// Counts in palette order.
    pub fn iter(&self) -> impl Iterator<Item = (Reaction, u32)> + '_ {
        self.counts.iter().map(|(r, c)| (*r, *c))
    }

    /// Total reactions across the palette.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Apply the viewer's reaction click.
    ///
    /// - same as active: clears it;
    /// - different from active: moves the vote;
    /// - nothing active: casts it.
    pub(crate) fn toggle(&mut self, reaction: Reaction) {
        match self.user {
            Some(active) if active == reaction => {
                self.bump(active, false);
                self.user = None;
            }
            Some(active) => {
                self.bump(active, false);
                self.bump(reaction, true);
                self.user = Some(reaction);
            }
            None => {
                self.bump(reaction, true);
                self.user = Some(reaction);
            }
        }
    }

    fn bump(&mut self, reaction: Reaction, up: bool) {
        let count = self.counts.entry(reaction).or_insert(0);
        if up {
            *count += 1;
        } else {
            *count -= 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/meme/reactions.rs"]
mod tests;
