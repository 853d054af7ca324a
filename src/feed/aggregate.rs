use std::collections::HashSet;

use crate::foundation::core::{MemeId, Reaction};
use crate::foundation::error::{MemeError, MemeResult};
use crate::meme::{Lifecycle, Meme, ModerationState, Refinement};

/// Ordered, in-memory collection of memes, newest first.
///
/// Every mutation looks its target up by id and fails with [`MemeError::NotFound`] when the id
/// is absent. Nothing here creates a meme implicitly.
#[derive(Debug, Default)]
pub struct MemeFeed {
    memes: Vec<Meme>,
    refining: HashSet<MemeId>,
}

/// Proof that a refine slot was claimed for one meme.
///
/// Hand it back through [`MemeFeed::finish_refine`] or [`MemeFeed::abandon_refine`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a claimed refine slot must be finished or abandoned"]
pub struct RefineTicket {
    id: MemeId,
}

impl RefineTicket {
    pub fn id(&self) -> MemeId {
        self.id
    }
}

impl MemeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.memes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memes.is_empty()
    }

    /// Prepend a freshly generated meme.
    pub fn add(&mut self, meme: Meme) -> MemeResult<&Meme> {
        if self.position(meme.id()).is_some() {
            return Err(MemeError::validation(format!(
                "meme {} is already in the feed",
                meme.id()
            )));
        }
        self.memes.insert(0, meme);
        Ok(&self.memes[0])
    }

    pub fn get(&self, id: MemeId) -> MemeResult<&Meme> {
        self.position(id)
            .map(|idx| &self.memes[idx])
            .ok_or(MemeError::NotFound(id))
    }

    /// Admin projection: every meme, newest first.
    pub fn all(&self) -> &[Meme] {
        &self.memes
    }

    /// User projection: approved memes only, same relative order as [`MemeFeed::all`].
    pub fn approved(&self) -> impl Iterator<Item = &Meme> + '_ {
        self.memes.iter().filter(|m| m.is_approved())
    }

    pub fn approve(&mut self, id: MemeId) -> MemeResult<&Meme> {
        let meme = self.get_mut(id)?;
        meme.approve();
        Ok(meme)
    }

    pub fn react(&mut self, id: MemeId, reaction: Reaction) -> MemeResult<&Meme> {
        let meme = self.get_mut(id)?;
        meme.react(reaction);
        Ok(meme)
    }

    pub fn add_comment(&mut self, id: MemeId, text: &str) -> MemeResult<&Meme> {
        let meme = self.get_mut(id)?;
        meme.add_comment(text)?;
        Ok(meme)
    }

    /// Claim the refine slot for `id`. At most one refine per meme may be outstanding.
    pub fn begin_refine(&mut self, id: MemeId) -> MemeResult<RefineTicket> {
        self.get(id)?;
        if !self.refining.insert(id) {
            return Err(MemeError::RefineInProgress(id));
        }
        Ok(RefineTicket { id })
    }

    /// Apply a successful refine and release the slot.
    pub fn finish_refine(
        &mut self,
        ticket: RefineTicket,
        refinement: Refinement,
    ) -> MemeResult<&Meme> {
        self.refining.remove(&ticket.id);
        let meme = self.get_mut(ticket.id)?;
        meme.apply_refinement(refinement);
        Ok(meme)
    }

    /// Release the slot without touching the meme.
    pub fn abandon_refine(&mut self, ticket: RefineTicket) {
        self.refining.remove(&ticket.id);
    }

    /// Release a slot whose ticket was lost, e.g. with a panicked refine task.
    pub(crate) fn release_refine(&mut self, id: MemeId) {
        self.refining.remove(&id);
    }

    pub fn is_refining(&self, id: MemeId) -> bool {
        self.refining.contains(&id)
    }

    pub fn lifecycle(&self, id: MemeId) -> MemeResult<Lifecycle> {
        let meme = self.get(id)?;
        Ok(if self.refining.contains(&id) {
            Lifecycle::Refining
        } else {
            match meme.state() {
                ModerationState::Pending => Lifecycle::Pending,
                ModerationState::Approved => Lifecycle::Approved,
            }
        })
    }

    fn position(&self, id: MemeId) -> Option<usize> {
        self.memes.iter().position(|m| m.id() == id)
    }

    fn get_mut(&mut self, id: MemeId) -> MemeResult<&mut Meme> {
        self.memes
            .iter_mut()
            .find(|m| m.id() == id)
            .ok_or(MemeError::NotFound(id))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/feed/aggregate.rs"]
mod tests;
