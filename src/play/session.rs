//! Play session state
//!
//! A session starts on the cover card, moves to `Ready` with each drawn
//! question and to `Exhausted` once nothing unseen is left in scope. The used
//! set spans the whole session, so changing scope never brings back a
//! question that was already shown.

use std::collections::HashSet;

use rand::Rng;

use super::draw::{self, Draw, Scope};
use crate::deck::{Category, CategoryId, Question, QuestionId};

/// What the player currently sees
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlayState {
    /// Nothing drawn yet
    #[default]
    Cover,
    /// A question is on the table
    Ready(Question),
    /// No unseen question remains in scope
    Exhausted,
}

/// One round of play over a set of categories
#[derive(Debug, Clone, Default)]
pub struct PlaySession {
    scope: Scope,
    used: HashSet<QuestionId>,
    state: PlayState,
}

impl PlaySession {
    /// Start a session drawing from every category
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session limited to the given categories (all if empty)
    pub fn with_scope(ids: impl IntoIterator<Item = CategoryId>) -> Self {
        Self { scope: Scope::only(ids), ..Self::default() }
    }

    /// Change which categories are drawn from. History is kept.
    pub fn select_scope(&mut self, ids: impl IntoIterator<Item = CategoryId>) {
        self.scope = Scope::only(ids);
        tracing::debug!("Scope changed, {} questions already used", self.used.len());
    }

    /// Draw from every category again. History is kept.
    pub fn select_all(&mut self) {
        self.scope = Scope::all();
    }

    /// Current scope
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Mutable scope, for toggling individual categories
    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }

    /// Current state
    pub fn state(&self) -> &PlayState {
        &self.state
    }

    /// Ids shown so far in this session
    pub fn used(&self) -> &HashSet<QuestionId> {
        &self.used
    }

    /// Unseen questions left in scope
    pub fn remaining(&self, categories: &[Category]) -> usize {
        draw::available(categories, &self.scope, &self.used).len()
    }

    /// Draw the next question and record it as used
    pub fn draw_next<R: Rng + ?Sized>(
        &mut self,
        categories: &[Category],
        rng: &mut R,
    ) -> &PlayState {
        self.state = match draw::draw(categories, &self.scope, &self.used, rng) {
            Draw::Question(question) => {
                self.used.insert(question.id);
                PlayState::Ready(question.clone())
            }
            Draw::Exhausted => PlayState::Exhausted,
        };
        &self.state
    }

    /// Forget history and go back to the cover card
    pub fn reset(&mut self) {
        self.used.clear();
        self.state = PlayState::Cover;
    }
}
