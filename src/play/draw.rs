//! Random draws without replacement

use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::deck::{Category, CategoryId, Question, QuestionId};

/// Categories eligible for drawing. An empty selection means every category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    selected: HashSet<CategoryId>,
}

impl Scope {
    /// Scope covering all categories
    pub fn all() -> Self {
        Self::default()
    }

    /// Scope limited to the given categories
    pub fn only(ids: impl IntoIterator<Item = CategoryId>) -> Self {
        Self { selected: ids.into_iter().collect() }
    }

    /// Whether every category is in scope
    pub fn is_all(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether a category is in scope
    pub fn includes(&self, id: CategoryId) -> bool {
        self.selected.is_empty() || self.selected.contains(&id)
    }

    /// Add or remove a category from the selection
    pub fn toggle(&mut self, id: CategoryId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Categories of `categories` that are in scope, in order
    pub fn filter<'s, 'a>(
        &'s self,
        categories: &'a [Category],
    ) -> impl Iterator<Item = &'a Category> + use<'s, 'a> {
        categories.iter().filter(|c| self.includes(c.id))
    }
}

/// Outcome of a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw<'a> {
    /// An unseen question
    Question(&'a Question),
    /// Every question in scope has been used
    Exhausted,
}

/// Questions in scope that have not been used yet
pub fn available<'a>(
    categories: &'a [Category],
    scope: &Scope,
    used: &HashSet<QuestionId>,
) -> Vec<&'a Question> {
    scope
        .filter(categories)
        .flat_map(|c| c.questions.iter())
        .filter(|q| !used.contains(&q.id))
        .collect()
}

/// Pick one unused question uniformly over all available questions.
///
/// The caller records the returned id in `used` before drawing again.
pub fn draw<'a, R: Rng + ?Sized>(
    categories: &'a [Category],
    scope: &Scope,
    used: &HashSet<QuestionId>,
    rng: &mut R,
) -> Draw<'a> {
    match available(categories, scope, used).choose(rng).copied() {
        Some(question) => Draw::Question(question),
        None => Draw::Exhausted,
    }
}
