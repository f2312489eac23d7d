//! Draft sessions for bulk add and bulk edit
//!
//! Bulk add only ever appends. Bulk edit replaces the whole snapshot, so the
//! editor tracks whether the draft differs from what it started with and can
//! report what a replacement would delete before it is applied.

use std::collections::HashMap;

use super::backend::SnapshotBackend;
use super::codec;
use super::model::Category;
use super::store::Store;

/// How a draft is applied to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Merge into existing categories by name
    Add,
    /// Replace the whole snapshot
    Replace,
}

/// Counts describing the effect of applying a draft
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditSummary {
    pub categories_before: usize,
    pub categories_after: usize,
    pub questions_before: usize,
    pub questions_after: usize,
    /// Questions present before and missing afterwards, matched by category name and text
    pub questions_removed: usize,
}

impl EditSummary {
    fn between(before: &[Category], after: &[Category]) -> Self {
        let mut remaining: HashMap<(&str, &str), usize> = HashMap::new();
        for category in after {
            for question in &category.questions {
                let key = (category.name.as_str(), question.text.as_str());
                *remaining.entry(key).or_default() += 1;
            }
        }

        let mut questions_removed = 0;
        for category in before {
            for question in &category.questions {
                match remaining.get_mut(&(category.name.as_str(), question.text.as_str())) {
                    Some(count) if *count > 0 => *count -= 1,
                    _ => questions_removed += 1,
                }
            }
        }

        Self {
            categories_before: before.len(),
            categories_after: after.len(),
            questions_before: count_questions(before),
            questions_after: count_questions(after),
            questions_removed,
        }
    }

    /// Whether applying would delete any category or question
    pub fn is_destructive(&self) -> bool {
        self.questions_removed > 0 || self.categories_after < self.categories_before
    }
}

fn count_questions(categories: &[Category]) -> usize {
    categories.iter().map(Category::len).sum()
}

/// Text draft for a bulk operation
#[derive(Debug, Clone)]
pub struct BulkEditor {
    mode: EditMode,
    original: String,
    draft: String,
}

impl BulkEditor {
    /// Start an empty bulk-add draft
    pub fn add() -> Self {
        Self { mode: EditMode::Add, original: String::new(), draft: String::new() }
    }

    /// Start an edit draft holding the current snapshot
    pub fn edit(categories: &[Category]) -> Self {
        let original = codec::encode(categories);
        Self { mode: EditMode::Replace, draft: original.clone(), original }
    }

    /// Apply mode of this draft
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Current draft text
    pub fn text(&self) -> &str {
        &self.draft
    }

    /// Replace the draft text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Whether the draft differs from its starting text
    pub fn has_changes(&self) -> bool {
        self.draft != self.original
    }

    /// Categories the store would hold after applying
    pub fn result(&self, existing: &[Category]) -> Vec<Category> {
        match self.mode {
            EditMode::Add => codec::merge_decode(existing, &self.draft),
            EditMode::Replace => codec::decode(&self.draft),
        }
    }

    /// Describe what applying would do without touching the store
    pub fn preview(&self, existing: &[Category]) -> EditSummary {
        EditSummary::between(existing, &self.result(existing))
    }

    /// Apply the draft to the store and persist
    pub fn apply<B: SnapshotBackend>(self, store: &mut Store<B>) -> EditSummary {
        let result = self.result(store.categories());
        let summary = EditSummary::between(store.categories(), &result);
        tracing::info!(
            "Applying {:?} draft: {} -> {} questions",
            self.mode,
            summary.questions_before,
            summary.questions_after
        );
        store.replace_all(result);
        summary
    }
}
