//! Category persistence and CRUD
//!
//! The store keeps the whole snapshot in memory and writes it back through a
//! [`SnapshotBackend`] after every change. Persistence problems never reach
//! the caller: a missing or corrupt blob loads as an empty list and a failed
//! write leaves the in-memory state as the only copy.

use super::backend::{FileBackend, SnapshotBackend};
use super::codec;
use super::error::StoreError;
use super::model::{Category, CategoryId, QuestionId};

/// Ordered categories backed by a persisted snapshot
#[derive(Debug)]
pub struct Store<B: SnapshotBackend = FileBackend> {
    backend: B,
    categories: Vec<Category>,
}

impl<B: SnapshotBackend> Store<B> {
    /// Open a store and load whatever the backend holds
    pub fn open(backend: B) -> Self {
        let mut store = Self { backend, categories: Vec::new() };
        store.load();
        store
    }

    /// Reload the snapshot from the backend, replacing in-memory state.
    ///
    /// Missing or unreadable data yields an empty list.
    pub fn load(&mut self) -> &[Category] {
        self.categories = match self.try_load() {
            Ok(categories) => categories,
            Err(e) if e.is_corrupt_data() => {
                tracing::warn!("Stored categories are corrupt, starting empty: {}", e);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Failed to load categories, starting empty: {}", e);
                Vec::new()
            }
        };
        &self.categories
    }

    fn try_load(&self) -> Result<Vec<Category>, StoreError> {
        match self.backend.read()? {
            Some(blob) => {
                let categories: Vec<Category> = serde_json::from_str(&blob)?;
                tracing::debug!("Loaded {} categories", categories.len());
                Ok(categories)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Persist the current snapshot, returns whether the write succeeded
    pub fn save(&mut self) -> bool {
        match self.try_save() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save categories: {}", e);
                false
            }
        }
    }

    fn try_save(&mut self) -> Result<(), StoreError> {
        let blob = serde_json::to_string_pretty(&self.categories)?;
        self.backend.write(&blob)?;
        tracing::debug!("Saved {} categories", self.categories.len());
        Ok(())
    }

    /// All categories in order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The backend the snapshot is written to
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Find a category by id
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Find the first category with exactly this name
    pub fn find_category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Total questions across all categories
    pub fn question_count(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }

    /// Whether there are no categories
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    /// Append a new empty category, `None` if the name cannot be a header
    pub fn add_category(&mut self, name: impl Into<String>) -> Option<&Category> {
        let name = name.into();
        if !codec::is_valid_name(&name) {
            tracing::debug!("Rejecting category name {:?}", name);
            return None;
        }
        let index = self.categories.len();
        self.categories.push(Category::new(name));
        self.save();
        self.categories.get(index)
    }

    /// Remove a category and all its questions
    pub fn delete_category(&mut self, id: CategoryId) -> bool {
        let removed = remove_where(&mut self.categories, |c| c.id == id) > 0;
        if removed {
            self.save();
        }
        removed
    }

    /// Remove categories by position, returns how many were removed
    pub fn delete_categories_at(&mut self, positions: &[usize]) -> usize {
        let removed = remove_positions(&mut self.categories, positions);
        if removed > 0 {
            self.save();
        }
        removed
    }

    /// Change a category's name, `false` if unknown or the name is invalid
    pub fn rename_category(&mut self, id: CategoryId, name: impl Into<String>) -> bool {
        let name = name.into();
        if !codec::is_valid_name(&name) {
            tracing::debug!("Rejecting category name {:?}", name);
            return false;
        }
        let Some(category) = self.category_mut(id) else {
            return false;
        };
        category.rename(name);
        self.save();
        true
    }

    /// Append a question to a category.
    ///
    /// The text is trimmed. Returns `None` if the category is unknown or the
    /// text is blank, multi-line or shaped like a `[header]`.
    pub fn add_question(&mut self, text: &str, category_id: CategoryId) -> Option<QuestionId> {
        let Some(text) = codec::question_text(text) else {
            tracing::debug!("Rejecting question text {:?}", text);
            return None;
        };
        let id = self.category_mut(category_id)?.push_question(text);
        self.save();
        Some(id)
    }

    /// Remove a question from a category
    pub fn delete_question(&mut self, id: QuestionId, category_id: CategoryId) -> bool {
        let Some(category) = self.category_mut(category_id) else {
            return false;
        };
        let removed = remove_where(&mut category.questions, |q| q.id == id) > 0;
        if removed {
            self.save();
        }
        removed
    }

    /// Remove questions of a category by position, returns how many were removed
    pub fn delete_questions_at(&mut self, positions: &[usize], category_id: CategoryId) -> usize {
        let Some(category) = self.category_mut(category_id) else {
            return 0;
        };
        let removed = remove_positions(&mut category.questions, positions);
        if removed > 0 {
            self.save();
        }
        removed
    }

    /// Overwrite the whole snapshot
    pub fn replace_all(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.save();
    }

    /// Merge bulk text into the snapshot without removing anything
    pub fn bulk_add(&mut self, text: &str) {
        let merged = codec::merge_decode(&self.categories, text);
        self.replace_all(merged);
    }

    /// Replace the snapshot with the categories in bulk text
    pub fn bulk_edit(&mut self, text: &str) {
        self.replace_all(codec::decode(text));
    }

    /// Current snapshot in the bulk text format
    pub fn export_text(&self) -> String {
        codec::encode(&self.categories)
    }
}

fn remove_where<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> usize {
    let before = items.len();
    items.retain(|item| !pred(item));
    before - items.len()
}

fn remove_positions<T>(items: &mut Vec<T>, positions: &[usize]) -> usize {
    let before = items.len();
    let mut index = 0;
    items.retain(|_| {
        let keep = !positions.contains(&index);
        index += 1;
        keep
    });
    before - items.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::backend::MemoryBackend;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn memory_store() -> Store<MemoryBackend> {
        Store::open(MemoryBackend::default())
    }

    fn names<B: SnapshotBackend>(store: &Store<B>) -> Vec<&str> {
        store.categories().iter().map(|c| c.name.as_str()).collect()
    }

    fn shape<B: SnapshotBackend>(store: &Store<B>) -> Vec<(String, Vec<String>)> {
        store
            .categories()
            .iter()
            .map(|c| (c.name.clone(), c.questions.iter().map(|q| q.text.clone()).collect()))
            .collect()
    }

    /// Backend whose writes always fail
    struct BrokenBackend;

    impl SnapshotBackend for BrokenBackend {
        fn read(&self) -> Result<Option<String>, StoreError> {
            Err(StoreError::NoDataDir)
        }

        fn write(&mut self, _blob: &str) -> Result<(), StoreError> {
            Err(StoreError::NoDataDir)
        }
    }

    #[test]
    fn add_category_to_empty_store() {
        let mut store = memory_store();
        let category = store.add_category("Icebreakers").unwrap();

        assert_eq!(category.name, "Icebreakers");
        assert!(category.is_empty());
        assert_eq!(store.categories().len(), 1);
    }

    #[test]
    fn save_then_load_returns_same_snapshot() {
        let mut store = memory_store();
        let id = store.add_category("Icebreakers").unwrap().id;
        store.add_question("Coffee or tea?", id);
        let before = store.categories().to_vec();

        let reopened = Store::open(store.backend().clone());
        assert_eq!(reopened.categories(), &before[..]);
    }

    #[test]
    fn file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");

        let mut store = Store::open(FileBackend::new(&path));
        let id = store.add_category("Fun").unwrap().id;
        store.add_question("Best pizza topping?", id);
        let before = store.categories().to_vec();

        let reopened = Store::open(FileBackend::new(&path));
        assert_eq!(reopened.categories(), &before[..]);
    }

    #[test]
    fn missing_blob_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(FileBackend::new(temp_dir.path().join("none.json")));
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_blob_loads_empty() {
        let store = Store::open(MemoryBackend::with_blob("{not json"));
        assert!(store.is_empty());

        let store = Store::open(MemoryBackend::with_blob(r#"{"name":"wrong shape"}"#));
        assert!(store.is_empty());
    }

    #[test]
    fn legacy_blob_loads() {
        let blob = r#"[{"id":"0b8f6c2e-1d0a-4f5e-9c61-3b7a1e2d4c5f","name":"Fun",
            "questions":[{"id":"9a7e5c3b-1f2d-4e6a-8b0c-d2e4f6a8b0c1","question":"Why?"}]}]"#;
        let store = Store::open(MemoryBackend::with_blob(blob));
        assert_eq!(store.categories()[0].questions[0].text, "Why?");
    }

    #[test]
    fn failing_backend_does_not_propagate() {
        let mut store = Store::open(BrokenBackend);
        assert!(store.is_empty());

        let id = store.add_category("Still works").unwrap().id;
        assert!(store.add_question("In memory only", id).is_some());
        assert!(!store.save());
        assert_eq!(store.question_count(), 1);
    }

    #[test]
    fn mutations_are_persisted() {
        let mut store = memory_store();
        let id = store.add_category("Fun").unwrap().id;
        store.add_question("One", id);

        let blob = store.backend().blob().unwrap();
        assert!(blob.contains("\"Fun\""));
        assert!(blob.contains("\"One\""));
    }

    #[test]
    fn delete_category_by_id() {
        let mut store = memory_store();
        let fun = store.add_category("Fun").unwrap().id;
        store.add_category("Deep");

        assert!(store.delete_category(fun));
        assert_eq!(names(&store), vec!["Deep"]);
        assert!(!store.delete_category(fun));
    }

    #[test]
    fn delete_categories_by_position() {
        let mut store = memory_store();
        for name in ["A", "B", "C", "D"] {
            store.add_category(name);
        }

        assert_eq!(store.delete_categories_at(&[0, 2, 2, 9]), 2);
        assert_eq!(names(&store), vec!["B", "D"]);
        assert_eq!(store.delete_categories_at(&[5]), 0);
    }

    #[test]
    fn add_question_to_unknown_category_is_noop() {
        let mut store = memory_store();
        store.add_category("Fun");
        assert!(store.add_question("Lost", CategoryId::new()).is_none());
        assert_eq!(store.question_count(), 0);
    }

    #[test]
    fn delete_question_by_id() {
        let mut store = memory_store();
        let fun = store.add_category("Fun").unwrap().id;
        let one = store.add_question("One", fun).unwrap();
        store.add_question("Two", fun);

        assert!(store.delete_question(one, fun));
        assert!(!store.delete_question(one, fun));
        assert!(!store.delete_question(QuestionId::new(), CategoryId::new()));

        let category = store.category(fun).unwrap();
        let texts: Vec<_> = category.questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["Two"]);
    }

    #[test]
    fn delete_questions_by_position() {
        let mut store = memory_store();
        let fun = store.add_category("Fun").unwrap().id;
        for text in ["One", "Two", "Three"] {
            store.add_question(text, fun);
        }

        assert_eq!(store.delete_questions_at(&[1], fun), 1);
        assert_eq!(store.delete_questions_at(&[7], fun), 0);
        assert_eq!(store.delete_questions_at(&[0], CategoryId::new()), 0);
        assert_eq!(store.question_count(), 2);
    }

    #[test]
    fn rename_category_keeps_questions() {
        let mut store = memory_store();
        let id = store.add_category("Old").unwrap().id;
        store.add_question("Kept", id);

        assert!(store.rename_category(id, "New"));
        assert!(!store.rename_category(CategoryId::new(), "Nope"));
        assert_eq!(store.find_category_by_name("New").unwrap().len(), 1);
        assert!(store.find_category_by_name("Old").is_none());
    }

    #[test]
    fn rejects_names_the_text_format_cannot_hold() {
        let mut store = memory_store();
        assert!(store.add_category("").is_none());
        assert!(store.add_category("  ").is_none());
        assert!(store.add_category("Two\nlines").is_none());
        assert!(store.is_empty());

        let id = store.add_category("Fun").unwrap().id;
        assert!(!store.rename_category(id, ""));
        assert!(!store.rename_category(id, "Two\nlines"));
        assert_eq!(names(&store), vec!["Fun"]);
    }

    #[test]
    fn question_text_is_trimmed_or_rejected() {
        let mut store = memory_store();
        let fun = store.add_category("Fun").unwrap().id;

        assert!(store.add_question("[Secret]", fun).is_none());
        assert!(store.add_question("Line one\nline two", fun).is_none());
        assert!(store.add_question("   ", fun).is_none());
        let padded = store.add_question("  padded  ", fun).unwrap();

        let category = store.category(fun).unwrap();
        assert_eq!(category.len(), 1);
        assert_eq!(category.question(padded).unwrap().text, "padded");
    }

    #[test]
    fn accepted_content_survives_export_and_edit() {
        let mut store = memory_store();
        let fun = store.add_category("Fun").unwrap().id;
        for text in ["[Secret]", "Line one\nline two", "  padded  ", "[half open"] {
            store.add_question(text, fun);
        }
        store.add_category("");
        store.add_category(" Spaced ");
        let before = shape(&store);

        let text = store.export_text();
        store.bulk_edit(&text);

        let after = shape(&store);
        assert_eq!(after, before);
        assert_eq!(
            before,
            vec![
                ("Fun".to_string(), vec!["padded".to_string(), "[half open".to_string()]),
                (" Spaced ".to_string(), vec![]),
            ]
        );
    }

    #[test]
    fn bulk_add_appends_to_existing_category() {
        let mut store = memory_store();
        let fun = store.add_category("Fun").unwrap().id;
        store.add_question("One", fun);
        let deep = store.add_category("Deep").unwrap().id;
        store.add_question("Deep one", deep);
        let deep_before = store.category(deep).unwrap().clone();

        store.bulk_add("[Fun]\nTwo\nThree");

        let fun_after = store.category(fun).unwrap();
        let texts: Vec<_> = fun_after.questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["One", "Two", "Three"]);
        assert_eq!(store.category(deep).unwrap(), &deep_before);
        assert_eq!(store.categories().len(), 2);
    }

    #[test]
    fn bulk_edit_replaces_everything() {
        let mut store = memory_store();
        let fun = store.add_category("Fun").unwrap().id;
        store.add_question("One", fun);

        store.bulk_edit("[Deep]\nWhat scares you?");

        assert_eq!(names(&store), vec!["Deep"]);
        assert!(store.category(fun).is_none());

        let reopened = Store::open(store.backend().clone());
        assert_eq!(reopened.categories(), store.categories());
    }

    #[test]
    fn export_matches_codec() {
        let mut store = memory_store();
        let fun = store.add_category("Fun").unwrap().id;
        store.add_question("One", fun);
        assert_eq!(store.export_text(), "[Fun]\nOne\n");
    }
}
