//! Question categories
//!
//! This module holds the category/question model, the bulk text format used
//! to import and edit questions, and the store that persists the snapshot.

pub mod backend;
pub mod codec;
pub mod editor;
pub mod error;
pub mod model;
pub mod store;

// Re-exports
pub use backend::{FileBackend, MemoryBackend, SnapshotBackend};
pub use editor::{BulkEditor, EditMode, EditSummary};
pub use error::StoreError;
pub use model::{Category, CategoryId, Question, QuestionId};
pub use store::Store;
