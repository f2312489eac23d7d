//! Question and category model
//!
//! Categories hold an ordered list of questions. Both carry random UUID
//! identities so that two questions with the same text stay distinct.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a Question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(Uuid);

impl QuestionId {
    /// Generate a fresh random id
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for QuestionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Unique identifier for a Category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
    /// Generate a fresh random id
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for CategoryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A single icebreaker question
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    /// Stable identity
    pub id: QuestionId,
    /// Question text as shown on the card
    #[serde(alias = "question")]
    pub text: String,
}

impl Question {
    /// Create a question with a fresh id
    pub fn new(text: impl Into<String>) -> Self {
        Self { id: QuestionId::new(), text: text.into() }
    }
}

/// A named, ordered group of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identity
    pub id: CategoryId,
    /// Display name, also the lookup key for bulk text merges
    pub name: String,
    /// Questions in display order
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Category {
    /// Create an empty category with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: CategoryId::new(), name: name.into(), questions: Vec::new() }
    }

    /// Create a category holding the given questions
    pub fn with_questions(name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self { id: CategoryId::new(), name: name.into(), questions }
    }

    /// Append a question built from `text` and return its id
    pub fn push_question(&mut self, text: impl Into<String>) -> QuestionId {
        let question = Question::new(text);
        let id = question.id;
        self.questions.push(question);
        id
    }

    /// Change the display name
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Find a question by id
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Number of questions in this category
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the category has no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
