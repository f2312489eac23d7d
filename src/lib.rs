//! Icebreaker - organize conversation-starter questions and draw them at random
//!
//! Questions live in named categories that are persisted as a single JSON
//! snapshot. Categories can be imported and edited in bulk through a plain
//! `[Category]` text format, and play mode draws unseen questions uniformly
//! at random from the selected categories.

pub mod app;
pub mod config;
pub mod deck;
pub mod play;

pub use config::Config;
pub use deck::{Category, Question, Store};
pub use play::{PlaySession, PlayState};
