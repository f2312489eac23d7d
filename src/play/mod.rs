//! Play mode: drawing unseen questions at random

pub mod draw;
pub mod session;

pub use draw::{Draw, Scope, available, draw};
pub use session::{PlaySession, PlayState};
