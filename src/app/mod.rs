//! Interactive play loop and category lookup for the command line

pub mod command;

use std::io::{BufRead, Write};

use anyhow::Result;
use rand::Rng;

use crate::deck::{Category, CategoryId, Question};
use crate::play::{PlaySession, PlayState};
use command::{Command, HELP, ParseResult, parse_command};

/// Find a category by id, falling back to the first exact name match
pub fn resolve_category<'a>(categories: &'a [Category], key: &str) -> Option<&'a Category> {
    if let Ok(id) = key.parse::<CategoryId>() {
        if let Some(category) = categories.iter().find(|c| c.id == id) {
            return Some(category);
        }
    }
    categories.iter().find(|c| c.name == key)
}

/// Line-oriented play mode over a fixed set of categories
pub struct PlayLoop<'a> {
    categories: &'a [Category],
    session: PlaySession,
    show_category: bool,
}

impl<'a> PlayLoop<'a> {
    /// Create a loop continuing the given session
    pub fn new(categories: &'a [Category], session: PlaySession) -> Self {
        Self { categories, session, show_category: true }
    }

    /// Whether drawn questions are prefixed with their category name
    pub fn show_category(mut self, show: bool) -> Self {
        self.show_category = show;
        self
    }

    /// The underlying session
    pub fn session(&self) -> &PlaySession {
        &self.session
    }

    /// Read commands until quit or end of input
    pub fn run<I, W, R>(&mut self, input: I, out: &mut W, rng: &mut R) -> Result<()>
    where
        I: BufRead,
        W: Write,
        R: Rng + ?Sized,
    {
        writeln!(
            out,
            "Press Enter to draw a question ({} available). Type help for commands.",
            self.session.remaining(self.categories)
        )?;

        for line in input.lines() {
            let line = line?;
            match parse_command(&line) {
                ParseResult::Ok(Command::Quit) => break,
                ParseResult::Ok(command) => self.execute(command, out, rng)?,
                ParseResult::UnknownCommand(cmd) => {
                    writeln!(out, "Unknown command: {cmd}. Type help for commands.")?
                }
                ParseResult::MissingArgument(cmd) => writeln!(out, "{cmd} needs an argument")?,
            }
        }

        tracing::debug!("Play loop finished after {} questions", self.session.used().len());
        Ok(())
    }

    fn execute<W, R>(&mut self, command: Command, out: &mut W, rng: &mut R) -> Result<()>
    where
        W: Write,
        R: Rng + ?Sized,
    {
        match command {
            Command::Next => {
                let categories = self.categories;
                let show_category = self.show_category;
                match self.session.draw_next(categories, rng) {
                    PlayState::Ready(question) => match category_of(categories, question) {
                        Some(name) if show_category => {
                            writeln!(out, "[{name}] {}", question.text)?
                        }
                        _ => writeln!(out, "{}", question.text)?,
                    },
                    PlayState::Exhausted => writeln!(out, "No more questions!")?,
                    PlayState::Cover => {}
                }
            }
            Command::Scope(names) => {
                let mut ids = Vec::with_capacity(names.len());
                for name in &names {
                    match resolve_category(self.categories, name) {
                        Some(category) => ids.push(category.id),
                        None => {
                            writeln!(out, "Unknown category: {name}")?;
                            return Ok(());
                        }
                    }
                }
                self.session.select_scope(ids);
                self.describe_scope(out)?;
            }
            Command::Toggle(name) => match resolve_category(self.categories, &name) {
                Some(category) => {
                    self.session.scope_mut().toggle(category.id);
                    self.describe_scope(out)?;
                }
                None => writeln!(out, "Unknown category: {name}")?,
            },
            Command::All => {
                self.session.select_all();
                self.describe_scope(out)?;
            }
            Command::List => {
                let used = self.session.used();
                let scope = self.session.scope();
                for category in self.categories {
                    let unseen =
                        category.questions.iter().filter(|q| !used.contains(&q.id)).count();
                    let marker = if scope.includes(category.id) { '*' } else { ' ' };
                    let total = category.len();
                    writeln!(out, "{marker} {} ({unseen}/{total} unseen)", category.name)?;
                }
            }
            Command::Reset => {
                self.session.reset();
                writeln!(out, "All questions are unseen again.")?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn describe_scope<W: Write>(&self, out: &mut W) -> Result<()> {
        let remaining = self.session.remaining(self.categories);
        if self.session.scope().is_all() {
            writeln!(out, "Drawing from all categories ({remaining} unseen)")?;
        } else {
            let names: Vec<&str> = self
                .session
                .scope()
                .filter(self.categories)
                .map(|c| c.name.as_str())
                .collect();
            writeln!(out, "Drawing from {} ({remaining} unseen)", names.join(", "))?;
        }
        Ok(())
    }
}

/// Name of the category holding `question`
fn category_of<'a>(categories: &'a [Category], question: &Question) -> Option<&'a str> {
    categories.iter().find(|c| c.question(question.id).is_some()).map(|c| c.name.as_str())
}
