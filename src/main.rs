use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use icebreaker::Config;
use icebreaker::app::{PlayLoop, resolve_category};
use icebreaker::deck::{BulkEditor, Category, FileBackend, Store};
use icebreaker::play::PlaySession;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "icebreaker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Category file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List categories
    List,
    /// Show the questions of a category
    Show {
        /// Category name or id
        category: String,
    },
    /// Create an empty category
    AddCategory {
        /// Name of the new category
        name: String,
    },
    /// Delete a category and all its questions
    RemoveCategory {
        /// Category name or id
        category: String,
    },
    /// Rename a category
    RenameCategory {
        /// Category name or id
        category: String,
        /// New name
        name: String,
    },
    /// Add a question to a category
    Add {
        /// Category name or id
        category: String,
        /// Question text
        text: String,
    },
    /// Remove a question by its position as shown by `show`
    Remove {
        /// Category name or id
        category: String,
        /// Position, starting at 1
        position: usize,
    },
    /// Print all categories in the bulk text format
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Add questions from bulk text, merging into categories with the same name
    BulkAdd {
        /// Text file, or - for stdin
        input: String,
    },
    /// Replace everything with the contents of bulk text
    Edit {
        /// Text file, or - for stdin
        input: String,
        /// Apply even if questions or categories would be removed
        #[arg(short, long)]
        yes: bool,
    },
    /// Draw random questions interactively
    Play {
        /// Only draw from these categories (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "icebreaker=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    // An explicit data path makes the config optional
    let config = if cli.data.is_some() { Config::load_or_default() } else { Config::load()? };
    let store_path = match cli.data {
        Some(path) => path,
        None => config.store_path()?,
    };
    tracing::debug!("Using category file {:?}", store_path);
    let mut store = Store::open(FileBackend::new(store_path));

    match cli.command {
        Some(Commands::List) => {
            if store.is_empty() {
                println!("No categories yet. Add one with `icebreaker add-category <NAME>`.");
            }
            for category in store.categories() {
                println!("{}  {} ({} questions)", category.id, category.name, category.len());
            }
        }
        Some(Commands::Show { category }) => {
            let category = find(store.categories(), &category)?;
            println!("[{}]", category.name);
            for (index, question) in category.questions.iter().enumerate() {
                println!("{:>3}. {}", index + 1, question.text);
            }
        }
        Some(Commands::AddCategory { name }) => {
            let Some(category) = store.add_category(name.as_str()) else {
                bail!("Category name {name:?} must be non-empty and on a single line");
            };
            println!("Added category {} ({})", category.name, category.id);
        }
        Some(Commands::RemoveCategory { category }) => {
            let id = find(store.categories(), &category)?.id;
            store.delete_category(id);
            println!("Removed category {category}");
        }
        Some(Commands::RenameCategory { category, name }) => {
            let id = find(store.categories(), &category)?.id;
            if !store.rename_category(id, name.as_str()) {
                bail!("Category name {name:?} must be non-empty and on a single line");
            }
            println!("Renamed {category} to {name}");
        }
        Some(Commands::Add { category, text }) => {
            let id = find(store.categories(), &category)?.id;
            if store.add_question(&text, id).is_none() {
                bail!("Question must be a single non-empty line that is not a [header]");
            }
            println!("Added question to {category}");
        }
        Some(Commands::Remove { category, position }) => {
            let found = find(store.categories(), &category)?;
            let id = found.id;
            if position == 0 || position > found.len() {
                bail!("{category} has no question at position {position}");
            }
            store.delete_questions_at(&[position - 1], id);
            println!("Removed question {position} from {category}");
        }
        Some(Commands::Export { output }) => {
            let text = store.export_text();
            match output {
                Some(path) => std::fs::write(&path, text)
                    .with_context(|| format!("Failed to write export to {:?}", path))?,
                None => print!("{text}"),
            }
        }
        Some(Commands::BulkAdd { input }) => {
            let mut editor = BulkEditor::add();
            editor.set_text(read_input(&input)?);
            let summary = editor.apply(&mut store);
            println!(
                "Added {} questions ({} new categories)",
                summary.questions_after - summary.questions_before,
                summary.categories_after - summary.categories_before
            );
        }
        Some(Commands::Edit { input, yes }) => {
            let mut editor = BulkEditor::edit(store.categories());
            editor.set_text(read_input(&input)?);
            if !editor.has_changes() {
                println!("No changes");
                return Ok(());
            }

            let preview = editor.preview(store.categories());
            if preview.is_destructive() && !yes {
                bail!(
                    "Edit removes {} questions ({} -> {} categories), re-run with --yes to apply",
                    preview.questions_removed,
                    preview.categories_before,
                    preview.categories_after
                );
            }

            let summary = editor.apply(&mut store);
            println!(
                "Saved {} categories with {} questions",
                summary.categories_after, summary.questions_after
            );
        }
        Some(Commands::Play { categories }) => play(&store, &config, &categories)?,
        None => play(&store, &config, &[])?,
    }

    Ok(())
}

fn find<'a>(categories: &'a [Category], key: &str) -> Result<&'a Category> {
    resolve_category(categories, key).with_context(|| format!("No category named {key:?}"))
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("Failed to read stdin")?;
        Ok(text)
    } else {
        let path = Path::new(input);
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
    }
}

fn play(store: &Store, config: &Config, names: &[String]) -> Result<()> {
    let ids = names
        .iter()
        .map(|name| find(store.categories(), name).map(|c| c.id))
        .collect::<Result<Vec<_>>>()?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    PlayLoop::new(store.categories(), PlaySession::with_scope(ids))
        .show_category(config.show_category_in_play)
        .run(stdin.lock(), &mut stdout, &mut rand::rng())
}
