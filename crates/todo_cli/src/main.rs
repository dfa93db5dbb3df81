//! Command-line front end for the to-do list.
//!
//! # Responsibility
//! - Translate one command into one store operation.
//! - Re-render the full list after every command.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use todo_core::db::open_db;
use todo_core::{
    default_log_level, init_logging, ItemId, SqliteItemPersistence, ToDoItem, ToDoStore,
    DEFAULT_ITEMS_KEY,
};

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Keep a small to-do list")]
#[command(version)]
struct Cli {
    /// SQLite database file
    #[arg(long, default_value = "todo.sqlite3")]
    db: PathBuf,

    /// Storage key the list is saved under
    #[arg(long, default_value = DEFAULT_ITEMS_KEY)]
    key: String,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long)]
    log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all items
    List,
    /// Add a new item
    Add {
        /// Item text
        text: String,
    },
    /// Replace the text of an item
    Edit {
        /// Item number as shown by `list`
        id: ItemId,
        /// New text
        text: String,
    },
    /// Delete an item
    Remove {
        /// Item number as shown by `list`
        id: ItemId,
    },
    /// Mark an item done, or open again
    Toggle {
        /// Item number as shown by `list`
        id: ItemId,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let persistence = SqliteItemPersistence::with_key(&conn, cli.key.as_str())?;
    let mut store = ToDoStore::load(persistence).context("failed to load items")?;

    match cli.command {
        Commands::List => {}
        Commands::Add { text } => {
            let id = store.add(text)?;
            println!("added #{id}");
        }
        Commands::Edit { id, text } => {
            let previous = store.get(id).map(|item| item.text.clone());
            store.edit(id, text)?;
            if let Some(previous) = previous {
                println!("updated #{id} (was \"{previous}\")");
            }
        }
        Commands::Remove { id } => {
            let removed = store.remove(id)?;
            println!("removed \"{}\"", removed.text);
        }
        Commands::Toggle { id } => {
            let completed = store.toggle_completed(id)?;
            println!("#{id} {}", if completed { "done" } else { "open" });
        }
    }

    render(store.list());
    Ok(())
}

fn render(items: &[ToDoItem]) {
    if items.is_empty() {
        println!("(no items)");
        return;
    }
    for (id, item) in items.iter().enumerate() {
        let mark = if item.completed { 'x' } else { ' ' };
        println!("{id}. [{mark}] {}", item.text);
    }
}
