//! In-process session
//!
//! The engine keeps everything in memory, so a session is the unit of
//! state: each line is parsed as a session command and applied to one
//! [`TodoListManager`].

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use super::category::{self, CategoryCommands};
use super::item::{self, AddArgs};
use super::output::Output;
use super::query::{self, ListArgs, SortKey};
use crate::config::{ProjectConfig, MAX_UPCOMING_DAYS};
use crate::domain::{ItemId, Priority, TodoItem, TodoListManager};

#[derive(Parser, Debug)]
#[command(name = "todo", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Add an item
    Add(AddArgs),

    /// Remove an item
    Remove { id: ItemId },

    /// Show item details
    Show { id: ItemId },

    /// Mark an item as done
    Done { id: ItemId },

    /// Reopen a completed item
    Undo { id: ItemId },

    /// Change an item's title
    Rename {
        id: ItemId,
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Change an item's description
    Describe {
        id: ItemId,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Change an item's priority
    #[command(name = "priority")]
    SetPriority { id: ItemId, priority: Priority },

    /// Set or clear (`none`) an item's due date
    Due { id: ItemId, date: String },

    /// Put an item in a category, or `none` to detach it
    Assign { id: ItemId, category: String },

    /// List items, optionally filtered
    List(ListArgs),

    /// List all items in priority or due-date order
    Sorted {
        #[arg(value_enum)]
        by: SortKey,
    },

    /// Pending items past their due moment
    Overdue,

    /// Pending items due today
    Today,

    /// Pending items due within the next N days (overdue ones included)
    Within {
        #[arg(allow_negative_numbers = true)]
        days: i64,
    },

    /// Pending high and critical items
    Urgent,

    /// Search titles and descriptions
    Search {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Show statistics
    Stats {
        /// Upcoming-deadline window in days
        #[arg(
            long,
            allow_negative_numbers = true,
            value_parser = clap::value_parser!(i64).range(..=MAX_UPCOMING_DAYS)
        )]
        days: Option<i64>,
    },

    /// Remove every item and category
    Clear,

    /// End the session
    #[command(alias = "quit")]
    Exit,
}

/// Whether the session should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Splits a command line into words, honoring single and double quotes
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        anyhow::bail!("Unterminated {} quote", q);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

pub struct Session {
    pub(super) manager: TodoListManager,
    pub(super) config: ProjectConfig,
    pub(super) output: Output,
}

impl Session {
    pub fn new(config: ProjectConfig, output: Output) -> Self {
        Self {
            manager: TodoListManager::new(),
            config,
            output,
        }
    }

    pub fn manager(&self) -> &TodoListManager {
        &self.manager
    }

    pub(super) fn require_item(&self, id: ItemId) -> Result<&TodoItem> {
        self.manager
            .get_item(id)
            .ok_or_else(|| anyhow::anyhow!("Item not found: {}", id))
    }

    pub(super) fn require_item_mut(&mut self, id: ItemId) -> Result<&mut TodoItem> {
        self.manager
            .get_item_mut(id)
            .ok_or_else(|| anyhow::anyhow!("Item not found: {}", id))
    }

    /// Parses and runs one line; blank lines and `#` comments are skipped
    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = split_line(line)?;
        let parsed = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                | ErrorKind::DisplayVersion => {
                    print!("{}", err);
                    return Ok(Flow::Continue);
                }
                _ => {
                    let rendered = err.to_string();
                    let message = rendered
                        .lines()
                        .next()
                        .unwrap_or_default()
                        .trim_start_matches("error: ");
                    anyhow::bail!("{}", message);
                }
            },
        };

        self.output
            .verbose_ctx("session", &format!("Running: {}", line));
        self.execute(parsed.command)
    }

    pub fn execute(&mut self, command: SessionCommand) -> Result<Flow> {
        match command {
            SessionCommand::Add(args) => item::add(self, args)?,
            SessionCommand::Remove { id } => item::remove(self, id)?,
            SessionCommand::Show { id } => item::show(self, id)?,
            SessionCommand::Done { id } => item::complete(self, id)?,
            SessionCommand::Undo { id } => item::reopen(self, id)?,
            SessionCommand::Rename { id, title } => item::rename(self, id, title.join(" "))?,
            SessionCommand::Describe { id, text } => item::describe(self, id, text.join(" "))?,
            SessionCommand::SetPriority { id, priority } => item::set_priority(self, id, priority)?,
            SessionCommand::Due { id, date } => item::set_due(self, id, &date)?,
            SessionCommand::Assign { id, category } => item::assign(self, id, &category)?,
            SessionCommand::List(args) => query::list(self, &args)?,
            SessionCommand::Sorted { by } => query::sorted(self, by)?,
            SessionCommand::Overdue => query::overdue(self)?,
            SessionCommand::Today => query::due_today(self)?,
            SessionCommand::Within { days } => query::within(self, days)?,
            SessionCommand::Urgent => query::urgent(self)?,
            SessionCommand::Search { term } => query::search(self, &term.join(" "))?,
            SessionCommand::Category(cmd) => category::run(self, cmd)?,
            SessionCommand::Stats { days } => query::stats(self, days)?,
            SessionCommand::Clear => {
                self.manager.clear();
                self.output.success("Cleared all items and categories");
            }
            SessionCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Runs lines from `reader` until EOF or `exit`
    ///
    /// With `keep_going` a failing line is reported and skipped; otherwise
    /// the first failure ends the run.
    pub fn run_lines<R: BufRead>(&mut self, reader: R, keep_going: bool, prompt: bool) -> Result<()> {
        let mut lines = reader.lines();
        let mut number = 0usize;

        loop {
            if prompt {
                print!("todo> ");
                io::stdout().flush().context("Failed to flush prompt")?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read command")?;
            number += 1;

            match self.execute_line(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if keep_going => self.output.error(&format!("{:#}", e)),
                Err(e) => return Err(e.context(format!("line {}: {}", number, line.trim()))),
            }
        }

        Ok(())
    }

    /// Runs an interactive session on stdin
    pub fn run_interactive(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let prompt = stdin.is_terminal();
        if prompt {
            println!("todo shell - type `help` for commands, `exit` to quit");
        }
        self.run_lines(stdin.lock(), true, prompt)
    }

    /// Runs a script file, stopping at the first failing command
    pub fn run_script(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open script: {}", path.display()))?;
        self.output
            .verbose_ctx("run", &format!("Running script: {}", path.display()));
        self.run_lines(BufReader::new(file), false, false)
    }
}
