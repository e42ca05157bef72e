//! # Command-Line Interface
//!
//! The `todo` binary keeps its list in memory, so every command runs
//! inside a session:
//!
//! | Mode | Input |
//! |------|-------|
//! | `todo shell` | Commands read from stdin, one per line |
//! | `todo run <script>` | Commands read from a file, stopping at the first error |
//! | `todo exec <cmd>...` | Each argument is one command |
//!
//! ## Session Commands
//!
//! | Group | Examples |
//! |-------|----------|
//! | Items | `add`, `done`, `undo`, `due`, `assign`, `remove` |
//! | Queries | `list`, `sorted`, `overdue`, `today`, `within`, `urgent`, `search` |
//! | Categories | `category add`, `category list`, `category show` |
//! | Reporting | `stats` |
//!
//! ## Output Formats
//!
//! `--format text` (default) or `--format json`. The default can be set
//! with `default_format` in the global config file.
//!
//! ## Verbose Mode
//!
//! `--verbose` (or `-v`) prints per-command context and engine debug events
//! to stderr:
//! ```bash
//! todo --verbose run plan.todo
//! ```

mod app;
mod category;
mod item;
mod output;
mod query;
mod render;
mod session;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use session::{split_line, Flow, Session, SessionCommand};
