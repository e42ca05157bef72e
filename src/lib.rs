//! Todolist - an in-memory todo engine
//!
//! Tracks work items with priorities, due dates and optional categories,
//! and derives statistics over the collection. The `todo` binary wraps
//! the engine in an interactive session.

pub mod domain;
pub mod config;
pub mod cli;

pub use domain::{
    CategoryId, ItemFilter, ItemId, Priority, TodoCategory, TodoError, TodoItem,
    TodoListManager, TodoStatistics, TodoSummary,
};
