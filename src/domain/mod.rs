//! Domain models for the todo engine
//!
//! Contains the core business logic without any I/O concerns.

mod error;
mod id;
mod priority;
mod category;
mod item;
mod manager;
mod statistics;

pub use error::TodoError;
pub use id::{CategoryId, IdError, IdSequence, ItemId};
pub use priority::{Priority, PriorityError};
pub use category::{TodoCategory, DEFAULT_COLOR};
pub use item::{today, validate_due_date, TodoItem};
pub use manager::{ItemFilter, TodoListManager};
pub use statistics::{TodoStatistics, TodoSummary, DEFAULT_UPCOMING_DAYS, UNCATEGORIZED};
