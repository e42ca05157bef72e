//! Category domain model
//!
//! Categories group items under a name and a display color. The color is
//! the one field that is coerced instead of rejected: an invalid hex color
//! silently becomes [`DEFAULT_COLOR`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::error::{require_text, TodoError};
use super::id::CategoryId;

/// Gray used when no valid color is supplied
pub const DEFAULT_COLOR: &str = "#808080";

/// A named, colored grouping of items
#[derive(Debug, Clone, Serialize)]
pub struct TodoCategory {
    id: CategoryId,
    name: String,
    description: String,
    color: String,
    created_at: DateTime<Utc>,
}

impl TodoCategory {
    /// Creates a category; `id` is handed out by the owning manager
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        description: impl Into<String>,
        color: &str,
    ) -> Result<Self, TodoError> {
        let name = name.into();
        require_text("name", &name, "Category name")?;

        Ok(Self {
            id,
            name,
            description: description.into(),
            color: coerce_color(color),
            created_at: Utc::now(),
        })
    }

    /// Returns true for `#RGB` or `#RRGGBB` hex colors (case-insensitive)
    pub fn validate_color(color: &str) -> bool {
        let Some(digits) = color.strip_prefix('#') else {
            return false;
        };
        (color.len() == 4 || color.len() == 7) && digits.chars().all(|c| c.is_ascii_hexdigit())
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Renames the category
    pub fn update_name(&mut self, new_name: impl Into<String>) -> Result<(), TodoError> {
        let new_name = new_name.into();
        require_text("new_name", &new_name, "Category name")?;
        self.name = new_name;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Sets the color, falling back to gray like the constructor does
    pub fn set_color(&mut self, color: &str) {
        self.color = coerce_color(color);
    }
}

fn coerce_color(color: &str) -> String {
    if TodoCategory::validate_color(color) {
        color.to_string()
    } else {
        DEFAULT_COLOR.to_string()
    }
}

impl PartialEq for TodoCategory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TodoCategory {}

impl std::hash::Hash for TodoCategory {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TodoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id.value())
    }
}
