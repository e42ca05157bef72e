//! Todo list manager
//!
//! Owns the item and category collections together with their id
//! counters. Every mutation goes through here; items and categories never
//! register themselves.
//!
//! Lookups that miss return `None`/`false`. Only validation failures are
//! reported as [`TodoError`], and a failed call leaves the manager
//! untouched.

use chrono::{Days, NaiveDate, Utc};
use tracing::debug;

use super::category::TodoCategory;
use super::error::TodoError;
use super::id::{CategoryId, IdSequence, ItemId};
use super::item::{today, TodoItem};
use super::priority::Priority;

/// Combined filter for [`TodoListManager::filter_items`]
///
/// Each criterion that is set narrows the result; unset criteria are
/// ignored. The default filter matches every item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub category: Option<CategoryId>,
    pub has_deadline: Option<bool>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn category(mut self, category: &TodoCategory) -> Self {
        self.category = Some(category.id());
        self
    }

    pub fn has_deadline(mut self, has_deadline: bool) -> Self {
        self.has_deadline = Some(has_deadline);
        self
    }

    /// Returns true if the item satisfies every set criterion
    pub fn matches(&self, item: &TodoItem) -> bool {
        self.completed.map_or(true, |c| item.is_completed() == c)
            && self.priority.map_or(true, |p| item.priority() == p)
            && self.category.map_or(true, |id| item.in_category(id))
            && self.has_deadline.map_or(true, |d| item.has_due_date() == d)
    }
}

/// The authoritative store of items and categories
#[derive(Debug, Default)]
pub struct TodoListManager {
    items: Vec<TodoItem>,
    categories: Vec<TodoCategory>,
    item_ids: IdSequence,
    category_ids: IdSequence,
}

impl TodoListManager {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------

    /// Creates an item with the next id and appends it
    pub fn add_item(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Result<&TodoItem, TodoError> {
        let id = ItemId::new(self.item_ids.peek());
        let item = TodoItem::new(id, title, description, priority)?;
        self.item_ids.advance();

        debug!(item_id = %id, priority = item.priority().as_str(), "item added");
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes an item; returns false if no item has that id
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.id() == id) else {
            return false;
        };
        self.items.remove(pos);
        debug!(item_id = %id, "item removed");
        true
    }

    pub fn get_item(&self, id: ItemId) -> Option<&TodoItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Mutable access for in-place edits (title, priority, due date...)
    pub fn get_item_mut(&mut self, id: ItemId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    /// All items in insertion order
    pub fn all_items(&self) -> Vec<&TodoItem> {
        self.items.iter().collect()
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    /// Marks an item done; returns false if no item has that id
    pub fn complete_item(&mut self, id: ItemId) -> bool {
        match self.get_item_mut(id) {
            Some(item) => {
                item.complete();
                debug!(item_id = %id, "item completed");
                true
            }
            None => false,
        }
    }

    /// Reopens an item; returns false if no item has that id
    pub fn uncomplete_item(&mut self, id: ItemId) -> bool {
        match self.get_item_mut(id) {
            Some(item) => {
                item.uncomplete();
                debug!(item_id = %id, "item reopened");
                true
            }
            None => false,
        }
    }

    /// Points an item at an existing category, or detaches it with `None`
    ///
    /// Returns `Ok(false)` if the item does not exist and an error if the
    /// category does not.
    pub fn assign_category(
        &mut self,
        item_id: ItemId,
        category_id: Option<CategoryId>,
    ) -> Result<bool, TodoError> {
        let category = match category_id {
            Some(cid) => Some(
                self.categories
                    .iter()
                    .find(|c| c.id() == cid)
                    .ok_or_else(|| {
                        TodoError::invalid("category_id", format!("Category {} does not exist", cid))
                    })?,
            ),
            None => None,
        };

        let Some(item) = self.items.iter_mut().find(|i| i.id() == item_id) else {
            return Ok(false);
        };
        item.set_category(category);
        debug!(item_id = %item_id, category_id = ?category_id, "category assigned");
        Ok(true)
    }

    /// Empties both collections and restarts both id counters
    pub fn clear(&mut self) {
        self.items.clear();
        self.categories.clear();
        self.item_ids.reset();
        self.reset_category_ids();
        debug!("todo list cleared");
    }

    /// Restarts category ids at 1
    ///
    /// Administrative: calling this while categories exist produces
    /// duplicate ids.
    pub fn reset_category_ids(&mut self) {
        self.category_ids.reset();
    }

    // -------------------------------------------------------------------
    // Status
    // -------------------------------------------------------------------

    pub fn get_completed_items(&self) -> Vec<&TodoItem> {
        self.items.iter().filter(|i| i.is_completed()).collect()
    }

    pub fn get_pending_items(&self) -> Vec<&TodoItem> {
        self.items.iter().filter(|i| !i.is_completed()).collect()
    }

    // -------------------------------------------------------------------
    // Priority
    // -------------------------------------------------------------------

    pub fn get_items_by_priority(&self, priority: Priority) -> Vec<&TodoItem> {
        self.items
            .iter()
            .filter(|i| i.priority() == priority)
            .collect()
    }

    /// Pending items with `High` or `Critical` priority
    pub fn get_urgent_items(&self) -> Vec<&TodoItem> {
        self.items
            .iter()
            .filter(|i| i.priority().is_urgent() && !i.is_completed())
            .collect()
    }

    /// Most urgent first; ties keep insertion order
    pub fn get_items_sorted_by_priority(&self) -> Vec<&TodoItem> {
        let mut sorted = self.all_items();
        sorted.sort_by_key(|i| i.priority().sort_order());
        sorted
    }

    // -------------------------------------------------------------------
    // Due dates
    // -------------------------------------------------------------------

    pub fn get_overdue_items(&self) -> Vec<&TodoItem> {
        let now = Utc::now();
        self.items.iter().filter(|i| i.is_overdue_at(now)).collect()
    }

    pub fn get_items_due_today(&self) -> Vec<&TodoItem> {
        let today = today();
        self.items.iter().filter(|i| i.is_due_on(today)).collect()
    }

    /// Pending items due on or before today + `days`, overdue ones included
    pub fn get_items_due_within_days(&self, days: i64) -> Result<Vec<&TodoItem>, TodoError> {
        let cutoff = days_from_today(days)?;
        Ok(self
            .items
            .iter()
            .filter(|i| !i.is_completed() && i.due_day().is_some_and(|due| due <= cutoff))
            .collect())
    }

    /// Dated items first by due date, then undated ones in insertion order
    pub fn get_items_sorted_by_due_date(&self) -> Vec<&TodoItem> {
        let mut sorted = self.all_items();
        sorted.sort_by_key(|i| (i.due_date().is_none(), i.due_date()));
        sorted
    }

    // -------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------

    /// Items referencing the category, matched by id
    pub fn get_items_by_category(&self, category: &TodoCategory) -> Vec<&TodoItem> {
        self.items
            .iter()
            .filter(|i| i.in_category(category.id()))
            .collect()
    }

    pub fn get_uncategorized_items(&self) -> Vec<&TodoItem> {
        self.items
            .iter()
            .filter(|i| i.category().is_none())
            .collect()
    }

    /// Creates a category; names are unique ignoring case
    pub fn add_category(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        color: &str,
    ) -> Result<&TodoCategory, TodoError> {
        let name = name.into();
        if self.get_category_by_name(&name).is_some() {
            return Err(TodoError::Conflict(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let id = CategoryId::new(self.category_ids.peek());
        let category = TodoCategory::new(id, name, description, color)?;
        self.category_ids.advance();

        debug!(category_id = %id, name = category.name(), "category added");
        self.categories.push(category);
        Ok(&self.categories[self.categories.len() - 1])
    }

    /// Renames a category, keeping names unique ignoring case
    ///
    /// Returns `Ok(false)` if no category has that id.
    pub fn rename_category(
        &mut self,
        id: CategoryId,
        new_name: impl Into<String>,
    ) -> Result<bool, TodoError> {
        let new_name = new_name.into();
        if let Some(existing) = self.get_category_by_name(&new_name) {
            if existing.id() != id {
                return Err(TodoError::Conflict(format!(
                    "Category '{}' already exists",
                    new_name
                )));
            }
        }

        let Some(category) = self.categories.iter_mut().find(|c| c.id() == id) else {
            return Ok(false);
        };
        category.update_name(new_name)?;
        Ok(true)
    }

    /// Removes a category after detaching it from every item
    ///
    /// Items are kept. Returns false if no category has that id.
    pub fn remove_category(&mut self, id: CategoryId) -> bool {
        let Some(pos) = self.categories.iter().position(|c| c.id() == id) else {
            return false;
        };

        let mut detached = 0usize;
        for item in self.items.iter_mut().filter(|i| i.in_category(id)) {
            item.detach_category();
            detached += 1;
        }

        self.categories.remove(pos);
        debug!(category_id = %id, detached, "category removed");
        true
    }

    /// All categories in creation order
    pub fn all_categories(&self) -> Vec<&TodoCategory> {
        self.categories.iter().collect()
    }

    pub fn get_category(&self, id: CategoryId) -> Option<&TodoCategory> {
        self.categories.iter().find(|c| c.id() == id)
    }

    /// Case-insensitive lookup by name
    pub fn get_category_by_name(&self, name: &str) -> Option<&TodoCategory> {
        let wanted = name.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.name().to_lowercase() == wanted)
    }

    // -------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------

    /// Case-insensitive substring match on title or description
    ///
    /// A blank term matches nothing.
    pub fn search_items(&self, term: &str) -> Vec<&TodoItem> {
        if term.trim().is_empty() {
            return Vec::new();
        }

        let term = term.to_lowercase();
        self.items
            .iter()
            .filter(|i| {
                i.title().to_lowercase().contains(&term)
                    || i.description().to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn filter_items(&self, filter: &ItemFilter) -> Vec<&TodoItem> {
        self.items.iter().filter(|i| filter.matches(i)).collect()
    }
}

/// Today plus a non-negative number of days
///
/// Fails when the result falls past the last representable date.
pub(crate) fn days_from_today(days: i64) -> Result<NaiveDate, TodoError> {
    let count = u64::try_from(days)
        .map_err(|_| TodoError::invalid("days", "Days must be non-negative"))?;
    today()
        .checked_add_days(Days::new(count))
        .ok_or_else(|| {
            TodoError::invalid("days", format!("{} days is past the last supported date", days))
        })
}
