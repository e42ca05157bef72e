//! Todo item domain model
//!
//! Items are the trackable units of work. They carry a priority, an
//! optional due date and an optional category reference (stored as a
//! [`CategoryId`], never as a handle).

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

use super::category::TodoCategory;
use super::error::{require_text, TodoError};
use super::id::{CategoryId, ItemId};
use super::priority::Priority;

/// A single unit of work
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoItem {
    /// Unique within the owning manager
    id: ItemId,

    title: String,

    description: String,

    priority: Priority,

    /// Due moment; was today or later when it was set
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<CategoryId>,

    is_completed: bool,

    created_at: DateTime<Utc>,

    /// Set if and only if `is_completed`
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// Creates a new pending item; `id` is handed out by the owning manager
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Result<Self, TodoError> {
        let title = title.into();
        require_text("title", &title, "Title")?;

        Ok(Self {
            id,
            title,
            description: description.into(),
            priority,
            due_date: None,
            category: None,
            is_completed: false,
            created_at: Utc::now(),
            completed_at: None,
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[cfg(test)]
    pub(crate) fn set_created_at(&mut self, created_at: DateTime<Utc>) {
        self.created_at = created_at;
    }

    /// Marks the item done, stamping the completion time once
    pub fn complete(&mut self) {
        if !self.is_completed {
            self.is_completed = true;
            self.completed_at = Some(Utc::now());
        }
    }

    /// Reopens the item and clears its completion time
    pub fn uncomplete(&mut self) {
        if self.is_completed {
            self.is_completed = false;
            self.completed_at = None;
        }
    }

    pub fn update_title(&mut self, new_title: impl Into<String>) -> Result<(), TodoError> {
        let new_title = new_title.into();
        require_text("new_title", &new_title, "Title")?;
        self.title = new_title;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Sets or clears the due date
    ///
    /// A date before today (UTC, date part only) is rejected. Clearing
    /// always succeeds.
    pub fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>) -> Result<(), TodoError> {
        if let Some(due) = due_date {
            validate_due_date(due)?;
        }
        self.due_date = due_date;
        Ok(())
    }

    pub fn clear_due_date(&mut self) {
        self.due_date = None;
    }

    /// Points the item at a category, or detaches it with `None`
    ///
    /// No check is made that the category belongs to any manager; use
    /// `TodoListManager::assign_category` for that.
    pub fn set_category(&mut self, category: Option<&TodoCategory>) {
        self.category = category.map(|c| c.id());
    }

    pub(crate) fn detach_category(&mut self) {
        self.category = None;
    }

    /// Returns true if this item references the given category
    pub fn in_category(&self, category: CategoryId) -> bool {
        self.category == Some(category)
    }

    pub fn has_due_date(&self) -> bool {
        self.due_date.is_some()
    }

    /// Pending, with a due moment strictly before now
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now())
    }

    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Pending, and due on today's date
    pub fn is_due_today(&self) -> bool {
        self.is_due_on(today())
    }

    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        !self.is_completed && self.due_day() == Some(date)
    }

    /// Whole days from today until the due date; negative once overdue
    pub fn days_until_due(&self) -> Option<i64> {
        self.days_until_due_from(today())
    }

    pub fn days_until_due_from(&self, date: NaiveDate) -> Option<i64> {
        self.due_day().map(|due| (due - date).num_days())
    }

    /// Date part of the due date
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.map(|due| due.date_naive())
    }
}

/// Rejects due dates whose date part is before today
pub fn validate_due_date(due: DateTime<Utc>) -> Result<(), TodoError> {
    if due.date_naive() < today() {
        return Err(TodoError::invalid(
            "due_date",
            "Due date cannot be in the past",
        ));
    }
    Ok(())
}

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl fmt::Display for TodoItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_completed { "[X]" } else { "[ ]" };
        write!(f, "{} {}", status, self.title)?;
        if self.priority != Priority::None {
            write!(f, " [{}]", self.priority)?;
        }
        if let Some(due) = self.due_date {
            write!(f, " (Due: {})", due.format("%Y-%m-%d"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::DEFAULT_COLOR;
    use chrono::{Duration, TimeZone};

    fn make_item(id: u32) -> TodoItem {
        TodoItem::new(ItemId::new(id), format!("Task {}", id), "", Priority::None).unwrap()
    }

    fn start_of_today() -> DateTime<Utc> {
        Utc.from_utc_datetime(&today().and_hms_opt(0, 0, 0).unwrap())
    }

    #[test]
    fn new_item_is_pending() {
        let item = TodoItem::new(ItemId::new(1), "Write report", "Q3", Priority::High).unwrap();
        assert_eq!(item.id(), ItemId::new(1));
        assert_eq!(item.title(), "Write report");
        assert_eq!(item.description(), "Q3");
        assert_eq!(item.priority(), Priority::High);
        assert!(!item.is_completed());
        assert!(item.completed_at().is_none());
        assert!(item.due_date().is_none());
        assert!(item.category().is_none());
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = TodoItem::new(ItemId::new(1), "   ", "", Priority::None).unwrap_err();
        assert_eq!(err.param(), Some("title"));
    }

    #[test]
    fn complete_and_uncomplete() {
        let mut item = make_item(1);

        item.complete();
        assert!(item.is_completed());
        assert!(item.completed_at().is_some());

        item.uncomplete();
        assert!(!item.is_completed());
        assert!(item.completed_at().is_none());

        // Uncompleting a pending item is a no-op
        item.uncomplete();
        assert!(!item.is_completed());
    }

    #[test]
    fn complete_twice_keeps_first_timestamp() {
        let mut item = make_item(1);
        item.complete();
        let first = item.completed_at();

        std::thread::sleep(std::time::Duration::from_millis(5));
        item.complete();

        assert!(item.is_completed());
        assert_eq!(item.completed_at(), first);
    }

    #[test]
    fn update_title() {
        let mut item = make_item(1);
        item.update_title("Renamed").unwrap();
        assert_eq!(item.title(), "Renamed");

        let err = item.update_title("").unwrap_err();
        assert_eq!(err.param(), Some("new_title"));
        assert_eq!(item.title(), "Renamed");
    }

    #[test]
    fn due_date_in_past_is_rejected() {
        let mut item = make_item(1);
        let yesterday = Utc::now() - Duration::days(1);

        let err = item.set_due_date(Some(yesterday)).unwrap_err();
        assert_eq!(err.param(), Some("due_date"));
        assert!(item.due_date().is_none());
    }

    #[test]
    fn due_date_today_or_later_is_accepted() {
        let mut item = make_item(1);

        item.set_due_date(Some(start_of_today())).unwrap();
        assert_eq!(item.due_day(), Some(today()));

        let next_week = Utc::now() + Duration::days(7);
        item.set_due_date(Some(next_week)).unwrap();
        assert_eq!(item.days_until_due(), Some(7));

        item.set_due_date(None).unwrap();
        assert!(item.due_date().is_none());
        assert!(item.days_until_due().is_none());
    }

    #[test]
    fn clear_due_date() {
        let mut item = make_item(1);
        item.set_due_date(Some(Utc::now() + Duration::days(2))).unwrap();
        item.clear_due_date();
        assert!(!item.has_due_date());
    }

    #[test]
    fn start_of_today_is_overdue_and_due_today() {
        let mut item = make_item(1);
        item.set_due_date(Some(start_of_today())).unwrap();

        let now = start_of_today() + Duration::hours(1);
        assert!(item.is_overdue_at(now));
        assert!(item.is_due_today());

        item.complete();
        assert!(!item.is_overdue_at(now));
        assert!(!item.is_due_today());
    }

    #[test]
    fn future_due_date_is_not_overdue() {
        let mut item = make_item(1);
        item.set_due_date(Some(Utc::now() + Duration::days(3))).unwrap();
        assert!(!item.is_overdue());
        assert!(!item.is_due_today());
    }

    #[test]
    fn days_until_due_can_go_negative() {
        let mut item = make_item(1);
        item.set_due_date(Some(start_of_today())).unwrap();
        let later = today() + Duration::days(3);
        assert_eq!(item.days_until_due_from(later), Some(-3));
    }

    #[test]
    fn set_category_stores_id() {
        let mut item = make_item(1);
        let cat = TodoCategory::new(CategoryId::new(4), "Work", "", DEFAULT_COLOR).unwrap();

        item.set_category(Some(&cat));
        assert_eq!(item.category(), Some(CategoryId::new(4)));
        assert!(item.in_category(cat.id()));

        item.set_category(None);
        assert!(item.category().is_none());
    }

    #[test]
    fn display_format() {
        let mut item = TodoItem::new(ItemId::new(1), "Ship it", "", Priority::High).unwrap();
        assert_eq!(item.to_string(), "[ ] Ship it [High]");

        let due = Utc::now() + Duration::days(1);
        item.set_due_date(Some(due)).unwrap();
        item.complete();
        assert_eq!(
            item.to_string(),
            format!("[X] Ship it [High] (Due: {})", due.format("%Y-%m-%d"))
        );

        let plain = make_item(2);
        assert_eq!(plain.to_string(), "[ ] Task 2");
    }
}
