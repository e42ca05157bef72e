//! Read-only statistics over a [`TodoListManager`]
//!
//! Nothing is cached: every call recomputes from the manager's current
//! state.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::error::TodoError;
use super::item::{today, TodoItem};
use super::manager::{days_from_today, TodoListManager};
use super::priority::Priority;

/// Breakdown key for items without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Default window for [`TodoStatistics::upcoming_deadlines`]
pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

/// Snapshot of the headline counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoSummary {
    pub total_items: usize,
    pub completed_items: usize,
    pub pending_items: usize,
    pub overdue_items: usize,
    pub urgent_items: usize,
    pub due_today: usize,
    pub completion_rate: f64,
    pub categories_count: usize,
}

impl fmt::Display for TodoSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {}, Completed: {} ({}%), Pending: {}, Overdue: {}",
            self.total_items,
            self.completed_items,
            self.completion_rate,
            self.pending_items,
            self.overdue_items
        )
    }
}

/// Analytical view borrowed from a manager
#[derive(Debug, Clone, Copy)]
pub struct TodoStatistics<'a> {
    manager: &'a TodoListManager,
}

impl<'a> TodoStatistics<'a> {
    pub fn new(manager: &'a TodoListManager) -> Self {
        Self { manager }
    }

    pub fn total_items(&self) -> usize {
        self.manager.total_count()
    }

    pub fn completed_items(&self) -> usize {
        self.manager.get_completed_items().len()
    }

    pub fn pending_items(&self) -> usize {
        self.manager.get_pending_items().len()
    }

    pub fn overdue_items(&self) -> usize {
        self.manager.get_overdue_items().len()
    }

    pub fn urgent_items(&self) -> usize {
        self.manager.get_urgent_items().len()
    }

    /// Percentage of completed items, 2 decimals; 0 for an empty list
    pub fn completion_rate(&self) -> f64 {
        let total = self.total_items();
        if total == 0 {
            return 0.0;
        }
        round2(self.completed_items() as f64 / total as f64 * 100.0)
    }

    /// Item count for every priority, zero counts included
    pub fn priority_breakdown(&self) -> BTreeMap<Priority, usize> {
        let mut breakdown: BTreeMap<Priority, usize> =
            Priority::ALL.into_iter().map(|p| (p, 0)).collect();
        for item in self.manager.all_items() {
            *breakdown.entry(item.priority()).or_insert(0) += 1;
        }
        breakdown
    }

    /// Item count per category name; empty groups are left out
    ///
    /// Items without a category are counted under [`UNCATEGORIZED`].
    pub fn category_breakdown(&self) -> BTreeMap<String, usize> {
        let mut breakdown = BTreeMap::new();

        let uncategorized = self.manager.get_uncategorized_items().len();
        if uncategorized > 0 {
            breakdown.insert(UNCATEGORIZED.to_string(), uncategorized);
        }

        for category in self.manager.all_categories() {
            let count = self.manager.get_items_by_category(category).len();
            if count > 0 {
                breakdown.insert(category.name().to_string(), count);
            }
        }

        breakdown
    }

    /// Pending items grouped by due date for each day in `[today, today + days]`
    ///
    /// Every day in the window is present, even with no items.
    pub fn upcoming_deadlines(
        &self,
        days: i64,
    ) -> Result<BTreeMap<NaiveDate, Vec<&'a TodoItem>>, TodoError> {
        let last = days_from_today(days)?;
        let mut result: BTreeMap<NaiveDate, Vec<&'a TodoItem>> = today()
            .iter_days()
            .take_while(|day| *day <= last)
            .map(|day| (day, Vec::new()))
            .collect();

        for item in self.manager.get_pending_items() {
            if let Some(bucket) = item.due_day().and_then(|day| result.get_mut(&day)) {
                bucket.push(item);
            }
        }

        Ok(result)
    }

    /// Mean hours from creation to completion, 2 decimals
    ///
    /// `None` when nothing has been completed.
    pub fn average_completion_time(&self) -> Option<f64> {
        let durations: Vec<f64> = self
            .manager
            .get_completed_items()
            .into_iter()
            .filter_map(|item| {
                item.completed_at()
                    .map(|done| (done - item.created_at()).num_milliseconds() as f64 / 3_600_000.0)
            })
            .collect();

        if durations.is_empty() {
            return None;
        }
        Some(round2(durations.iter().sum::<f64>() / durations.len() as f64))
    }

    pub fn summary(&self) -> TodoSummary {
        TodoSummary {
            total_items: self.total_items(),
            completed_items: self.completed_items(),
            pending_items: self.pending_items(),
            overdue_items: self.overdue_items(),
            urgent_items: self.urgent_items(),
            due_today: self.manager.get_items_due_today().len(),
            completion_rate: self.completion_rate(),
            categories_count: self.manager.all_categories().len(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
