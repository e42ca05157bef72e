//! Shared rendering of items and categories

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::{json, Value};

use super::output::Output;
use crate::domain::{TodoCategory, TodoItem, TodoListManager};

/// Name of the item's category, if it still exists
pub(super) fn category_name<'a>(manager: &'a TodoListManager, item: &TodoItem) -> Option<&'a str> {
    item.category()
        .and_then(|id| manager.get_category(id))
        .map(|c| c.name())
}

pub(super) fn item_json(manager: &TodoListManager, item: &TodoItem) -> Value {
    json!({
        "id": item.id().value(),
        "title": item.title(),
        "description": item.description(),
        "priority": item.priority(),
        "completed": item.is_completed(),
        "due_date": item.due_date(),
        "days_until_due": item.days_until_due(),
        "overdue": item.is_overdue(),
        "category": category_name(manager, item),
        "created_at": item.created_at(),
        "completed_at": item.completed_at(),
    })
}

pub(super) fn category_json(manager: &TodoListManager, category: &TodoCategory) -> Value {
    json!({
        "id": category.id().value(),
        "name": category.name(),
        "description": category.description(),
        "color": category.color(),
        "items": manager.get_items_by_category(category).len(),
        "created_at": category.created_at(),
    })
}

pub(super) fn format_date(date: DateTime<Utc>, date_format: &str) -> String {
    date.format(date_format).to_string()
}

/// Formats a calendar day as midnight UTC so time fields in the pattern stay valid
pub(super) fn format_day(day: NaiveDate, date_format: &str) -> String {
    format_date(day.and_time(NaiveTime::default()).and_utc(), date_format)
}

fn status_label(item: &TodoItem) -> &'static str {
    if item.is_completed() {
        "done"
    } else if item.is_overdue() {
        "overdue"
    } else {
        "todo"
    }
}

/// Prints a list of items as a table (text) or an array (JSON)
pub(super) fn print_items(
    output: &Output,
    manager: &TodoListManager,
    items: &[&TodoItem],
    date_format: &str,
    empty_message: &str,
) {
    if output.is_json() {
        let values: Vec<_> = items.iter().map(|i| item_json(manager, i)).collect();
        output.data(&values);
        return;
    }

    if items.is_empty() {
        println!("{}", empty_message);
        return;
    }

    println!(
        "{:<6} {:<8} {:<12} {:<12} {:<14} TITLE",
        "ID", "STATUS", "PRIORITY", "DUE", "CATEGORY"
    );
    println!("{}", "-".repeat(72));
    for item in items {
        let due = item
            .due_date()
            .map(|d| format_date(d, date_format))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:<8} {:<12} {:<12} {:<14} {}",
            item.id(),
            status_label(item),
            item.priority().display_name(),
            due,
            category_name(manager, item).unwrap_or("-"),
            item.title()
        );
    }
}

/// Prints the full details of one item
pub(super) fn print_item_details(
    output: &Output,
    manager: &TodoListManager,
    item: &TodoItem,
    date_format: &str,
) {
    if output.is_json() {
        output.data(&item_json(manager, item));
        return;
    }

    println!("Item: {}", item.id());
    println!("Title: {}", item.title());
    println!("Status: {}", status_label(item));
    println!("Priority: {}", item.priority());
    if let Some(name) = category_name(manager, item) {
        println!("Category: {}", name);
    }
    println!("Created: {}", item.created_at().format("%Y-%m-%d %H:%M"));
    if let Some(completed) = item.completed_at() {
        println!("Completed: {}", completed.format("%Y-%m-%d %H:%M"));
    }
    if let (Some(due), Some(days)) = (item.due_date(), item.days_until_due()) {
        println!("Due: {} ({} days)", format_date(due, date_format), days);
    }
    if !item.description().is_empty() {
        println!("\nDescription:");
        println!("{}", item.description());
    }
}
