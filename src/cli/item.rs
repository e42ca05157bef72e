//! Item commands

use anyhow::{Context, Result};
use chrono::{DateTime, Days, NaiveDate, Utc};
use clap::Args;

use super::render::{format_date, print_item_details};
use super::session::Session;
use crate::domain::{today, validate_due_date, CategoryId, ItemId, Priority, TodoListManager};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Item title
    pub title: String,

    /// Free-text description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Priority (none, low, medium, high, critical or 0-4)
    #[arg(long, short = 'p', default_value = "none")]
    pub priority: Priority,

    /// Due date (YYYY-MM-DD, today, tomorrow, +N or RFC 3339)
    #[arg(long)]
    pub due: Option<String>,

    /// Category name or id
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

/// Parses a due date argument; `none` means "no due date"
///
/// Bare dates and keywords resolve to the last second of that day (UTC).
pub(super) fn parse_due(input: &str) -> Result<Option<DateTime<Utc>>> {
    let input = input.trim();
    let lowered = input.to_ascii_lowercase();

    let day = match lowered.as_str() {
        "none" => return Ok(None),
        "today" => Some(today()),
        "tomorrow" => today().succ_opt(),
        s if s.starts_with('+') => {
            let days: u64 = s[1..]
                .parse()
                .with_context(|| format!("Invalid day offset '{}'", input))?;
            today().checked_add_days(Days::new(days))
        }
        s => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
    };

    if let Some(end) = day.and_then(|d| d.and_hms_opt(23, 59, 59)) {
        return Ok(Some(end.and_utc()));
    }

    DateTime::parse_from_rfc3339(input)
        .map(|d| Some(d.with_timezone(&Utc)))
        .with_context(|| {
            format!(
                "Invalid due date '{}': expected YYYY-MM-DD, today, tomorrow, +N or RFC 3339",
                input
            )
        })
}

/// Finds a category by name (case-insensitive) or by id
pub(super) fn resolve_category(manager: &TodoListManager, key: &str) -> Result<CategoryId> {
    if let Some(category) = manager.get_category_by_name(key) {
        return Ok(category.id());
    }
    key.parse::<CategoryId>()
        .ok()
        .and_then(|id| manager.get_category(id))
        .map(|c| c.id())
        .ok_or_else(|| anyhow::anyhow!("Category not found: {}", key))
}

pub(super) fn add(session: &mut Session, args: AddArgs) -> Result<()> {
    // Check everything up front so a bad argument leaves the list untouched
    let due = match args.due.as_deref() {
        Some(raw) => parse_due(raw)?,
        None => None,
    };
    if let Some(due) = due {
        validate_due_date(due)?;
    }
    let category = args
        .category
        .as_deref()
        .map(|key| resolve_category(&session.manager, key))
        .transpose()?;

    let id = session
        .manager
        .add_item(args.title, args.description, args.priority)?
        .id();

    if let Some(item) = session.manager.get_item_mut(id) {
        item.set_due_date(due)?;
    }
    if category.is_some() {
        session.manager.assign_category(id, category)?;
    }

    let item = session.require_item(id)?;
    if session.output.is_json() {
        session.output.data(&serde_json::json!({
            "id": item.id().value(),
            "title": item.title(),
            "priority": item.priority(),
        }));
    } else {
        session
            .output
            .success(&format!("Created item {}: {}", item.id(), item.title()));
    }

    Ok(())
}

pub(super) fn remove(session: &mut Session, id: ItemId) -> Result<()> {
    if !session.manager.remove_item(id) {
        anyhow::bail!("Item not found: {}", id);
    }
    session.output.success(&format!("Removed item {}", id));
    Ok(())
}

pub(super) fn show(session: &Session, id: ItemId) -> Result<()> {
    let item = session.require_item(id)?;
    print_item_details(
        &session.output,
        &session.manager,
        item,
        &session.config.date_format,
    );
    Ok(())
}

pub(super) fn complete(session: &mut Session, id: ItemId) -> Result<()> {
    if !session.manager.complete_item(id) {
        anyhow::bail!("Item not found: {}", id);
    }

    let item = session.require_item(id)?;
    if session.output.is_json() {
        session.output.data(&serde_json::json!({
            "id": item.id().value(),
            "completed": item.is_completed(),
            "completed_at": item.completed_at(),
        }));
    } else {
        session
            .output
            .success(&format!("Completed item {}", item.id()));
    }
    Ok(())
}

pub(super) fn reopen(session: &mut Session, id: ItemId) -> Result<()> {
    if !session.manager.uncomplete_item(id) {
        anyhow::bail!("Item not found: {}", id);
    }
    session.output.success(&format!("Reopened item {}", id));
    Ok(())
}

pub(super) fn rename(session: &mut Session, id: ItemId, title: String) -> Result<()> {
    session.require_item_mut(id)?.update_title(title)?;
    session.output.success(&format!("Renamed item {}", id));
    Ok(())
}

pub(super) fn describe(session: &mut Session, id: ItemId, text: String) -> Result<()> {
    session.require_item_mut(id)?.set_description(text);
    session
        .output
        .success(&format!("Updated description of item {}", id));
    Ok(())
}

pub(super) fn set_priority(session: &mut Session, id: ItemId, priority: Priority) -> Result<()> {
    session.require_item_mut(id)?.set_priority(priority);
    session.output.success(&format!(
        "Set priority of item {} to {}",
        id,
        priority.display_name()
    ));
    Ok(())
}

pub(super) fn set_due(session: &mut Session, id: ItemId, raw: &str) -> Result<()> {
    let due = parse_due(raw)?;
    let item = session.require_item_mut(id)?;

    match due {
        Some(due) => {
            item.set_due_date(Some(due))?;
            let message = format!(
                "Item {} is due {}",
                id,
                format_date(due, &session.config.date_format)
            );
            session.output.success(&message);
        }
        None => {
            item.clear_due_date();
            session
                .output
                .success(&format!("Cleared due date of item {}", id));
        }
    }
    Ok(())
}

pub(super) fn assign(session: &mut Session, id: ItemId, key: &str) -> Result<()> {
    let category = if key.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(resolve_category(&session.manager, key)?)
    };

    if !session.manager.assign_category(id, category)? {
        anyhow::bail!("Item not found: {}", id);
    }

    match category.and_then(|cid| session.manager.get_category(cid)) {
        Some(c) => session
            .output
            .success(&format!("Item {} is now in {}", id, c.name())),
        None => session
            .output
            .success(&format!("Item {} is now uncategorized", id)),
    }
    Ok(())
}
