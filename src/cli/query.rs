//! Query commands (list, sorted views, due-date views, search, stats)

use anyhow::Result;
use clap::{Args, ValueEnum};

use super::item::resolve_category;
use super::render::{format_day, print_items};
use super::session::Session;
use crate::domain::{ItemFilter, Priority, TodoItem, TodoStatistics};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only completed items
    #[arg(long, conflicts_with = "pending")]
    pub completed: bool,

    /// Only pending items
    #[arg(long)]
    pub pending: bool,

    /// Only items with this priority
    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// Only items in this category (name or id)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Only items with a due date
    #[arg(long, conflicts_with = "no_deadline")]
    pub deadline: bool,

    /// Only items without a due date
    #[arg(long)]
    pub no_deadline: bool,
}

/// Ordering for the `sorted` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Most urgent first
    Priority,
    /// Earliest due date first, undated last
    Due,
}

fn print(session: &Session, items: &[&TodoItem], empty_message: &str) {
    print_items(
        &session.output,
        &session.manager,
        items,
        &session.config.date_format,
        empty_message,
    );
}

pub(super) fn list(session: &Session, args: &ListArgs) -> Result<()> {
    let mut filter = ItemFilter::new();
    if args.completed {
        filter = filter.completed(true);
    }
    if args.pending {
        filter = filter.completed(false);
    }
    if let Some(priority) = args.priority {
        filter = filter.priority(priority);
    }
    if let Some(key) = &args.category {
        filter.category = Some(resolve_category(&session.manager, key)?);
    }
    if args.deadline {
        filter = filter.has_deadline(true);
    }
    if args.no_deadline {
        filter = filter.has_deadline(false);
    }

    session
        .output
        .verbose_ctx("list", &format!("Filtering with {:?}", filter));
    let items = session.manager.filter_items(&filter);
    print(session, &items, "No items");
    Ok(())
}

pub(super) fn sorted(session: &Session, key: SortKey) -> Result<()> {
    let items = match key {
        SortKey::Priority => session.manager.get_items_sorted_by_priority(),
        SortKey::Due => session.manager.get_items_sorted_by_due_date(),
    };
    print(session, &items, "No items");
    Ok(())
}

pub(super) fn overdue(session: &Session) -> Result<()> {
    let items = session.manager.get_overdue_items();
    print(session, &items, "Nothing is overdue.");
    Ok(())
}

pub(super) fn due_today(session: &Session) -> Result<()> {
    let items = session.manager.get_items_due_today();
    print(session, &items, "Nothing is due today.");
    Ok(())
}

pub(super) fn within(session: &Session, days: i64) -> Result<()> {
    let items = session.manager.get_items_due_within_days(days)?;
    print(
        session,
        &items,
        &format!("Nothing is due within {} days.", days),
    );
    Ok(())
}

pub(super) fn urgent(session: &Session) -> Result<()> {
    let items = session.manager.get_urgent_items();
    print(session, &items, "No urgent items.");
    Ok(())
}

pub(super) fn search(session: &Session, term: &str) -> Result<()> {
    session
        .output
        .verbose_ctx("search", &format!("Searching for: {}", term));
    let items = session.manager.search_items(term);
    print(
        session,
        &items,
        &format!("No results found for '{}'", term),
    );
    Ok(())
}

/// Show statistics for the current list
pub(super) fn stats(session: &Session, days: Option<i64>) -> Result<()> {
    let days = days.unwrap_or(session.config.upcoming_days);
    let stats = TodoStatistics::new(&session.manager);

    let upcoming = stats.upcoming_deadlines(days)?;
    let summary = stats.summary();
    let priorities = stats.priority_breakdown();
    let categories = stats.category_breakdown();
    let average_hours = stats.average_completion_time();

    if session.output.is_json() {
        let upcoming_json: serde_json::Map<String, serde_json::Value> = upcoming
            .iter()
            .map(|(day, items)| {
                let ids: Vec<u32> = items.iter().map(|i| i.id().value()).collect();
                (day.to_string(), serde_json::json!(ids))
            })
            .collect();
        let priorities_json: serde_json::Map<String, serde_json::Value> = priorities
            .iter()
            .map(|(p, count)| (p.as_str().to_string(), serde_json::json!(count)))
            .collect();

        session.output.data(&serde_json::json!({
            "summary": summary,
            "priorities": priorities_json,
            "categories": categories,
            "upcoming": upcoming_json,
            "average_completion_hours": average_hours,
        }));
        return Ok(());
    }

    println!("Todo Statistics");
    println!("{}", "=".repeat(40));
    println!();
    println!("Items: {} total", summary.total_items);
    println!("  [x] Completed:   {}", summary.completed_items);
    println!("  [ ] Pending:     {}", summary.pending_items);
    println!("  [!] Overdue:     {}", summary.overdue_items);
    println!("  [*] Urgent:      {}", summary.urgent_items);
    println!("  Due today:       {}", summary.due_today);
    println!();
    println!("Completion rate: {}%", summary.completion_rate);
    if let Some(hours) = average_hours {
        println!("Average completion time: {} hours", hours);
    }

    println!();
    println!("By priority:");
    for (priority, count) in &priorities {
        println!("  {:<12} {}", priority.display_name(), count);
    }

    if !categories.is_empty() {
        println!();
        println!("By category ({} defined):", summary.categories_count);
        for (name, count) in &categories {
            println!("  {:<12} {}", name, count);
        }
    }

    let due_soon: Vec<_> = upcoming.iter().filter(|(_, items)| !items.is_empty()).collect();
    println!();
    if due_soon.is_empty() {
        println!("No deadlines in the next {} days.", days);
    } else {
        println!("Upcoming deadlines (next {} days):", days);
        for (day, items) in due_soon {
            let titles: Vec<_> = items.iter().map(|i| i.title()).collect();
            println!(
                "  {}  {}",
                format_day(*day, &session.config.date_format),
                titles.join(", ")
            );
        }
    }

    Ok(())
}
