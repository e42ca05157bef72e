//! Category commands

use anyhow::Result;
use clap::Subcommand;

use super::item::resolve_category;
use super::render::{category_json, print_items};
use super::session::Session;

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Create a category
    Add {
        /// Category name (unique, case-insensitive)
        name: String,

        /// Free-text description
        #[arg(long, short = 'd', default_value = "")]
        description: String,

        /// Hex color (#RGB or #RRGGBB); invalid values fall back to gray
        #[arg(long)]
        color: Option<String>,
    },

    /// Remove a category; its items become uncategorized
    Remove {
        /// Category name or id
        category: String,
    },

    /// Rename a category
    Rename {
        /// Category name or id
        category: String,

        /// New name
        name: String,
    },

    /// List categories
    List,

    /// Show the items in a category
    Show {
        /// Category name or id
        category: String,
    },
}

pub(super) fn run(session: &mut Session, cmd: CategoryCommands) -> Result<()> {
    match cmd {
        CategoryCommands::Add {
            name,
            description,
            color,
        } => add(session, name, description, color),
        CategoryCommands::Remove { category } => remove(session, &category),
        CategoryCommands::Rename { category, name } => rename(session, &category, name),
        CategoryCommands::List => list(session),
        CategoryCommands::Show { category } => show(session, &category),
    }
}

fn add(
    session: &mut Session,
    name: String,
    description: String,
    color: Option<String>,
) -> Result<()> {
    let color = color.unwrap_or_else(|| session.config.default_color.clone());
    let id = session.manager.add_category(name, description, &color)?.id();
    let Some(category) = session.manager.get_category(id) else {
        anyhow::bail!("Category not found: {}", id);
    };

    if category.color() != color {
        session.output.verbose_ctx(
            "category",
            &format!("Color '{}' is not a hex color, using {}", color, category.color()),
        );
    }

    if session.output.is_json() {
        session
            .output
            .data(&category_json(&session.manager, category));
    } else {
        session.output.success(&format!(
            "Created category {}: {}",
            category.id(),
            category.name()
        ));
    }
    Ok(())
}

fn remove(session: &mut Session, key: &str) -> Result<()> {
    let id = resolve_category(&session.manager, key)?;
    let name = session
        .manager
        .get_category(id)
        .map(|c| c.name().to_string())
        .unwrap_or_default();
    let detached = session
        .manager
        .all_items()
        .iter()
        .filter(|i| i.in_category(id))
        .count();

    session.manager.remove_category(id);
    session.output.success(&format!(
        "Removed category {} ({} items now uncategorized)",
        name, detached
    ));
    Ok(())
}

fn rename(session: &mut Session, key: &str, name: String) -> Result<()> {
    let id = resolve_category(&session.manager, key)?;
    session.manager.rename_category(id, name.clone())?;
    session
        .output
        .success(&format!("Renamed category {} to {}", id, name));
    Ok(())
}

fn list(session: &Session) -> Result<()> {
    let categories = session.manager.all_categories();

    if session.output.is_json() {
        let values: Vec<_> = categories
            .iter()
            .map(|c| category_json(&session.manager, c))
            .collect();
        session.output.data(&values);
    } else if categories.is_empty() {
        println!("No categories");
    } else {
        println!("{:<6} {:<20} {:<9} {:<6} DESCRIPTION", "ID", "NAME", "COLOR", "ITEMS");
        println!("{}", "-".repeat(60));
        for category in categories {
            println!(
                "{:<6} {:<20} {:<9} {:<6} {}",
                category.id(),
                category.name(),
                category.color(),
                session.manager.get_items_by_category(category).len(),
                category.description()
            );
        }
    }
    Ok(())
}

fn show(session: &Session, key: &str) -> Result<()> {
    let id = resolve_category(&session.manager, key)?;
    let Some(category) = session.manager.get_category(id) else {
        anyhow::bail!("Category not found: {}", key);
    };

    let items = session.manager.get_items_by_category(category);
    if !session.output.is_json() {
        println!("{} {}", category, category.color());
        if !category.description().is_empty() {
            println!("{}", category.description());
        }
        println!();
    }
    print_items(
        &session.output,
        &session.manager,
        &items,
        &session.config.date_format,
        "No items in this category",
    );
    Ok(())
}
