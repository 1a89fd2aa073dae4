use std::fmt::Write as _;

use clap::Subcommand;
use mealplanner_listing::pick_default;
use mealplanner_shared::{Entity, FilterState, SortBy};

use super::Session;
use crate::Config;
use crate::error::AppError;
use crate::fixture::Fixture;

#[derive(Subcommand, Debug)]
pub enum GroceryCommand {
    /// Show the grocery-list switcher, marking the list opened by default
    List {
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        sort: Option<SortBy>,
    },
}

#[tracing::instrument(skip(config))]
pub async fn run(config: &Config, command: GroceryCommand) -> Result<String, AppError> {
    let GroceryCommand::List { search, sort } = command;
    let fixture = Fixture::load(&config.data.fixture)?;

    let filter =
        FilterState::search(search.unwrap_or_default()).with_sort(sort.unwrap_or_default());
    let session = Session::open(config, fixture.grocery_lists, filter).await?;
    let view = session.view.lock().await;

    let lists = view.filtered();
    let default = pick_default(&lists, &config.grocery.policy());

    let mut out = String::new();
    if lists.is_empty() {
        let _ = writeln!(out, "No grocery lists");
    }
    for list in &lists {
        let marker = if Some(list.id()) == default { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {:<12} {:<32} {:>4}",
            list.id().as_str(),
            list.name(),
            list.metric()
        );
    }

    Ok(out)
}
