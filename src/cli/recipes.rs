use std::fmt::Write as _;

use clap::{Args, Subcommand};
use mealplanner_shared::{
    DietaryTag, Entity, EntityId, FilterState, MealType, NumericField, NumericRange, Recipe,
    SortBy,
};

use super::{Session, page_footer};
use crate::Config;
use crate::error::AppError;
use crate::fixture::Fixture;

#[derive(Subcommand, Debug)]
pub enum RecipeCommand {
    /// Show one page of the filtered recipe grid
    List(ListArgs),
    /// Approve the selected recipes, or unapprove them when all are approved
    Approve(ApproveArgs),
    /// Flip the approval of a single recipe
    Toggle {
        /// Recipe id
        id: String,
    },
    /// Delete the given recipes
    Delete {
        /// Comma separated recipe ids
        #[arg(long, required = true, value_delimiter = ',')]
        ids: Vec<String>,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Case-insensitive substring of the recipe name
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub meal_type: Option<MealType>,

    #[arg(long)]
    pub tag: Option<DietaryTag>,

    /// Numeric range as `field=min..max`, either bound may be omitted
    #[arg(long = "range", value_parser = parse_range)]
    pub ranges: Vec<(NumericField, NumericRange)>,

    #[arg(long)]
    pub sort: Option<SortBy>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

impl ListArgs {
    pub fn filter(&self) -> FilterState {
        let mut filter = FilterState::search(self.search.clone().unwrap_or_default())
            .with_sort(self.sort.unwrap_or_default());
        filter.meal_type = self.meal_type;
        filter.dietary_tag = self.tag;
        for (field, range) in &self.ranges {
            filter = filter.with_range(*field, *range);
        }
        filter
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct ApproveArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Comma separated ids to select; the whole visible page when omitted
    #[arg(long, value_delimiter = ',')]
    pub ids: Vec<String>,
}

#[tracing::instrument(skip(config))]
pub async fn run(config: &Config, command: RecipeCommand) -> Result<String, AppError> {
    let path = &config.data.fixture;
    let mut fixture = Fixture::load(path)?;

    let (session, outcome) = match command {
        RecipeCommand::List(args) => {
            let session = Session::open(config, fixture.recipes, args.filter()).await?;
            let mut view = session.view.lock().await;
            view.set_page(args.page);

            let mut out = String::new();
            let page = view.page();
            for recipe in &page.items {
                render_row(recipe, &mut out);
            }
            page_footer(&page, &mut out);
            return Ok(out);
        }
        RecipeCommand::Approve(args) => {
            let session = Session::open(config, fixture.recipes, args.list.filter()).await?;
            select(&session, args.list.page, &args.ids).await?;
            let outcome = session.coordinator.bulk_approve(&session.view.handle()).await;
            (session, outcome)
        }
        RecipeCommand::Toggle { id } => {
            let session = Session::open(config, fixture.recipes, FilterState::default()).await?;
            let id = EntityId::new(id);
            if session.view.lock().await.store().get(&id).is_none() {
                return Err(AppError::UnknownId(id));
            }
            let outcome = session
                .coordinator
                .toggle_approval(&session.view.handle(), &id)
                .await;
            (session, outcome)
        }
        RecipeCommand::Delete { ids } => {
            let session = Session::open(config, fixture.recipes, FilterState::default()).await?;
            select(&session, 1, &ids).await?;
            let outcome = session.coordinator.bulk_delete(&session.view.handle()).await;
            (session, outcome)
        }
    };

    let mut out = String::new();
    if outcome.is_none() {
        let _ = writeln!(out, "Nothing to do");
        return Ok(out);
    }

    fixture.recipes = session.snapshot().await;
    fixture.save(path)?;

    session.notifications(&mut out);
    Ok(out)
}

/// Select `ids`, or the visible page when none are given.
async fn select(session: &Session<Recipe>, page: usize, ids: &[String]) -> Result<(), AppError> {
    let mut view = session.view.lock().await;
    view.set_page(page);

    if ids.is_empty() {
        view.select_all_visible();
        return Ok(());
    }

    for id in ids {
        let id = EntityId::new(id.trim());
        if !view.toggle(&id, true) {
            return Err(AppError::UnknownId(id));
        }
    }
    Ok(())
}

fn render_row(recipe: &Recipe, out: &mut String) {
    let status = if recipe.is_approved() {
        "approved"
    } else {
        "pending"
    };
    let _ = writeln!(
        out,
        "{:<12} {:<32} {:>4} {}",
        recipe.id().as_str(),
        recipe.name(),
        recipe.metric(),
        status
    );
}

fn parse_range(raw: &str) -> Result<(NumericField, NumericRange), String> {
    let (field, bounds) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `field=min..max`, got `{raw}`"))?;
    let field = field
        .trim()
        .parse::<NumericField>()
        .map_err(|_| format!("unknown numeric field `{}`", field.trim()))?;
    let (min, max) = bounds
        .split_once("..")
        .ok_or_else(|| format!("expected `min..max`, got `{bounds}`"))?;

    let bound = |s: &str| -> Result<Option<f64>, String> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        s.parse::<f64>()
            .map(Some)
            .map_err(|e| format!("invalid bound `{s}`: {e}"))
    };

    Ok((
        field,
        NumericRange {
            min: bound(min)?,
            max: bound(max)?,
        },
    ))
}
