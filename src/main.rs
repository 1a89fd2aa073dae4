use anyhow::Result;
use clap::{Parser, Subcommand};
use mealplanner::{AppError, Config};
use mealplanner::cli::{grocery::GroceryCommand, recipes::RecipeCommand};

/// mealplanner - recipe and grocery list administration
#[derive(Parser)]
#[command(name = "mealplanner")]
#[command(about = "Filter, page and bulk-edit recipes and grocery lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse, approve and delete recipes
    #[command(subcommand)]
    Recipes(RecipeCommand),
    /// Browse grocery lists
    #[command(subcommand)]
    Grocery(GroceryCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match load_config(cli.config.clone()) {
        Ok(config) => config,
        Err(err) => fail(err),
    };

    mealplanner::observability::init_observability(
        "mealplanner",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.observability.json,
    )?;

    let result = match cli.command {
        Commands::Recipes(command) => mealplanner::cli::recipes::run(&config, command).await,
        Commands::Grocery(command) => mealplanner::cli::grocery::run(&config, command).await,
    };

    match result {
        Ok(output) => {
            print!("{output}");
            Ok(())
        }
        Err(err) => {
            tracing::error!(%err, "command failed");
            fail(err)
        }
    }
}

fn load_config(path: Option<String>) -> Result<Config, AppError> {
    let config = Config::load(path)?;
    config.validate().map_err(AppError::ValidationError)?;
    Ok(config)
}

fn fail(err: AppError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(err.exit_code());
}
