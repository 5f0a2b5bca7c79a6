use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use pantryplan::Config;
use pantryplan::snapshot::{load_pantry, load_plan, load_recipes};
use pantryplan_mealplan::{WeekPlan, today};
use pantryplan_shared::pantry::{PantryItem, expiring_within};
use pantryplan_shared::parse_date;
use pantryplan_shared::recipe::Category;
use pantryplan_shopping::{
    RequiredIngredient, ShoppingEntry, Suggestions, aggregate_requirements, consolidate,
    group_by_category, resolve_against_pantry, suggest,
};
use serde::Serialize;

/// pantryplan - meal plans, pantry and shopping lists
#[derive(Parser)]
#[command(name = "pantryplan")]
#[command(about = "Reconcile meal plans with the pantry", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the days of the planning range
    Week {
        /// Any day of the week to show (defaults to today)
        #[arg(long)]
        anchor: Option<String>,
    },
    /// Print the shopping list for a plan as JSON
    Shopping {
        #[arg(long)]
        plan: PathBuf,
        #[arg(long)]
        recipes: PathBuf,
        #[arg(long)]
        pantry: PathBuf,
    },
    /// Print recipes ranked by what the pantry already covers as JSON
    Suggest {
        #[arg(long)]
        recipes: PathBuf,
        #[arg(long)]
        pantry: PathBuf,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShoppingReport {
    available: Vec<RequiredIngredient>,
    list: BTreeMap<Category, Vec<ShoppingLine>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShoppingLine {
    #[serde(flatten)]
    entry: ShoppingEntry,
    display_quantity: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestReport<'a> {
    #[serde(flatten)]
    suggestions: Suggestions,
    use_soon: Vec<&'a PantryItem>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow!(e))?;

    pantryplan::observability::init_observability(&config.logging)?;

    match cli.command {
        Commands::Week { anchor } => week_command(&config, anchor),
        Commands::Shopping {
            plan,
            recipes,
            pantry,
        } => shopping_command(plan, recipes, pantry),
        Commands::Suggest { recipes, pantry } => suggest_command(&config, recipes, pantry),
    }
}

#[tracing::instrument(skip(config))]
fn week_command(config: &Config, anchor: Option<String>) -> Result<()> {
    let anchor = match anchor {
        Some(raw) => parse_date(&raw).ok_or_else(|| anyhow!("Invalid anchor date '{raw}'"))?,
        None => today(&config.planner.timezone),
    };

    let plan = WeekPlan::new(anchor, config.planner.range);

    for row in plan.grid() {
        let weekday = parse_date(row.date)
            .map(|date| date.weekday().to_string())
            .unwrap_or_default();
        println!("{:>2}  {}  {}", row.index, row.date, weekday);
    }

    Ok(())
}

#[tracing::instrument]
fn shopping_command(plan: PathBuf, recipes: PathBuf, pantry: PathBuf) -> Result<()> {
    let plan = load_plan(&plan)?;
    let recipes = load_recipes(&recipes)?;
    let pantry = load_pantry(&pantry)?;

    let required = aggregate_requirements(plan.slots(), &recipes);
    let resolution = resolve_against_pantry(&required, &pantry);
    let entries = consolidate(&resolution.missing);

    tracing::info!(
        required = required.len(),
        available = resolution.available.len(),
        to_buy = entries.len(),
        "shopping list built"
    );

    let list = group_by_category(&entries)
        .into_iter()
        .map(|(category, entries)| {
            let lines = entries
                .into_iter()
                .map(|entry| ShoppingLine {
                    display_quantity: entry.display_quantity(),
                    entry,
                })
                .collect();
            (category, lines)
        })
        .collect();

    let report = ShoppingReport {
        available: resolution.available,
        list,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

#[tracing::instrument(skip(config))]
fn suggest_command(config: &Config, recipes: PathBuf, pantry: PathBuf) -> Result<()> {
    let recipes = load_recipes(&recipes)?;
    let mut pantry = load_pantry(&pantry)?;
    let today = today(&config.planner.timezone);

    pantry.retain(|item| !item.is_expired(today));

    let suggestions = suggest(
        &recipes,
        &pantry,
        config.suggestions.threshold,
        config.suggestions.limit,
    );

    let report = SuggestReport {
        suggestions,
        use_soon: expiring_within(&pantry, today, 3),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
