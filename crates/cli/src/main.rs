//! `larder` binary: plan the next replenishment horizon from CSV/JSON
//! tables and print the console report.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use larder_cli::{load, render};
use larder_core::{PlanningPolicy, StaggerProfile};
use larder_core::policy::{DEFAULT_LEAD_TIME_DAYS, DEFAULT_RECURRENCE_DAYS};
use larder_engine::{PlanningInputs, PlanningPipeline};

#[derive(Parser)]
#[command(name = "larder")]
#[command(author, version, about = "Fixed-horizon ingredient replenishment planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan one horizon and print the report
    Plan(PlanArgs),
}

#[derive(Args)]
struct PlanArgs {
    /// Recipe mapping JSON ({food: [[ingredient, "90g"], ...]})
    #[arg(long)]
    recipes: PathBuf,

    /// Purchase ledger CSV; repeat the flag for multiple statement files
    #[arg(long = "bank", required = true)]
    bank: Vec<PathBuf>,

    /// POS sales CSV
    #[arg(long)]
    sales: PathBuf,

    /// Historical demand forecast CSV, used only when there are no recent
    /// sales
    #[arg(long)]
    forecast: Option<PathBuf>,

    /// First day of the planning horizon (YYYY-MM-DD)
    #[arg(long)]
    start_date: NaiveDate,

    /// Days between placing an order and its delivery
    #[arg(long, default_value_t = DEFAULT_LEAD_TIME_DAYS)]
    lead_time_days: i64,

    /// Horizon length in days
    #[arg(long, default_value_t = DEFAULT_RECURRENCE_DAYS)]
    horizon_days: u32,

    /// Stagger starting inventory to spread stockout dates (demo output)
    #[arg(long)]
    stagger: bool,
}

fn main() {
    larder_observability::init();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        tracing::error!("planning failed: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Plan(args) => plan(args),
    }
}

fn plan(args: PlanArgs) -> anyhow::Result<()> {
    let recipes = load::load_recipes(&args.recipes)
        .with_context(|| format!("loading recipes from {}", args.recipes.display()))?;

    let mut transactions = Vec::new();
    for path in &args.bank {
        transactions.extend(
            load::load_transactions(path)
                .with_context(|| format!("loading purchase ledger from {}", path.display()))?,
        );
    }

    let sales = load::load_sales(&args.sales)
        .with_context(|| format!("loading sales from {}", args.sales.display()))?;

    let historical_forecast = match &args.forecast {
        Some(path) => load::load_historical_forecast(path)
            .with_context(|| format!("loading forecast from {}", path.display()))?,
        None => Vec::new(),
    };

    let mut policy = PlanningPolicy::default()
        .with_lead_time_days(args.lead_time_days)
        .with_recurrence_days(args.horizon_days);
    if args.stagger {
        policy = policy.with_inventory_stagger(StaggerProfile::default());
    }

    let inputs = PlanningInputs {
        recipes,
        transactions,
        sales,
        historical_forecast,
    };
    let planned = PlanningPipeline::new(policy).run(args.start_date, &inputs)?;

    print!("{}", render::render_plan(&planned));
    Ok(())
}
