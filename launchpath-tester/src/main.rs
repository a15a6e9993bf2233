mod numbers;
mod policy;
mod reports;
mod simulation;

use anyhow::{Context, Result, bail};
use clap::Parser;
use launchpath_game::{CampaignConfig, CollapseBound, Metrics, canonical};

use policy::GameplayStrategy;
use simulation::{Aggregate, RunSummary, SimulationConfig, aggregate_runs, run_campaign};

#[derive(Debug, Parser)]
#[command(name = "launchpath-tester", version)]
#[command(about = "Balance simulation for the LaunchPath campaign quiz")]
struct Args {
    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Iterations per strategy and seed
    #[arg(long, default_value_t = 100)]
    iterations: u64,

    /// Strategies to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    strategies: String,

    /// Override the starting budget meter
    #[arg(long)]
    start_budget: Option<i32>,

    /// Override the starting audience meter
    #[arg(long)]
    start_audience: Option<i32>,

    /// Override the starting satisfaction meter
    #[arg(long)]
    start_satisfaction: Option<i32>,

    /// Override the starting technology meter
    #[arg(long)]
    start_technology: Option<i32>,

    /// Use the lenient collapse bound (meters may sit at zero)
    #[arg(long)]
    lenient: bool,

    /// Number of opening cards exempt from collapse checks
    #[arg(long, default_value_t = 0)]
    grace: u8,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,
}

fn split_csv(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

fn parse_strategies(input: &str) -> Result<Vec<GameplayStrategy>> {
    if input.trim() == "all" {
        return Ok(GameplayStrategy::ALL.to_vec());
    }
    split_csv(input)
        .into_iter()
        .map(|label| {
            label
                .parse::<GameplayStrategy>()
                .map_err(|()| anyhow::anyhow!("unknown strategy '{label}'"))
        })
        .collect()
}

fn parse_seeds(input: &str) -> Result<Vec<u64>> {
    let seeds = split_csv(input)
        .into_iter()
        .map(|seed| {
            seed.parse::<u64>()
                .with_context(|| format!("invalid seed '{seed}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    if seeds.is_empty() {
        bail!("no seeds given");
    }
    Ok(seeds)
}

fn build_campaign_config(args: &Args) -> CampaignConfig {
    let mut start = Metrics::default();
    if let Some(budget) = args.start_budget {
        start.budget = budget;
    }
    if let Some(audience) = args.start_audience {
        start.audience = audience;
    }
    if let Some(satisfaction) = args.start_satisfaction {
        start.satisfaction = satisfaction;
    }
    if let Some(technology) = args.start_technology {
        start.technology = technology;
    }
    CampaignConfig {
        start,
        bound: if args.lenient {
            CollapseBound::Below
        } else {
            CollapseBound::AtOrBelow
        },
        grace_steps: args.grace,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let strategies = parse_strategies(&args.strategies)?;
    let seeds = parse_seeds(&args.seeds)?;
    let campaign = build_campaign_config(&args);
    let deck = canonical();

    log::info!(
        "sweeping {} strategies x {} seeds x {} iterations",
        strategies.len(),
        seeds.len(),
        args.iterations
    );

    let mut aggregates: Vec<Aggregate> = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        let mut runs: Vec<RunSummary> = Vec::new();
        for &seed in &seeds {
            for offset in 0..args.iterations {
                let config = SimulationConfig::new(strategy, seed.wrapping_add(offset))
                    .with_campaign(campaign);
                runs.push(run_campaign(deck, &config)?);
            }
        }
        log::debug!("strategy {strategy}: {} runs finished", runs.len());
        aggregates.push(aggregate_runs(strategy, &runs));
    }

    match args.report.as_str() {
        "json" => println!("{}", reports::to_json(&aggregates)?),
        _ => reports::print_console(&aggregates),
    }
    Ok(())
}
