//! Matchday CLI
//!
//! Run a single live match or a batch of seeded runs from a JSON request.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::path::{Path, PathBuf};

use matchday_core::engine::SimulationConfig;
use matchday_core::models::{EventKind, MatchEvent};
use matchday_core::{simulate_batch, simulate_match, MatchRequest, MatchResponse};

#[derive(Parser)]
#[command(name = "matchday")]
#[command(about = "Minute-by-minute football match simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match and print its timeline
    Simulate {
        /// Match request JSON file
        #[arg(long)]
        request: PathBuf,

        /// Simulation config YAML file (overrides the request's config)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed override
        #[arg(long)]
        seed: Option<u64>,

        /// Print the full response as JSON instead of a timeline
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Play many seeded runs of one request and print averages
    Batch {
        /// Match request JSON file
        #[arg(long)]
        request: PathBuf,

        #[arg(long, default_value = "100")]
        runs: u32,

        /// Simulation config YAML file (overrides the request's config)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_request(path: &Path, config: Option<&Path>) -> Result<MatchRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading request {}", path.display()))?;
    let mut request: MatchRequest = serde_json::from_str(&raw)
        .with_context(|| format!("parsing request {}", path.display()))?;

    if let Some(config_path) = config {
        let yaml = std::fs::read_to_string(config_path)
            .with_context(|| format!("reading config {}", config_path.display()))?;
        let config = SimulationConfig::from_yaml(&yaml)
            .with_context(|| format!("parsing config {}", config_path.display()))?;
        request.config = Some(config);
    }
    Ok(request)
}

fn event_marker(event: &MatchEvent) -> &'static str {
    match event.kind {
        EventKind::Goal => "GOAL",
        EventKind::YellowCard => "YC",
        EventKind::RedCard => "RC",
        EventKind::Substitution => "SUB",
        EventKind::Injury => "INJ",
        EventKind::BigChance => "!",
        EventKind::AddedTime => "+",
        EventKind::Miss | EventKind::Save | EventKind::Corner | EventKind::Foul => "",
    }
}

fn print_timeline(response: &MatchResponse) {
    let (home, away) = (&response.home_team, &response.away_team);
    println!(
        "{} {} - {} {}",
        home.name, response.result.home_score, response.result.away_score, away.name
    );
    println!();

    for event in &response.events {
        let minute = event.at().to_string();
        let side = match event.team_id.as_deref() {
            Some(id) if id == home.id => home.short_name.as_str(),
            Some(_) => away.short_name.as_str(),
            None => "",
        };
        println!("{:>7} {:<4} {:<4} {}", minute, side, event_marker(event), event.description);
    }

    let (h, a) = (&response.stats.home, &response.stats.away);
    println!();
    println!("{:<14}{:>8}{:>8}", "", home.short_name, away.short_name);
    println!(
        "{:<14}{:>7.1}%{:>7.1}%",
        "Possession",
        response.stats.home_possession(),
        response.stats.away_possession()
    );
    println!("{:<14}{:>8}{:>8}", "Shots", h.shots, a.shots);
    println!("{:<14}{:>8}{:>8}", "On target", h.on_target, a.on_target);
    println!("{:<14}{:>8.2}{:>8.2}", "xG", h.xg, a.xg);
    println!("{:<14}{:>8}{:>8}", "Corners", h.corners, a.corners);
    println!("{:<14}{:>8}{:>8}", "Fouls", h.fouls, a.fouls);
    println!("{:<14}{:>8}{:>8}", "Yellow cards", h.yellows, a.yellows);
    println!("{:<14}{:>8}{:>8}", "Red cards", h.reds, a.reds);

    if !response.background.is_empty() {
        println!();
        println!("Elsewhere:");
        for fixture in &response.background {
            let result = fixture.live_result();
            println!(
                "  {} {} - {} {}",
                fixture.home_team_id, result.home_score, result.away_score, fixture.away_team_id
            );
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { request, config, seed, json } => {
            let mut req = load_request(&request, config.as_deref())?;
            if let Some(seed) = seed {
                req.seed = seed;
            }
            info!("Simulating {} v {} (seed {})", req.home_team.name, req.away_team.name, req.seed);

            let response = simulate_match(&req).context("simulation failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_timeline(&response);
            }
        }

        Commands::Batch { request, runs, config } => {
            let req = load_request(&request, config.as_deref())?;
            info!("Running {} simulations of {} v {}", runs, req.home_team.name, req.away_team.name);

            let summary = simulate_batch(&req, runs).context("batch simulation failed")?;
            println!("Runs:        {}", summary.runs);
            println!(
                "Results:     {}W {}D {}L (home perspective)",
                summary.home_wins, summary.draws, summary.away_wins
            );
            println!("Goals:       {:.2} - {:.2}", summary.avg_home_goals, summary.avg_away_goals);
            println!("Possession:  {:.1}%", summary.avg_home_possession);
            println!("Shots:       {:.1} - {:.1}", summary.avg_home_shots, summary.avg_away_shots);
            println!("xG:          {:.2} - {:.2}", summary.avg_home_xg, summary.avg_away_xg);
        }
    }

    Ok(())
}
