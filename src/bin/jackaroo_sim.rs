//! Headless simulator: plays AI-only games and reports team results.

use clap::Parser;
use jackaroo::{strategy, GameConfig, GameEngine, GameSummary, Strategy, TeamId};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "jackaroo-sim")]
#[command(about = "Play AI-only games and report win rates")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Strategy for every seat (overrides the per-seat options)
    #[arg(long, conflicts_with_all = ["seat0", "seat1", "seat2", "seat3"])]
    seats: Option<String>,

    /// Strategy for seat 0
    #[arg(long, default_value = "pro")]
    seat0: String,

    /// Strategy for seat 1
    #[arg(long, default_value = "intermediate")]
    seat1: String,

    /// Strategy for seat 2
    #[arg(long, default_value = "pro")]
    seat2: String,

    /// Strategy for seat 3
    #[arg(long, default_value = "intermediate")]
    seat3: String,

    /// Base seed; game N uses seed + N
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Abandon a game after this many turns
    #[arg(long, default_value = "2000")]
    max_turns: u32,

    /// Disable the redirect of overshooting moves into the safe zone
    #[arg(long)]
    no_redirect: bool,

    /// Print each game's summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn build_strategies(names: &[String], seed: u64) -> Result<Vec<Box<dyn Strategy>>, String> {
    names
        .iter()
        .enumerate()
        .map(|(seat, name)| {
            let factory = strategy::by_name(name).ok_or_else(|| {
                let known: Vec<_> = strategy::registered().iter().map(|f| f.name).collect();
                format!("unknown strategy '{name}' (known: {})", known.join(", "))
            })?;
            Ok((factory.make)(Some(seed.wrapping_add(seat as u64))))
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let names = match args.seats {
        Some(name) => vec![name; 4],
        None => vec![args.seat0, args.seat1, args.seat2, args.seat3],
    };
    info!(games = args.games, seats = ?names, "starting simulation");

    let config = GameConfig::standard().with_overshoot_redirect(!args.no_redirect);
    let started = Instant::now();
    let mut summaries: Vec<GameSummary> = Vec::with_capacity(args.games as usize);

    for game in 0..args.games {
        let seed = args.seed.wrapping_add(u64::from(game));
        let strategies = build_strategies(&names, seed)?;
        let mut engine = GameEngine::new(config.clone(), strategies, seed)?;
        let summary = engine.run(args.max_turns)?;

        match summary.winner {
            Some(team) => debug!(game, %team, turns = summary.turns, "game finished"),
            None => warn!(game, turns = summary.turns, "game abandoned at turn limit"),
        }
        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        }
        summaries.push(summary);
    }

    report(&names, &summaries);
    println!("Elapsed: {:.2?}", started.elapsed());
    Ok(())
}

fn report(names: &[String], summaries: &[GameSummary]) {
    let games = summaries.len().max(1) as f64;
    println!("Games played: {}", summaries.len());
    for team in [TeamId(0), TeamId(1)] {
        let wins = summaries.iter().filter(|s| s.winner == Some(team)).count();
        let members: Vec<_> = names
            .iter()
            .enumerate()
            .filter(|(seat, _)| seat % 2 == team.0 as usize)
            .map(|(_, name)| name.as_str())
            .collect();
        println!(
            "  {team} ({}): {wins} wins ({:.1}%)",
            members.join(" + "),
            100.0 * wins as f64 / games
        );
    }

    let finished: Vec<_> = summaries.iter().filter(|s| s.winner.is_some()).collect();
    let abandoned = summaries.len() - finished.len();
    if abandoned > 0 {
        println!("  Abandoned: {abandoned}");
    }
    if !finished.is_empty() {
        let turns: u32 = finished.iter().map(|s| s.turns).sum();
        let captures: u32 = finished.iter().map(|s| s.captures).sum();
        let n = finished.len() as f64;
        println!("Average turns: {:.1}", f64::from(turns) / n);
        println!("Average captures: {:.1}", f64::from(captures) / n);
    }
}
