use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slotgrid_core::{
    compute_grid, spin_with_seeds, verify_grid, GameConfig, Grid, Notice, ProvablyFairRng, Session,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod play;
mod render;

#[derive(Parser)]
#[command(name = "slotgrid", about = "3x3 slot machine in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// TOML game config; built-in defaults when omitted
    #[arg(long, env = "SLOTGRID_CONFIG")]
    config: Option<PathBuf>,
    /// Override the configured server seed
    #[arg(long, env = "SLOTGRID_SERVER_SEED")]
    server_seed: Option<String>,
    /// Override the configured client seed
    #[arg(long, env = "SLOTGRID_CLIENT_SEED")]
    client_seed: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive game (default)
    Play,
    /// Spin N times without animation and print each round
    Spin {
        #[arg(short, long, default_value_t = 1)]
        count: u32,
        /// One JSON report per line
        #[arg(long)]
        json: bool,
    },
    /// Estimate return-to-player over many nonces
    Simulate {
        #[arg(short, long, default_value_t = 100_000)]
        rounds: u64,
        #[arg(long)]
        json: bool,
    },
    /// Check a round's grid against the seeds; rows split by `;`, cells by `,`
    Verify {
        #[arg(long)]
        nonce: u64,
        #[arg(long)]
        grid: Grid,
    },
}

#[derive(Debug, Default, Serialize)]
struct SimulationSummary {
    rounds: u64,
    total_bet: u64,
    total_payout: u64,
    losses: u64,
    single_line_wins: u64,
    multi_line_wins: u64,
    rtp: f64,
}

fn simulate(config: &GameConfig, rounds: u64) -> SimulationSummary {
    let paytable = config.paytable();
    let mut summary = SimulationSummary {
        rounds,
        ..Default::default()
    };
    for nonce in 1..=rounds {
        let out = spin_with_seeds(&config.server_seed, &config.client_seed, nonce, &paytable);
        summary.total_bet = summary.total_bet.saturating_add(config.spin_cost);
        summary.total_payout = summary.total_payout.saturating_add(out.payout);
        match out.lines.len() {
            0 => summary.losses += 1,
            1 => summary.single_line_wins += 1,
            _ => summary.multi_line_wins += 1,
        }
    }
    if summary.total_bet > 0 {
        summary.rtp = summary.total_payout as f64 / summary.total_bet as f64;
    }
    summary
}

fn load_config(cli: &Cli) -> anyhow::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = &cli.server_seed {
        config.server_seed = seed.clone();
    }
    if let Some(seed) = &cli.client_seed {
        config.client_seed = seed.clone();
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(
        starting_credits = config.starting_credits,
        spin_cost = config.spin_cost,
        "config loaded"
    );

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => play::run(Session::new(config)).await?,
        Commands::Spin { count, json } => {
            let mut session = Session::new(config);
            for _ in 0..count {
                let report = match session.spin() {
                    Ok(report) => report,
                    Err(err) => {
                        println!("{}", render::notice(&Notice::from(&err)));
                        break;
                    }
                };
                if json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    println!("#{:>4} {}", report.nonce, report.grid);
                    println!("{}", render::grid(&report.grid, &report.lines));
                    println!(
                        "{}  {}",
                        render::notice(&report.notice),
                        render::credits(report.credits)
                    );
                }
            }
        }
        Commands::Simulate { rounds, json } => {
            let summary = simulate(&config, rounds);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "rounds={} bet={} payout={} losses={} single={} multi={} rtp={:.4}",
                    summary.rounds,
                    summary.total_bet,
                    summary.total_payout,
                    summary.losses,
                    summary.single_line_wins,
                    summary.multi_line_wins,
                    summary.rtp
                );
            }
        }
        Commands::Verify { nonce, grid } => {
            let rng = ProvablyFairRng::new(&config.server_seed, &config.client_seed, nonce);
            println!("server_seed_hash={}", rng.server_seed_hash_hex());
            if verify_grid(&config.server_seed, &config.client_seed, nonce, &grid) {
                println!("OK: nonce {nonce} produced {grid}");
            } else {
                bail!(
                    "mismatch for nonce {nonce}: expected {}, got {grid}",
                    compute_grid(&rng)
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulation_counts_every_round() {
        let summary = simulate(&GameConfig::default(), 500);
        assert_eq!(summary.rounds, 500);
        assert_eq!(
            summary.losses + summary.single_line_wins + summary.multi_line_wins,
            500
        );
        assert_eq!(summary.total_bet, 5000);
    }

    #[test]
    fn simulation_totals_saturate() {
        let config = GameConfig {
            spin_cost: u64::MAX / 2,
            ..GameConfig::default()
        };
        let summary = simulate(&config, 3);
        assert_eq!(summary.total_bet, u64::MAX);
        assert_eq!(summary.rounds, 3);
        assert!(summary.rtp < 1e-9);
    }

    #[test]
    fn cli_overrides_seeds() {
        let cli = Cli::parse_from(["slotgrid", "--client-seed", "bob", "spin", "--count", "2"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.client_seed, "bob");
        assert!(matches!(cli.command, Some(Commands::Spin { count: 2, json: false })));
    }

    #[test]
    fn verify_parses_grid_argument() {
        let cli = Cli::parse_from([
            "slotgrid",
            "verify",
            "--nonce",
            "3",
            "--grid",
            "🍒,🍒,🍒;🍋,🍇,🔔;⭐,💎,7",
        ]);
        assert!(matches!(cli.command, Some(Commands::Verify { nonce: 3, .. })));
    }
}
