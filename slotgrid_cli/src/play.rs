use std::io::{BufRead, Write};

use colored::*;
use slotgrid_core::{Notice, Session};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::render;

enum Action {
    Spin,
    Reset,
    Quit,
    Help,
}

fn parse_action(input: &str) -> Option<Action> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" | "s" | "spin" => Some(Action::Spin),
        "r" | "reset" => Some(Action::Reset),
        "q" | "quit" | "exit" => Some(Action::Quit),
        "h" | "help" | "?" => Some(Action::Help),
        _ => None,
    }
}

fn print_help() {
    println!(
        "{}  {} spin   {} reset   {} quit",
        "Controls:".bold(),
        "[enter/s]".yellow(),
        "[r]".yellow(),
        "[q]".yellow()
    );
}

fn prompt(session: &Session) {
    print!("{}  {} ", render::credits(session.credits()), ">".green().bold());
    std::io::stdout().flush().ok();
}

// Lines come from a detached thread; a pending read on tokio's stdin
// blocks runtime shutdown after quit.
fn spawn_input() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!(%err, "stdin read failed");
                    break;
                }
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Drops everything typed so far; returns how many lines were dropped.
fn discard_pending(input: &mut mpsc::UnboundedReceiver<String>) -> usize {
    let mut dropped = 0;
    while input.try_recv().is_ok() {
        dropped += 1;
    }
    dropped
}

/// Runs the animation at the configured pace, then settles the round.
/// Input arriving while the reels move is ignored.
async fn spin(session: &mut Session, input: &mut mpsc::UnboundedReceiver<String>) {
    if let Err(err) = session.begin_spin() {
        println!("{}", render::notice(&Notice::from(&err)));
        return;
    }

    let mut interval = tokio::time::interval(session.config().tick_interval());
    println!("{}", render::grid(session.grid(), &[]));
    while let Some(frame) = session.tick().copied() {
        interval.tick().await;
        println!("{}{}", render::rewind(), render::grid(&frame, &[]));
    }
    interval.tick().await;

    match session.finish_spin() {
        Ok(report) => {
            println!("{}{}", render::rewind(), render::grid(&report.grid, &report.lines));
            if !report.lines.is_empty() {
                println!("{} {}", "Lines:".bold(), render::lines(&report.lines));
            }
            println!("{}", render::notice(&report.notice));
        }
        Err(err) => println!("{}", render::notice(&Notice::from(&err))),
    }

    let dropped = discard_pending(input);
    if dropped > 0 {
        debug!(dropped, "input ignored during spin");
    }
}

pub async fn run(mut session: Session) -> anyhow::Result<()> {
    println!("{}", "═══ 🎰 slotgrid 🎰 ═══".bright_cyan().bold());
    println!(
        "Spin costs {} credits. One line pays {}, two or more pay {}.",
        session.config().spin_cost,
        session.config().single_line_reward,
        session.config().multi_line_reward
    );
    println!("Server seed hash: {}", session.server_seed_hash().dimmed());
    print_help();
    println!("{}", render::grid(session.grid(), &[]));
    prompt(&session);

    let mut input = spawn_input();
    while let Some(line) = input.recv().await {
        match parse_action(&line) {
            Some(Action::Spin) => spin(&mut session, &mut input).await,
            Some(Action::Reset) => {
                session.reset();
                println!("{}", "Credits restored.".cyan());
                println!("{}", render::grid(session.grid(), &[]));
            }
            Some(Action::Quit) => break,
            Some(Action::Help) => print_help(),
            None => {
                debug!(input = %line.trim(), "unknown command");
                print_help();
            }
        }
        prompt(&session);
    }
    println!();
    println!("Thanks for playing! Final {}", render::credits(session.credits()));
    Ok(())
}
