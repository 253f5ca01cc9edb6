use serde::{Deserialize, Serialize};

use crate::{
    lines::{winning_lines, Line},
    paytable::Paytable,
    rng::ProvablyFairRng,
    symbols::{Grid, Symbol, GRID_SIZE},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub grid: Grid,
    pub lines: Vec<Line>,
    pub payout: u64,
}

fn grid_from_floats(floats: &[f64]) -> Grid {
    // row-major, one float per cell
    let mut grid = Grid::empty();
    for (i, f) in floats.iter().take(GRID_SIZE * GRID_SIZE).enumerate() {
        let idx = ((f * Symbol::COUNT as f64).floor() as usize).min(Symbol::COUNT - 1);
        grid.set(i / GRID_SIZE, i % GRID_SIZE, Some(Symbol::ALL[idx]));
    }
    grid
}

pub fn compute_grid(rng: &ProvablyFairRng) -> Grid {
    grid_from_floats(&rng.next_floats(GRID_SIZE * GRID_SIZE))
}

/// A throwaway grid for flicker frame `frame` of the round.
pub fn compute_frame(rng: &ProvablyFairRng, frame: u32) -> Grid {
    grid_from_floats(&rng.frame_floats(frame, GRID_SIZE * GRID_SIZE))
}

pub fn evaluate(grid: &Grid, paytable: &Paytable) -> SpinOutcome {
    let lines = winning_lines(grid);
    let payout = paytable.payout(lines.len());
    SpinOutcome {
        grid: *grid,
        lines,
        payout,
    }
}

pub fn spin_once(rng: &ProvablyFairRng, paytable: &Paytable) -> SpinOutcome {
    evaluate(&compute_grid(rng), paytable)
}

/// Convenience: perform a spin creating the RNG from seeds.
pub fn spin_with_seeds(
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
    paytable: &Paytable,
) -> SpinOutcome {
    let rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    spin_once(&rng, paytable)
}

/// Check that `grid` is what the seeds produce for `nonce`.
pub fn verify_grid(server_seed: &str, client_seed: &str, nonce: u64, grid: &Grid) -> bool {
    let rng = ProvablyFairRng::new(server_seed, client_seed, nonce);
    compute_grid(&rng) == *grid
}
