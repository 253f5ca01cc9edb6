//! One player's in-memory game: credits, the displayed grid and the spin cycle.
//!
//! A spin runs in three steps so a front end can animate it:
//! [`Session::begin_spin`] charges the cost, [`Session::tick`] yields flicker
//! frames, and [`Session::finish_spin`] settles and pays the round. The round
//! is only evaluated after every frame has been shown, so the grid on screen
//! is always the grid that was scored.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::GameConfig,
    engine::{compute_frame, compute_grid, evaluate},
    error::SpinError,
    lines::Line,
    paytable::Paytable,
    rng::ProvablyFairRng,
    symbols::Grid,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Win,
    BigWin,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Outcome message for a settled round.
    pub fn for_round(lines: usize, payout: u64) -> Self {
        match lines {
            0 => Self::new(NoticeLevel::Info, "No win this time. Try again!"),
            1 => Self::new(NoticeLevel::Win, format!("You won {payout} credits!")),
            n => Self::new(
                NoticeLevel::BigWin,
                format!("Big win! {n} lines matched for {payout} credits!"),
            ),
        }
    }
}

impl From<&SpinError> for Notice {
    fn from(err: &SpinError) -> Self {
        match err {
            SpinError::InsufficientCredits { .. } => {
                Self::new(NoticeLevel::Warning, "Not enough credits to spin.")
            }
            SpinError::InProgress => Self::new(NoticeLevel::Info, "The reels are still spinning."),
            SpinError::NotSpinning => Self::new(NoticeLevel::Info, "Press spin to play."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundReport {
    pub nonce: u64,
    pub cost: u64,
    pub grid: Grid,
    pub lines: Vec<Line>,
    pub payout: u64,
    pub credits: u64,
    pub notice: Notice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Spinning { nonce: u64, next_frame: u32 },
}

#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    paytable: Paytable,
    credits: u64,
    grid: Grid,
    lines: Vec<Line>,
    phase: Phase,
    next_nonce: u64,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            paytable: config.paytable(),
            credits: config.starting_credits,
            grid: Grid::empty(),
            lines: Vec::new(),
            phase: Phase::Idle,
            next_nonce: 1,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn credits(&self) -> u64 {
        self.credits
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Lines matched by the last settled round, for highlighting.
    pub fn winning_lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, Phase::Spinning { .. })
    }

    pub fn can_spin(&self) -> bool {
        !self.is_spinning() && self.credits >= self.config.spin_cost
    }

    pub fn client_seed(&self) -> &str {
        &self.config.client_seed
    }

    pub fn server_seed_hash(&self) -> String {
        self.rng(0).server_seed_hash_hex()
    }

    /// Nonce the next spin will use.
    pub fn next_nonce(&self) -> u64 {
        self.next_nonce
    }

    fn rng(&self, nonce: u64) -> ProvablyFairRng {
        ProvablyFairRng::new(&self.config.server_seed, &self.config.client_seed, nonce)
    }

    pub fn begin_spin(&mut self) -> Result<u64, SpinError> {
        if self.is_spinning() {
            warn!("spin ignored: already spinning");
            return Err(SpinError::InProgress);
        }
        let cost = self.config.spin_cost;
        if self.credits < cost {
            warn!(credits = self.credits, cost, "spin rejected: insufficient credits");
            return Err(SpinError::InsufficientCredits {
                credits: self.credits,
                cost,
            });
        }
        let nonce = self.next_nonce;
        self.next_nonce += 1;
        self.credits -= cost;
        self.lines.clear();
        self.phase = Phase::Spinning {
            nonce,
            next_frame: 0,
        };
        debug!(nonce, credits = self.credits, "spin started");
        Ok(nonce)
    }

    /// Next flicker frame, or `None` once the animation is spent or no spin is running.
    pub fn tick(&mut self) -> Option<&Grid> {
        let Phase::Spinning { nonce, next_frame } = self.phase else {
            return None;
        };
        if next_frame >= self.config.animation_frames {
            return None;
        }
        self.grid = compute_frame(&self.rng(nonce), next_frame);
        self.phase = Phase::Spinning {
            nonce,
            next_frame: next_frame + 1,
        };
        Some(&self.grid)
    }

    pub fn frames_left(&self) -> u32 {
        match self.phase {
            Phase::Spinning { next_frame, .. } => {
                self.config.animation_frames.saturating_sub(next_frame)
            }
            Phase::Idle => 0,
        }
    }

    pub fn finish_spin(&mut self) -> Result<RoundReport, SpinError> {
        // the animation always runs to completion before the round is scored
        while self.tick().is_some() {}
        let Phase::Spinning { nonce, .. } = self.phase else {
            return Err(SpinError::NotSpinning);
        };

        let grid = compute_grid(&self.rng(nonce));
        let outcome = evaluate(&grid, &self.paytable);
        self.grid = outcome.grid;
        self.credits = self.credits.saturating_add(outcome.payout);
        self.phase = Phase::Idle;
        self.lines = outcome.lines;

        let notice = Notice::for_round(self.lines.len(), outcome.payout);
        info!(
            nonce,
            grid = %self.grid,
            lines = self.lines.len(),
            payout = outcome.payout,
            credits = self.credits,
            "round settled"
        );
        Ok(RoundReport {
            nonce,
            cost: self.config.spin_cost,
            grid: self.grid,
            lines: self.lines.clone(),
            payout: outcome.payout,
            credits: self.credits,
            notice,
        })
    }

    /// Full spin without pacing the animation.
    pub fn spin(&mut self) -> Result<RoundReport, SpinError> {
        self.begin_spin()?;
        self.finish_spin()
    }

    /// Restore starting credits and a blank grid. Abandons a running spin.
    pub fn reset(&mut self) {
        if self.is_spinning() {
            debug!("reset during spin, round abandoned");
        }
        self.credits = self.config.starting_credits;
        self.grid = Grid::empty();
        self.lines.clear();
        self.phase = Phase::Idle;
        info!(credits = self.credits, "session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig {
            animation_frames: 4,
            ..GameConfig::default()
        }
    }

    #[test]
    fn spin_charges_cost_and_settles() {
        let mut session = Session::new(config());
        let report = session.spin().unwrap();
        assert_eq!(report.nonce, 1);
        assert_eq!(report.cost, 10);
        assert_eq!(report.credits, 100 - 10 + report.payout);
        assert_eq!(session.credits(), report.credits);
        assert_eq!(session.grid(), &report.grid);
        assert!(session.grid().is_full());
        assert_eq!(session.winning_lines(), report.lines.as_slice());
        assert!(!session.is_spinning());
    }

    #[test]
    fn ticks_yield_configured_frames() {
        let mut session = Session::new(config());
        assert!(session.tick().is_none());
        session.begin_spin().unwrap();
        assert_eq!(session.frames_left(), 4);
        let mut frames = 0;
        while session.tick().is_some() {
            frames += 1;
        }
        assert_eq!(frames, 4);
        assert_eq!(session.frames_left(), 0);
        assert!(session.is_spinning());
        session.finish_spin().unwrap();
        assert!(!session.is_spinning());
    }

    #[test]
    fn cannot_spin_twice_at_once() {
        let mut session = Session::new(config());
        session.begin_spin().unwrap();
        assert_eq!(session.begin_spin(), Err(SpinError::InProgress));
        assert_eq!(session.credits(), 90);
    }

    #[test]
    fn finish_without_begin_is_rejected() {
        let mut session = Session::new(config());
        assert_eq!(session.finish_spin(), Err(SpinError::NotSpinning));
    }

    #[test]
    fn insufficient_credits_leave_state_untouched() {
        let mut session = Session::new(GameConfig {
            starting_credits: 15,
            single_line_reward: 0,
            multi_line_reward: 0,
            ..config()
        });
        session.spin().unwrap();
        let credits = session.credits();
        assert_eq!(credits, 5);
        let grid = *session.grid();
        let nonce = session.next_nonce();

        let err = session.spin().unwrap_err();
        assert_eq!(err, SpinError::InsufficientCredits { credits, cost: 10 });
        assert_eq!(Notice::from(&err).level, NoticeLevel::Warning);
        assert_eq!(session.credits(), credits);
        assert_eq!(session.grid(), &grid);
        assert_eq!(session.next_nonce(), nonce);
        assert!(!session.can_spin());
    }

    #[test]
    fn reset_restores_start_state() {
        let mut session = Session::new(config());
        session.spin().unwrap();
        session.begin_spin().unwrap();
        session.tick();
        session.reset();
        assert_eq!(session.credits(), 100);
        assert!(session.grid().is_empty());
        assert!(session.winning_lines().is_empty());
        assert!(!session.is_spinning());
        // nonces are never reused
        assert_eq!(session.next_nonce(), 3);
    }

    #[test]
    fn payout_saturates_at_max_credits() {
        let mut session = Session::new(GameConfig {
            starting_credits: u64::MAX,
            spin_cost: 1,
            single_line_reward: u64::MAX,
            multi_line_reward: u64::MAX,
            ..config()
        });
        assert!(session.config().validate().is_ok());
        let mut paid = false;
        for _ in 0..500 {
            let report = session.spin().unwrap();
            if report.payout > 0 {
                assert_eq!(report.credits, u64::MAX);
                paid = true;
                break;
            }
        }
        assert!(paid);
        assert_eq!(session.credits(), u64::MAX);
    }

    #[test]
    fn round_notices() {
        assert_eq!(Notice::for_round(0, 0).level, NoticeLevel::Info);
        let single = Notice::for_round(1, 50);
        assert_eq!(single.level, NoticeLevel::Win);
        assert_eq!(single.message, "You won 50 credits!");
        let multi = Notice::for_round(2, 150);
        assert_eq!(multi.level, NoticeLevel::BigWin);
        assert!(multi.message.contains("150"));
    }
}
