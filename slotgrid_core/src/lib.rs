pub mod config;
pub mod engine;
pub mod error;
pub mod lines;
pub mod paytable;
pub mod rng;
pub mod session;
pub mod symbols;

pub use crate::config::GameConfig;
pub use crate::engine::{
    compute_frame, compute_grid, evaluate, spin_once, spin_with_seeds, verify_grid, SpinOutcome,
};
pub use crate::error::{ConfigError, ParseGridError, ParseSymbolError, SpinError};
pub use crate::lines::{winning_lines, Line, LineKind, LINES};
pub use crate::paytable::Paytable;
pub use crate::rng::{derive_floats, derive_hash_hex, ProvablyFairRng};
pub use crate::session::{Notice, NoticeLevel, RoundReport, Session};
pub use crate::symbols::{Cell, Grid, Symbol, GRID_SIZE};
