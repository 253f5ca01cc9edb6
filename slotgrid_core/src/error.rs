use std::path::PathBuf;

/// Reasons a spin action is refused. None of them change session state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpinError {
    #[error("insufficient credits: have {credits}, spin costs {cost}")]
    InsufficientCredits { credits: u64, cost: u64 },
    #[error("a spin is already in progress")]
    InProgress,
    #[error("no spin in progress")]
    NotSpinning,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown symbol: {0:?}")]
pub struct ParseSymbolError(pub String);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    #[error("expected 3 rows, found {0}")]
    Rows(usize),
    #[error("row {row}: expected 3 cells, found {found}")]
    Columns { row: usize, found: usize },
    #[error(transparent)]
    Symbol(#[from] ParseSymbolError),
}
