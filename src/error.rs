use crate::aircraft::AircraftId;

/// Failures on the tower's outer surfaces: fleet files, console and feed.
#[derive(Debug, thiserror::Error)]
pub enum TowerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid fleet file: {0}")]
    Fleet(#[from] serde_json::Error),
    #[error("Aircraft {0} appears more than once in the fleet")]
    DuplicateAircraft(AircraftId),
    #[error("Console error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
