use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggError {
    #[error("Error opening {0}: no such file or directory.")]
    OpenSignal(String),

    #[error("Error opening {0}: no such file or directory.")]
    OpenSequence(String),

    #[error("Error opening {0}: no such file or directory.")]
    OpenRegionFile(String),

    #[error("Signal read failed: {0}")]
    Signal(String),

    #[error("Sequence read failed: {0}")]
    Sequence(String),

    #[error("Error parsing region: {0}")]
    RegionParse(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("No region has a positive signal sum; z-scores are undefined")]
    NoPositiveSignal,

    #[error("All positive signal sums are identical; z-scores are undefined")]
    DegenerateZscore,

    #[error("Unrecognized nucleotide: {0:?}")]
    UnknownBase(char),

    #[error("Streamed batch did not serialize to a JSON {0}")]
    StreamEnclosure(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for aggwig-core operations.
pub type Result<T> = std::result::Result<T, AggError>;
