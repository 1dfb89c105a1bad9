use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data: no round contains any group")]
    InsufficientData,

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Invalid cluster count: requested {requested} clusters for {items} items")]
    InvalidClusterCount { requested: usize, items: usize },

    #[error(
        "Item sets differ: {} ids missing from the first matrix, {} missing from the second (e.g. {:?})",
        missing_in_a.len(),
        missing_in_b.len(),
        missing_in_a.first().or(missing_in_b.first())
    )]
    DomainMismatch {
        missing_in_a: Vec<String>,
        missing_in_b: Vec<String>,
    },

    #[error("Malformed input record #{record}: {reason}")]
    MalformedInputRecord { record: usize, reason: String },

    #[error("Malformed table at line {line}: {reason}")]
    MalformedTable { line: usize, reason: String },

    #[error("Unknown ordering strategy: {0}")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
