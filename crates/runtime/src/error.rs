/// Errors surfaced by host-side plumbing.
///
/// The simulation core itself never returns errors; everything here
/// originates at the file/scenario boundary.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario file: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
