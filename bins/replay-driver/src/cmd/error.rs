use replay::ReplayError;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("signal: {0}")]
    Signal(#[from] std::io::Error),

    #[error("{0}")]
    Replay(#[from] ReplayError),
}
