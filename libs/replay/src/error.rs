use std::time::Duration;

/// Ошибки воспроизведения. Все фатальны: прогон прекращается на первой.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("cannot open source '{path}': {source}")]
    SourceOpen { path: String, source: std::io::Error },

    #[error("source read failed after line {line}: {source}")]
    SourceRead { line: u64, source: std::io::Error },

    #[error("malformed record at line {line} ({reason}): {record:?}")]
    MalformedRecord { line: u64, reason: String, record: String },

    #[error("sink write failed at line {line}: {source}")]
    SinkWrite { line: u64, source: std::io::Error },

    #[error("pause of {}s interrupted at boundary {boundary}", .interval.as_secs())]
    PauseInterrupted { interval: Duration, boundary: u64 },

    #[error("replay interrupted before line {line}")]
    Interrupted { line: u64 },

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl ReplayError {
    pub(crate) fn malformed(line: u64, reason: impl Into<String>, record: &str) -> Self {
        Self::MalformedRecord { line, reason: reason.into(), record: record.to_string() }
    }
}
