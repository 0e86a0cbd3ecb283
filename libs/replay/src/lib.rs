pub mod clock;
pub mod config;
pub mod error;
pub mod interval;
pub mod pacer;
mod record;
mod replayer;
pub mod sink;
pub mod source;

pub use clock::{Clock, SystemClock};
pub use config::ReplayOptions;
pub use error::ReplayError;
pub use interval::{IntervalSource, RandomIntervals};
pub use pacer::{Pacer, PacerPhase, PauseDecision, corrected_pause};
pub use record::{Record, RecordParser};
pub use replayer::{ReplayStats, Replayer};
pub use sink::{LineSink, RecordSink};
pub use source::{LineSource, RecordSource};
