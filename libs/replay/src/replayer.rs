use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::clock::{Clock, SystemClock};
use crate::config::ReplayOptions;
use crate::error::ReplayError;
use crate::interval::{IntervalSource, RandomIntervals};
use crate::pacer::{Pacer, PauseDecision};
use crate::record::RecordParser;
use crate::sink::RecordSink;
use crate::source::RecordSource;

/// Итоги одного прогона.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Сколько записей отдано в sink.
    pub records: u64,
    /// Сколько bucket'ов начато (ровно одна пауза на каждый).
    pub bursts: u64,
    /// Суммарное фактическое время пауз.
    pub paused: Duration,
    /// Сколько времени отправки вычтено из пауз.
    pub drift_absorbed: Duration,
    /// Граница последнего начатого bucket'а.
    pub final_boundary: u64,
}

// ═══════════════════════════════════════════════════════════════
//  Replayer — Source → bucketing + pacing → Sink
// ═══════════════════════════════════════════════════════════════

/// Воспроизводит записи источника в темпе, приближенном к их логическому
/// времени: записи отдаются burst'ами, перед каждым burst'ом пауза
/// длиной в случайный интервал минус время отправки предыдущего.
pub struct Replayer<C, I> {
    clock: C,
    intervals: I,
    parser: RecordParser,
    pacer: Pacer,
    cancel: CancellationToken,
    stats: ReplayStats,
}

impl Replayer<SystemClock, RandomIntervals> {
    pub fn from_options(opts: &ReplayOptions) -> Result<Self, ReplayError> {
        opts.validate()?;
        Ok(Self::new(
            SystemClock,
            RandomIntervals::from_options(opts),
            RecordParser::new(opts.separator, opts.time_field),
        ))
    }
}

impl<C: Clock, I: IntervalSource> Replayer<C, I> {
    pub fn new(clock: C, intervals: I, parser: RecordParser) -> Self {
        Self {
            clock,
            intervals,
            parser,
            pacer: Pacer::new(),
            cancel: CancellationToken::new(),
            stats: ReplayStats::default(),
        }
    }

    /// Отмена токена прерывает текущую паузу с
    /// [`ReplayError::PauseInterrupted`], а отправку burst'а —
    /// с [`ReplayError::Interrupted`] перед следующей записью.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn boundary(&self) -> u64 {
        self.pacer.boundary()
    }

    /// Прогнать источник до исчерпания. Каждый прогон начинается с
    /// границы 0 и пустой статистики. Источник закрывается на любом
    /// пути завершения; ошибка закрытия только логируется.
    pub async fn run<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<ReplayStats, ReplayError>
    where
        S: RecordSource + ?Sized,
        K: RecordSink + ?Sized,
    {
        self.pacer = Pacer::new();
        self.stats = ReplayStats::default();

        let started = self.clock.now();
        let range = self.intervals.range();
        tracing::info!(
            min_interval_s = *range.start(),
            max_interval_s = *range.end(),
            "replay started"
        );

        let result = match self.drive(source, sink).await {
            Ok(()) => sink.flush(),
            Err(e) => {
                tracing::warn!(
                    phase = ?self.pacer.phase(),
                    boundary = self.pacer.boundary(),
                    records = self.stats.records,
                    error = %e,
                    "replay aborted"
                );
                if let Err(flush_err) = sink.flush() {
                    tracing::warn!(error = %flush_err, "sink flush failed during shutdown");
                }
                Err(e)
            }
        };

        if let Err(e) = source.close() {
            tracing::warn!(error = %e, "source close failed");
        }

        self.stats.final_boundary = self.pacer.boundary();
        result?;

        let elapsed = self.clock.now().saturating_duration_since(started);
        tracing::info!(
            records = self.stats.records,
            bursts = self.stats.bursts,
            boundary = self.stats.final_boundary,
            paused_s = format_args!("{:.1}", self.stats.paused.as_secs_f64()),
            drift_absorbed_s = format_args!("{:.1}", self.stats.drift_absorbed.as_secs_f64()),
            elapsed_s = format_args!("{:.1}", elapsed.as_secs_f64()),
            "replay complete"
        );

        Ok(self.stats.clone())
    }

    async fn drive<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<(), ReplayError>
    where
        S: RecordSource + ?Sized,
        K: RecordSink + ?Sized,
    {
        while let Some(line) = source.next_line()? {
            let line_no = source.lines_read();
            let record = self.parser.parse(line, line_no)?;

            if self.pacer.is_boundary(record.logical_time) {
                // Предыдущий burst должен уйти целиком до начала паузы.
                sink.flush()?;
                self.pause().await?;
            } else if self.cancel.is_cancelled() {
                return Err(ReplayError::Interrupted { line: line_no });
            }

            sink.write_record(&record, line_no)?;
            self.stats.records += 1;
        }
        Ok(())
    }

    async fn pause(&mut self) -> Result<(), ReplayError> {
        let interval = self.intervals.next_interval();
        let decision = self.pacer.begin_pause(interval, self.clock.now());

        tracing::debug!(
            interval_s = interval,
            boundary = decision.boundary,
            emission_ms = decision.emission_cost.as_millis() as u64,
            pause_ms = decision.pause.as_millis() as u64,
            "burst boundary"
        );

        if self.cancel.is_cancelled() {
            return Err(interrupted(&decision));
        }

        if !decision.pause.is_zero() {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(interrupted(&decision)),
                _ = self.clock.sleep(decision.pause) => {}
            }
        }

        self.pacer.start_burst(self.clock.now());
        self.stats.bursts += 1;
        self.stats.paused += decision.pause;
        self.stats.drift_absorbed += decision.interval.saturating_sub(decision.pause);
        Ok(())
    }
}

fn interrupted(decision: &PauseDecision) -> ReplayError {
    ReplayError::PauseInterrupted { interval: decision.interval, boundary: decision.boundary }
}
