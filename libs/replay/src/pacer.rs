use std::time::Duration;

use tokio::time::Instant;

/// Пауза с учётом времени, уже потраченного на отправку предыдущего
/// burst'а: `max(0, interval - emission_cost)`.
pub fn corrected_pause(interval: Duration, emission_cost: Duration) -> Duration {
    interval.saturating_sub(emission_cost)
}

/// Фаза конечного автомата pacer'а.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacerPhase {
    WaitingForBoundary,
    Pausing,
}

/// Решение, принятое на границе bucket'а.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseDecision {
    pub interval: Duration,
    pub emission_cost: Duration,
    pub pause: Duration,
    pub boundary: u64,
}

/// Состояние pacing'а одного прогона.
#[derive(Debug)]
pub struct Pacer {
    boundary: u64,
    burst_started: Option<Instant>,
    phase: PacerPhase,
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacer {
    pub fn new() -> Self {
        Self {
            boundary: 0,
            burst_started: None,
            phase: PacerPhase::WaitingForBoundary,
        }
    }

    pub fn boundary(&self) -> u64 {
        self.boundary
    }

    pub fn phase(&self) -> PacerPhase {
        self.phase
    }

    /// Новый bucket начинается только при точном совпадении.
    pub fn is_boundary(&self, logical_time: u64) -> bool {
        logical_time == self.boundary
    }

    /// Сдвинуть границу на `interval` секунд и вычислить паузу.
    /// Переводит автомат в `Pausing` до вызова [`Pacer::start_burst`].
    pub fn begin_pause(&mut self, interval: u64, now: Instant) -> PauseDecision {
        debug_assert_eq!(self.phase, PacerPhase::WaitingForBoundary);

        self.boundary = self.boundary.saturating_add(interval);
        self.phase = PacerPhase::Pausing;

        let interval = Duration::from_secs(interval);
        // У первого burst'а предшественника нет.
        let emission_cost = self
            .burst_started
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or_default();

        PauseDecision {
            interval,
            emission_cost,
            pause: corrected_pause(interval, emission_cost),
            boundary: self.boundary,
        }
    }

    /// Пауза закончилась, начинается отправка burst'а.
    pub fn start_burst(&mut self, now: Instant) {
        self.burst_started = Some(now);
        self.phase = PacerPhase::WaitingForBoundary;
    }
}
