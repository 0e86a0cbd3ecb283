use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Источник времени и точка приостановки replay-цикла.
/// Подменяется в тестах, чтобы не ждать реальные секунды.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Часы tokio. Под `start_paused` время виртуальное.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
