use std::io::BufWriter;

use tokio_util::sync::CancellationToken;

use replay::{LineSink, LineSource, Replayer};

use super::config::Effective;
use super::error::DriverError;

// ═══════════════════════════════════════════════════════════════
//  File → stdout
// ═══════════════════════════════════════════════════════════════

pub async fn run(eff: &Effective) -> Result<(), DriverError> {
    let mut source = LineSource::open(&eff.input)?;

    let token = CancellationToken::new();
    spawn_interrupt_watcher(token.clone())?;

    let mut replayer = Replayer::from_options(&eff.options)?.with_cancellation(token);

    // Логи идут в stderr, stdout — только записи.
    let stdout = std::io::stdout();
    let mut sink = LineSink::new(BufWriter::new(stdout.lock()));

    tracing::info!(
        source = %source.name,
        separator = %eff.options.separator,
        time_field = eff.options.time_field,
        seed = ?eff.options.seed,
        "replaying"
    );

    replayer.run(&mut source, &mut sink).await?;
    Ok(())
}

/// Обработчик SIGINT ставится до начала прогона и работает на worker'е
/// runtime, пока основной цикл занят отправкой.
#[cfg(unix)]
fn spawn_interrupt_watcher(token: CancellationToken) -> Result<(), DriverError> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        if interrupt.recv().await.is_some() {
            tracing::warn!("interrupt received, stopping replay");
            token.cancel();
        }
    });
    Ok(())
}

#[cfg(not(unix))]
fn spawn_interrupt_watcher(token: CancellationToken) -> Result<(), DriverError> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping replay");
            token.cancel();
        }
    });
    Ok(())
}
