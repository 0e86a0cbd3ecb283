mod cmd;

use clap::Parser;
use cmd::config::{Effective, ReplayArgs};

#[derive(Parser)]
#[command(
    name = "replay-driver",
    about = "Воспроизводит файл записей burst'ами в темпе их логического времени"
)]
struct Cli {
    #[command(flatten)]
    args: ReplayArgs,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Ошибки аргументов — код 1, как и остальные фатальные ошибки.
    let cli = match Cli::try_parse() {
        Ok(c) => c,
        Err(e) if e.use_stderr() => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    let eff = match Effective::new(&cli.args) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cmd::replay::run(&eff).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
