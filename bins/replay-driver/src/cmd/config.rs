use clap::Args;
use serde::Deserialize;

use replay::ReplayOptions;

use super::error::DriverError;

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub separator: Option<char>,
    pub time_field: Option<usize>,
    pub min_interval: Option<u64>,
    pub max_interval: Option<u64>,
    pub seed: Option<u64>,
}

pub fn load_config(path: &str) -> Result<Config, DriverError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DriverError::Config { context: "read", detail: format!("'{path}': {e}") })?;
    toml::from_str(&content)
        .map_err(|e| DriverError::Config { context: "parse", detail: format!("'{path}': {e}") })
}

// ═══════════════════════════════════════════════════════════════
//  CLI args
// ═══════════════════════════════════════════════════════════════

#[derive(Args, Clone, Debug)]
pub struct ReplayArgs {
    /// Файл с записями, отсортированными по логическому времени
    pub input: String,

    /// Путь к replay.toml
    #[arg(long, default_value = "replay.toml", env = "REPLAY_CONFIG")]
    pub config: String,

    /// Seed для PRNG интервалов (без указания — случайный)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Минимальная длительность burst'а, секунды
    #[arg(long)]
    pub min_interval: Option<u64>,

    /// Максимальная длительность burst'а, секунды
    #[arg(long)]
    pub max_interval: Option<u64>,

    /// Разделитель полей записи
    #[arg(long)]
    pub separator: Option<char>,

    /// Индекс поля с логическим временем
    #[arg(long)]
    pub time_field: Option<usize>,
}

// ═══════════════════════════════════════════════════════════════
//  Effective — merged config
// ═══════════════════════════════════════════════════════════════

/// Итоговая конфигурация после мержа: replay.toml < env/CLI
#[derive(Debug)]
pub struct Effective {
    pub input: String,
    pub options: ReplayOptions,
}

impl Effective {
    pub fn new(args: &ReplayArgs) -> Result<Self, DriverError> {
        let cfg = match load_config(&args.config) {
            Ok(c) => c,
            Err(e) => {
                // Отсутствующий конфиг не ошибка, битый — ошибка.
                if std::path::Path::new(&args.config).exists() {
                    return Err(e);
                }
                Config::default()
            }
        };

        let defaults = ReplayOptions::default();
        let options = ReplayOptions {
            separator: args.separator.or(cfg.separator).unwrap_or(defaults.separator),
            time_field: args.time_field.or(cfg.time_field).unwrap_or(defaults.time_field),
            min_interval: args.min_interval.or(cfg.min_interval).unwrap_or(defaults.min_interval),
            max_interval: args.max_interval.or(cfg.max_interval).unwrap_or(defaults.max_interval),
            seed: args.seed.or(cfg.seed),
        };
        options.validate()?;

        Ok(Self { input: args.input.clone(), options })
    }
}
