use serde::Deserialize;

use crate::error::ReplayError;

// ═══════════════════════════════════════════════════════════════
//  Replay options
// ═══════════════════════════════════════════════════════════════

/// Параметры воспроизведения. Все поля опциональны в TOML,
/// значения по умолчанию соответствуют формату Linear Road.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReplayOptions {
    /// Разделитель полей записи.
    pub separator: char,
    /// Индекс поля с логическим временем (секунды от начала потока).
    pub time_field: usize,
    /// Минимальная длительность burst'а в секундах (включительно).
    pub min_interval: u64,
    /// Максимальная длительность burst'а в секундах (включительно).
    pub max_interval: u64,
    /// Seed для PRNG интервалов. Без указания — из энтропии ОС.
    pub seed: Option<u64>,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            separator: ',',
            time_field: 1,
            min_interval: 5,
            max_interval: 15,
            seed: None,
        }
    }
}

impl ReplayOptions {
    pub fn validate(&self) -> Result<(), ReplayError> {
        // Поле 0 — дискриминатор типа, время всегда за ним.
        if self.time_field == 0 {
            return Err(ReplayError::InvalidOptions(
                "time_field must be >= 1 (field 0 is the record type)".into(),
            ));
        }
        if self.min_interval == 0 {
            return Err(ReplayError::InvalidOptions("min_interval must be >= 1".into()));
        }
        if self.min_interval > self.max_interval {
            return Err(ReplayError::InvalidOptions(format!(
                "min_interval ({}) > max_interval ({})",
                self.min_interval, self.max_interval
            )));
        }
        if self.separator == '\n' || self.separator == '\r' {
            return Err(ReplayError::InvalidOptions("separator cannot be a line break".into()));
        }
        Ok(())
    }
}
