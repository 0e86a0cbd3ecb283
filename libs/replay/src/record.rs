use crate::error::ReplayError;

/// Одна запись потока: исходная строка и её логическое время.
/// Строка передаётся в sink без изменений.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: String,
    pub logical_time: u64,
}

/// Извлекает поле логического времени из текстовой записи.
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    separator: char,
    time_field: usize,
}

impl RecordParser {
    pub fn new(separator: char, time_field: usize) -> Self {
        Self { separator, time_field }
    }

    /// `line_no` — номер строки (с 1), только для диагностики.
    pub fn parse(&self, line: String, line_no: u64) -> Result<Record, ReplayError> {
        let field = match line.split(self.separator).nth(self.time_field) {
            Some(f) => f,
            None => {
                return Err(ReplayError::malformed(
                    line_no,
                    format!("missing field {}", self.time_field),
                    &line,
                ));
            }
        };

        let logical_time = field.parse::<u64>().map_err(|e| {
            ReplayError::malformed(line_no, format!("time field {field:?}: {e}"), &line)
        })?;

        Ok(Record { line, logical_time })
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(',', 1)
    }
}
