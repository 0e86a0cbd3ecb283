use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::ReplayError;

// ═══════════════════════════════════════════════════════════════
//  Source — последовательный поставщик строк
// ═══════════════════════════════════════════════════════════════

/// Источник записей. Строки отдаются по одной в порядке хранения;
/// `Ok(None)` означает исчерпание.
pub trait RecordSource {
    fn next_line(&mut self) -> Result<Option<String>, ReplayError>;

    /// Освободить ресурсы. Вызывается на любом пути завершения.
    fn close(&mut self) -> Result<(), ReplayError> {
        Ok(())
    }

    /// Количество уже прочитанных строк.
    fn lines_read(&self) -> u64;
}

/// Строковый источник поверх любого `BufRead`. Обрезает `\n` и `\r\n`.
pub struct LineSource<R> {
    reader: Option<R>,
    buf: String,
    line: u64,
    pub name: String,
}

impl LineSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ReplayError::SourceOpen {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader: Some(reader),
            buf: String::with_capacity(256),
            line: 0,
            name: name.into(),
        }
    }
}

impl<R: BufRead> RecordSource for LineSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, ReplayError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        self.buf.clear();
        let n = reader
            .read_line(&mut self.buf)
            .map_err(|e| ReplayError::SourceRead { line: self.line, source: e })?;
        if n == 0 {
            return Ok(None);
        }
        self.line += 1;

        if self.buf.ends_with('\n') {
            self.buf.pop();
            if self.buf.ends_with('\r') {
                self.buf.pop();
            }
        }
        Ok(Some(self.buf.clone()))
    }

    fn close(&mut self) -> Result<(), ReplayError> {
        if self.reader.take().is_some() {
            tracing::debug!(source = %self.name, lines = self.line, "source closed");
        }
        Ok(())
    }

    fn lines_read(&self) -> u64 {
        self.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn strips_line_endings() {
        let mut src = LineSource::new(Cursor::new("a,0\r\nb,1\nc,2"), "mem");
        assert_eq!(src.next_line().unwrap().as_deref(), Some("a,0"));
        assert_eq!(src.next_line().unwrap().as_deref(), Some("b,1"));
        assert_eq!(src.next_line().unwrap().as_deref(), Some("c,2"));
        assert_eq!(src.next_line().unwrap(), None);
        assert_eq!(src.lines_read(), 3);
    }

    #[test]
    fn closed_source_is_exhausted() {
        let mut src = LineSource::new(Cursor::new("a,0\n"), "mem");
        src.close().unwrap();
        assert_eq!(src.next_line().unwrap(), None);
        // Повторное закрытие безопасно.
        src.close().unwrap();
    }

    #[test]
    fn invalid_utf8_is_read_error() {
        let mut src = LineSource::new(Cursor::new(b"a,0\n\xff\xfe,1\n".to_vec()), "mem");
        assert!(src.next_line().unwrap().is_some());
        let err = src.next_line().unwrap_err();
        assert!(matches!(err, ReplayError::SourceRead { line: 1, .. }));
    }

    #[test]
    fn opens_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0,0,1").unwrap();
        writeln!(file, "0,5,2").unwrap();

        let mut src = LineSource::open(file.path()).unwrap();
        assert_eq!(src.next_line().unwrap().as_deref(), Some("0,0,1"));
        assert_eq!(src.next_line().unwrap().as_deref(), Some("0,5,2"));
        assert_eq!(src.next_line().unwrap(), None);
    }

    #[test]
    fn missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.dat");
        let err = LineSource::open(&path).err().unwrap();
        assert!(matches!(err, ReplayError::SourceOpen { .. }));
    }
}
