use std::io::Write;

use crate::error::ReplayError;
use crate::record::Record;

// ═══════════════════════════════════════════════════════════════
//  Sink — получатель записей
// ═══════════════════════════════════════════════════════════════

/// Получатель записей. Порядок вызовов `write_record` сохраняется.
pub trait RecordSink {
    /// `line_no` — номер строки источника, для диагностики.
    fn write_record(&mut self, record: &Record, line_no: u64) -> Result<(), ReplayError>;

    fn flush(&mut self) -> Result<(), ReplayError>;
}

/// Пишет каждую запись строкой с завершающим `\n`.
pub struct LineSink<W: Write> {
    writer: W,
    buf: Vec<u8>,
    written: u64,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, buf: Vec::with_capacity(512), written: 0 }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for LineSink<W> {
    fn write_record(&mut self, record: &Record, line_no: u64) -> Result<(), ReplayError> {
        self.buf.clear();
        self.buf.extend_from_slice(record.line.as_bytes());
        self.buf.push(b'\n');
        self.writer
            .write_all(&self.buf)
            .map_err(|e| ReplayError::SinkWrite { line: line_no, source: e })?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ReplayError> {
        self.writer
            .flush()
            .map_err(|e| ReplayError::SinkWrite { line: self.written, source: e })
    }
}
