//! Output sinks for rendered reports.

use std::fmt;
use std::io;

/// Write-only, order-preserving destination for report output.
///
/// Every call appends; sinks never reorder or drop earlier output.
pub trait LogSink {
    /// Append formatted output.
    fn log(&mut self, args: fmt::Arguments<'_>);
}

/// Format into a [`LogSink`], like `write!`.
///
/// The first argument is a mutable reference to the sink.
#[macro_export]
macro_rules! logf {
    ($sink:expr, $($arg:tt)*) => {
        $crate::LogSink::log($sink, format_args!($($arg)*))
    };
}

/// Sink over any [`io::Write`].
///
/// The first write failure is kept and every later write is skipped, so a
/// closed pipe does not produce a storm of errors mid-report.
#[derive(Debug)]
pub struct WriterSink<W: io::Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: io::Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Flush and hand back the writer, or the first error encountered.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: io::Write> LogSink for WriterSink<W> {
    fn log(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.writer.write_fmt(args) {
            tracing::warn!(error = %err, "report output failed");
            self.error = Some(err);
        }
    }
}

/// In-memory sink, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    buf: String,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> &str {
        &self.buf
    }

    /// Written output split into lines.
    pub fn lines(&self) -> Vec<&str> {
        self.buf.lines().collect()
    }
}

impl LogSink for BufferSink {
    fn log(&mut self, args: fmt::Arguments<'_>) {
        use std::fmt::Write;
        // Writing into a String cannot fail.
        let _ = self.buf.write_fmt(args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sink_appends() {
        let mut sink = BufferSink::new();
        logf!(&mut sink, "{}-{}\n", 1, 2);
        logf!(&mut sink, "three\n");
        assert_eq!(sink.contents(), "1-2\nthree\n");
        assert_eq!(sink.lines(), vec!["1-2", "three"]);
    }

    #[test]
    fn test_writer_sink_roundtrip() {
        let mut sink = WriterSink::new(Vec::new());
        logf!(&mut sink, "{:>4}|\n", "ab");
        let bytes = sink.finish().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "  ab|\n");
    }

    #[test]
    fn test_sink_through_trait_object() {
        let mut inner = BufferSink::new();
        {
            let sink: &mut dyn LogSink = &mut inner;
            logf!(sink, "via ref");
        }
        assert_eq!(inner.contents(), "via ref");
    }
}
