use crate::config::WRITE_BUFFER_SIZE;
use crate::models::{CapturedSection, ExtractedEntry, Redirect};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Receives records from the driver in document order.
///
/// Only `entry` is required; redirects and captured sections are dropped
/// unless the sink overrides them.
pub trait PageSink {
    fn entry(&mut self, entry: ExtractedEntry) -> io::Result<()>;

    fn redirect(&mut self, _redirect: Redirect) -> io::Result<()> {
        Ok(())
    }

    fn section(&mut self, _section: CapturedSection) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: PageSink + ?Sized> PageSink for &mut S {
    fn entry(&mut self, entry: ExtractedEntry) -> io::Result<()> {
        (**self).entry(entry)
    }

    fn redirect(&mut self, redirect: Redirect) -> io::Result<()> {
        (**self).redirect(redirect)
    }

    fn section(&mut self, section: CapturedSection) -> io::Result<()> {
        (**self).section(section)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Writes one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl JsonLinesSink<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::with_capacity(WRITE_BUFFER_SIZE, file)))
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line<T: Serialize>(&mut self, record: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> PageSink for JsonLinesSink<W> {
    fn entry(&mut self, entry: ExtractedEntry) -> io::Result<()> {
        self.write_line(&entry)
    }

    fn redirect(&mut self, redirect: Redirect) -> io::Result<()> {
        self.write_line(&redirect)
    }

    fn section(&mut self, section: CapturedSection) -> io::Result<()> {
        self.write_line(&section)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Keeps everything in memory.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub entries: Vec<ExtractedEntry>,
    pub redirects: Vec<Redirect>,
    pub sections: Vec<CapturedSection>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageSink for CollectSink {
    fn entry(&mut self, entry: ExtractedEntry) -> io::Result<()> {
        self.entries.push(entry);
        Ok(())
    }

    fn redirect(&mut self, redirect: Redirect) -> io::Result<()> {
        self.redirects.push(redirect);
        Ok(())
    }

    fn section(&mut self, section: CapturedSection) -> io::Result<()> {
        self.sections.push(section);
        Ok(())
    }
}
