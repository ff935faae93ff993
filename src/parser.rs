use crate::assembler::PageAssembler;
use crate::config::READ_BUFFER_SIZE;
use crate::error::{ExtractError, Result};
use crate::models::AssembledPage;
use bzip2::read::MultiBzDecoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

const BZIP2_MAGIC: &[u8] = b"BZh";

/// Owned form of the reader events the assembler cares about.
#[derive(Debug)]
enum RawEvent {
    Start(String, Vec<(String, String)>),
    Empty(String, Vec<(String, String)>),
    End(String),
    Text(String),
    Eof,
    Skip,
}

fn start_parts(e: &BytesStart) -> std::result::Result<(String, Vec<(String, String)>), quick_xml::Error> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        attrs.push((key, attr.unescape_value()?.into_owned()));
    }
    Ok((name, attrs))
}

fn to_raw(event: Event<'_>) -> std::result::Result<RawEvent, quick_xml::Error> {
    Ok(match event {
        Event::Start(e) => {
            let (name, attrs) = start_parts(&e)?;
            RawEvent::Start(name, attrs)
        }
        Event::Empty(e) => {
            let (name, attrs) = start_parts(&e)?;
            RawEvent::Empty(name, attrs)
        }
        Event::End(e) => RawEvent::End(String::from_utf8_lossy(e.name().as_ref()).into_owned()),
        Event::Text(e) => RawEvent::Text(e.unescape()?.into_owned()),
        Event::CData(e) => RawEvent::Text(String::from_utf8_lossy(&e.into_inner()).into_owned()),
        Event::Eof => RawEvent::Eof,
        _ => RawEvent::Skip,
    })
}

/// Streams assembled pages out of a MediaWiki XML export.
///
/// Iterating yields pages in document order. The first error ends the
/// iteration; nothing after a malformed region is reported.
pub struct WikiReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    assembler: PageAssembler,
    finished: bool,
}

impl<R: BufRead> WikiReader<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        // mismatched end tags are reported by the assembler with page context
        reader.check_end_names(false);
        Self {
            reader,
            buf: Vec::with_capacity(8192),
            assembler: PageAssembler::new(),
            finished: false,
        }
    }

    pub fn assembler(&self) -> &PageAssembler {
        &self.assembler
    }

    /// Bytes consumed from the (decompressed) source so far.
    pub fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn context(&self, err: ExtractError) -> ExtractError {
        err.at(self.position(), self.assembler.current_title())
    }

    fn step(&mut self) -> Result<Option<AssembledPage>> {
        let event = self.reader.read_event_into(&mut self.buf).and_then(to_raw);
        self.buf.clear();
        let event = match event {
            Ok(event) => event,
            Err(source) => {
                return Err(self.context(ExtractError::Xml {
                    source,
                    position: 0,
                    title: None,
                }))
            }
        };

        let result = match event {
            RawEvent::Start(name, attrs) => {
                self.assembler.on_start(&name, attrs);
                Ok(None)
            }
            RawEvent::Empty(name, attrs) => {
                self.assembler.on_start(&name, attrs);
                self.assembler.on_end(&name)
            }
            RawEvent::End(name) => self.assembler.on_end(&name),
            RawEvent::Text(text) => {
                self.assembler.on_text(&text);
                Ok(None)
            }
            RawEvent::Eof => {
                self.finished = true;
                self.assembler.finish().map(|_| None)
            }
            RawEvent::Skip => Ok(None),
        };
        result.map_err(|e| self.context(e))
    }
}

impl<R: BufRead> Iterator for WikiReader<R> {
    type Item = Result<AssembledPage>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.step() {
                Ok(Some(page)) => return Some(Ok(page)),
                Ok(None) => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// Wraps a byte source in a buffered reader, decompressing bzip2 when the
/// stream starts with its magic bytes or `force_bz2` is set.
pub fn open_stream<S: Read + 'static>(source: S, force_bz2: bool) -> io::Result<Box<dyn BufRead>> {
    let mut raw = BufReader::with_capacity(READ_BUFFER_SIZE, source);
    let compressed = force_bz2 || raw.fill_buf()?.starts_with(BZIP2_MAGIC);
    if compressed {
        // multi-stream dumps are concatenated bzip2 members
        Ok(Box::new(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            MultiBzDecoder::new(raw),
        )))
    } else {
        Ok(Box::new(raw))
    }
}

/// Opens a dump file, plain or `.bz2`.
pub fn open_dump(path: impl AsRef<Path>) -> Result<WikiReader<Box<dyn BufRead>>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
    let is_bz2 = path.extension().is_some_and(|e| e == "bz2");
    let source = open_stream(file, is_bz2).map_err(|e| ExtractError::io(path, e))?;
    Ok(WikiReader::new(source))
}
