//! Wikilex: lexical relation extraction from Wiktionary dumps
//!
//! This crate streams a MediaWiki XML export (raw or bzip2-compressed) and turns
//! Thesaurus-style pages into structured lexical entries:
//!
//! 1. **Page assembly** -- A tag-stack state machine consumes `quick-xml` events
//!    and emits one record per `<page>`, holding nothing beyond the current page
//! 2. **Template normalization** -- Wikitext templates are rewritten through a
//!    static pattern table (replace, keep an argument, or drop)
//! 3. **Relation classification** -- Line-oriented scanning buckets link targets
//!    under Synonyms, Antonyms, Hyponyms, Hypernyms, Instances, Meronyms and
//!    Holonyms headings
//! 4. **Section capture** (optional) -- Translation, pronunciation, linkage and
//!    compound sections of entry pages, per configured language
//!
//! # Architecture
//!
//! Everything runs on one thread in a single pass. Pages are pushed to a
//! caller-supplied [`sink::PageSink`] in document order; nothing is retained
//! once a page has been dispatched.
//!
//! # Key Modules
//!
//! - [`parser`] -- Dump opening (bzip2 detection) and the page iterator
//! - [`assembler`] -- Tag stack and page record assembly
//! - [`templates`] -- Static template pattern table
//! - [`normalize`] -- Template span parsing and rewriting
//! - [`classify`] -- Relation-block classifier
//! - [`capture`] -- Section capture for entry pages
//! - [`pos`] -- Part-of-speech heading table
//! - [`langs`] -- Language names accepted for section capture
//! - [`extract`] -- Driver routing pages to the sink
//! - [`sink`] -- Output trait and JSON-lines writer
//! - [`stats`] -- Atomic counters for extraction metrics
//! - [`config`] -- Constants and extraction options
//! - [`error`] -- Library error type
//!
//! # Example Usage
//!
//! ```bash
//! # Thesaurus relations to JSON lines
//! wikilex extract -i enwiktionary-latest-pages-articles.xml.bz2 -o relations.jsonl
//!
//! # Also keep redirects and English translation sections
//! wikilex extract -i dump.xml.bz2 -o out.jsonl --redirects --translations --language English
//! ```

pub mod assembler;
pub mod capture;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod langs;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod pos;
pub mod sink;
pub mod stats;
pub mod templates;

pub use config::ExtractConfig;
pub use error::{ExtractError, Result};
pub use extract::{run, run_path};
pub use models::{CaptureKind, CapturedSection, ExtractedEntry, Redirect, RelationBucket, Relations};
pub use sink::{CollectSink, JsonLinesSink, PageSink};
