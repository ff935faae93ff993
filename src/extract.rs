use crate::capture::capture_sections;
use crate::classify::classify_page;
use crate::config::{ExtractConfig, PROGRESS_INTERVAL};
use crate::error::{ExtractError, Result};
use crate::models::{AssembledPage, PageRecord};
use crate::parser::{open_dump, WikiReader};
use crate::sink::PageSink;
use crate::stats::ExtractionStats;
use indicatif::ProgressBar;
use rustc_hash::FxHashMap;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, warn};

/// Extracts from an already-decompressed XML stream.
pub fn run<R, S>(reader: R, config: &ExtractConfig, sink: &mut S) -> Result<ExtractionStats>
where
    R: BufRead,
    S: PageSink + ?Sized,
{
    config.validate()?;
    drive(WikiReader::new(reader), config, sink)
}

/// Extracts from a dump file, decompressing bzip2 when needed.
pub fn run_path<S>(path: impl AsRef<Path>, config: &ExtractConfig, sink: &mut S) -> Result<ExtractionStats>
where
    S: PageSink + ?Sized,
{
    config.validate()?;
    let path = path.as_ref();
    info!("Extracting from: {}", path.display());
    drive(open_dump(path)?, config, sink)
}

fn drive<R, S>(mut pages: WikiReader<R>, config: &ExtractConfig, sink: &mut S) -> Result<ExtractionStats>
where
    R: BufRead,
    S: PageSink + ?Sized,
{
    let stats = ExtractionStats::new();
    let pb = if config.show_progress {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    let mut namespaces_checked = false;

    while let Some(page) = pages.next() {
        let page = page?;
        stats.inc_pages();

        // <siteinfo> precedes the first page
        if !namespaces_checked {
            warn_undeclared(config, pages.assembler().namespaces());
            namespaces_checked = true;
        }

        match page {
            AssembledPage::Redirect(redirect) => {
                if config.capture_redirects {
                    sink.redirect(redirect).map_err(ExtractError::Sink)?;
                    stats.inc_redirects();
                } else {
                    stats.inc_redirects_skipped();
                }
            }
            AssembledPage::NonText { .. } => stats.inc_non_text(),
            AssembledPage::Article(record) => {
                let emitted = dispatch_article(record, config, pages.assembler().namespaces(), sink, &stats)?;
                if emitted && config.limit.is_some_and(|limit| stats.entries() >= limit) {
                    info!(entries = stats.entries(), "Entry limit reached, stopping");
                    break;
                }
            }
        }

        if stats.pages() % PROGRESS_INTERVAL == 0 {
            pb.set_message(format!("{} pages, {} entries", stats.pages(), stats.entries()));
            pb.tick();
        }
    }

    pb.finish_and_clear();
    stats.record_diagnostics(pages.assembler().diagnostics());
    sink.flush().map_err(ExtractError::Sink)?;

    debug!(
        peak_buffered = pages.assembler().peak_buffered(),
        position = pages.position(),
        "Reader finished"
    );
    info!(
        pages = stats.pages(),
        entries = stats.entries(),
        relations = stats.relations(),
        redirects = stats.redirects(),
        sections = stats.sections(),
        "Extraction finished"
    );

    Ok(stats)
}

/// Routes one article. Returns true when an entry was written.
fn dispatch_article<S>(
    record: PageRecord,
    config: &ExtractConfig,
    namespaces: &FxHashMap<String, String>,
    sink: &mut S,
    stats: &ExtractionStats,
) -> Result<bool>
where
    S: PageSink + ?Sized,
{
    if config.is_target_title(&record.title) {
        let Some(body) = record.body_text.as_deref() else {
            debug!(title = %record.title, "Target page without text");
            stats.inc_skipped();
            return Ok(false);
        };
        let entry = classify_page(target_word(&record.title), body);
        stats.add_relations(entry.relations.len() as u64);
        sink.entry(entry).map_err(ExtractError::Sink)?;
        stats.inc_entries();
        return Ok(true);
    }

    if config.captures_sections() && is_main_namespace(&record.title, namespaces) {
        if let Some(body) = record.body_text.as_deref() {
            let sections = capture_sections(&record.title, body, config);
            stats.add_sections(sections.len() as u64);
            for section in sections {
                sink.section(section).map_err(ExtractError::Sink)?;
            }
            return Ok(false);
        }
    }

    stats.inc_skipped();
    Ok(false)
}

/// `Thesaurus:happy` -> `happy`.
pub fn target_word(title: &str) -> &str {
    match title.split_once(':') {
        Some((_, rest)) => rest.trim(),
        None => title.trim(),
    }
}

/// A title is in the main namespace unless its prefix names a declared
/// namespace. With no `<siteinfo>`, every title counts as main.
pub fn is_main_namespace(title: &str, namespaces: &FxHashMap<String, String>) -> bool {
    match title.split_once(':') {
        Some((prefix, _)) => {
            let prefix = prefix.trim();
            !namespaces
                .values()
                .any(|name| !name.is_empty() && name.eq_ignore_ascii_case(prefix))
        }
        None => true,
    }
}

fn warn_undeclared(config: &ExtractConfig, namespaces: &FxHashMap<String, String>) {
    if namespaces.is_empty() {
        return;
    }
    for target in &config.target_namespaces {
        if !namespaces.values().any(|name| name.eq_ignore_ascii_case(target.trim())) {
            warn!(namespace = %target, "Target namespace is not declared in siteinfo");
        }
    }
}
