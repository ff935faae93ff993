use crate::assembler::Diagnostics;
use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics collected during the extraction process
#[derive(Debug, Default)]
pub struct ExtractionStats {
    pub pages_seen: AtomicU64,
    pub entries_written: AtomicU64,
    pub relations_found: AtomicU64,
    pub redirects_written: AtomicU64,
    pub redirects_skipped: AtomicU64,
    pub non_text_dropped: AtomicU64,
    pub pages_skipped: AtomicU64,
    pub sections_captured: AtomicU64,
    pub unsupported_tags: AtomicU64,
    pub unrecognized_values: AtomicU64,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_pages(&self) {
        self.pages_seen.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_entries(&self) {
        self.entries_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_relations(&self, count: u64) {
        self.relations_found.fetch_add(count, Ordering::Relaxed);
    }

    pub fn inc_redirects(&self) {
        self.redirects_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_redirects_skipped(&self) {
        self.redirects_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_non_text(&self) {
        self.non_text_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_skipped(&self) {
        self.pages_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_sections(&self, count: u64) {
        self.sections_captured.fetch_add(count, Ordering::Relaxed);
    }

    /// Folds in the assembler's diagnostic counters at the end of a run.
    pub fn record_diagnostics(&self, diagnostics: Diagnostics) {
        self.unsupported_tags
            .fetch_add(diagnostics.unsupported_tags, Ordering::Relaxed);
        self.unrecognized_values
            .fetch_add(diagnostics.unrecognized_values, Ordering::Relaxed);
    }

    pub fn pages(&self) -> u64 {
        self.pages_seen.load(Ordering::Relaxed)
    }

    pub fn entries(&self) -> u64 {
        self.entries_written.load(Ordering::Relaxed)
    }

    pub fn relations(&self) -> u64 {
        self.relations_found.load(Ordering::Relaxed)
    }

    pub fn redirects(&self) -> u64 {
        self.redirects_written.load(Ordering::Relaxed)
    }

    pub fn redirects_skipped(&self) -> u64 {
        self.redirects_skipped.load(Ordering::Relaxed)
    }

    pub fn non_text(&self) -> u64 {
        self.non_text_dropped.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> u64 {
        self.pages_skipped.load(Ordering::Relaxed)
    }

    pub fn sections(&self) -> u64 {
        self.sections_captured.load(Ordering::Relaxed)
    }

    pub fn unsupported_tags(&self) -> u64 {
        self.unsupported_tags.load(Ordering::Relaxed)
    }

    pub fn unrecognized_values(&self) -> u64 {
        self.unrecognized_values.load(Ordering::Relaxed)
    }
}
