use crate::error::{ExtractError, Result};
use crate::langs::is_language;

/// Progress update interval (tick every N pages)
pub const PROGRESS_INTERVAL: u64 = 1000;

/// Read buffer in front of the decompressor
pub const READ_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// Output buffer for the JSON-lines writer
pub const WRITE_BUFFER_SIZE: usize = 256 * 1024;

/// Namespace whose pages carry relation sections
pub const DEFAULT_TARGET_NAMESPACE: &str = "Thesaurus";

/// Options controlling which pages are extracted and which callbacks fire.
///
/// None of the flags change how pages are parsed; they only gate what is
/// handed to the sink.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Title namespaces (without the trailing colon) whose pages are classified
    pub target_namespaces: Vec<String>,
    /// Languages whose sections are considered by section capture
    pub languages: Vec<String>,
    pub capture_redirects: bool,
    pub capture_translations: bool,
    pub capture_pronunciations: bool,
    pub capture_linkages: bool,
    pub capture_compounds: bool,
    /// Stop after this many extracted entries
    pub limit: Option<u64>,
    pub show_progress: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            target_namespaces: vec![DEFAULT_TARGET_NAMESPACE.to_string()],
            languages: vec!["English".to_string(), "Translingual".to_string()],
            capture_redirects: false,
            capture_translations: false,
            capture_pronunciations: false,
            capture_linkages: false,
            capture_compounds: false,
            limit: None,
            show_progress: false,
        }
    }
}

impl ExtractConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_redirects(mut self, enabled: bool) -> Self {
        self.capture_redirects = enabled;
        self
    }

    pub fn with_translations(mut self, enabled: bool) -> Self {
        self.capture_translations = enabled;
        self
    }

    pub fn with_pronunciations(mut self, enabled: bool) -> Self {
        self.capture_pronunciations = enabled;
        self
    }

    pub fn with_linkages(mut self, enabled: bool) -> Self {
        self.capture_linkages = enabled;
        self
    }

    pub fn with_compounds(mut self, enabled: bool) -> Self {
        self.capture_compounds = enabled;
        self
    }

    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// True when any of the section capture flags is set.
    pub fn captures_sections(&self) -> bool {
        self.capture_translations
            || self.capture_pronunciations
            || self.capture_linkages
            || self.capture_compounds
    }

    /// True when `title` lives in one of the target namespaces.
    pub fn is_target_title(&self, title: &str) -> bool {
        match title.split_once(':') {
            Some((prefix, rest)) => {
                !rest.is_empty()
                    && self
                        .target_namespaces
                        .iter()
                        .any(|ns| ns.eq_ignore_ascii_case(prefix.trim()))
            }
            None => false,
        }
    }

    /// Rejects flag combinations that cannot produce anything useful.
    /// Called by the driver before the first byte is read.
    pub fn validate(&self) -> Result<()> {
        if self.target_namespaces.is_empty() {
            return Err(ExtractError::config("at least one target namespace is required"));
        }
        for ns in &self.target_namespaces {
            let trimmed = ns.trim();
            if trimmed.is_empty() || trimmed.contains(':') {
                return Err(ExtractError::config(format!(
                    "invalid target namespace {:?} (expected a bare name such as \"Thesaurus\")",
                    ns
                )));
            }
        }
        if self.captures_sections() && self.languages.is_empty() {
            return Err(ExtractError::config(
                "section capture requested but no languages were given",
            ));
        }
        for lang in &self.languages {
            if !is_language(lang) {
                return Err(ExtractError::config(format!("unknown language {:?}", lang)));
            }
        }
        if self.limit == Some(0) {
            return Err(ExtractError::config("limit must be greater than zero"));
        }
        Ok(())
    }
}
