use crate::classify::parse_heading;
use crate::config::ExtractConfig;
use crate::models::{CaptureKind, CapturedSection, RelationBucket};
use crate::normalize::normalize;
use tracing::trace;

const LINKAGE_HEADINGS: &[&str] = &[
    "Derived terms",
    "Related terms",
    "Coordinate terms",
    "Troponyms",
    "Descendants",
];

/// Which capture, if any, a sub-heading opens under `config`.
pub fn capture_kind(heading: &str, config: &ExtractConfig) -> Option<CaptureKind> {
    // "Pronunciation 2", "Etymology 1"
    let base = heading.trim_end_matches(|c: char| c.is_ascii_digit()).trim_end();

    if base == "Translations" && config.capture_translations {
        return Some(CaptureKind::Translations);
    }
    if base == "Pronunciation" && config.capture_pronunciations {
        return Some(CaptureKind::Pronunciation);
    }
    if base == "Compounds" && config.capture_compounds {
        return Some(CaptureKind::Compounds);
    }
    let is_linkage = LINKAGE_HEADINGS.contains(&base)
        || RelationBucket::ALL.iter().any(|b| b.label() == base);
    if is_linkage && config.capture_linkages {
        return Some(CaptureKind::Linkages);
    }
    None
}

struct OpenSection {
    level: usize,
    kind: CaptureKind,
    heading: String,
    language: String,
    lines: Vec<String>,
}

impl OpenSection {
    fn close(self, word: &str, out: &mut Vec<CapturedSection>) {
        if self.lines.is_empty() {
            return;
        }
        out.push(CapturedSection {
            word: word.to_string(),
            language: self.language,
            kind: self.kind,
            heading: self.heading,
            lines: self.lines,
        });
    }
}

/// Walks the heading outline of `body`, tracking the level-2 language
/// heading, and collects the enabled sections for `config.languages`. Captured
/// lines are run through the template normalizer.
pub fn capture_sections(word: &str, body: &str, config: &ExtractConfig) -> Vec<CapturedSection> {
    let mut out = Vec::new();
    if !config.captures_sections() {
        return out;
    }

    let mut language: Option<&str> = None;
    let mut open: Option<OpenSection> = None;

    for line in body.lines() {
        if let Some((level, text)) = parse_heading(line) {
            if open.as_ref().is_some_and(|s| level <= s.level) {
                if let Some(section) = open.take() {
                    section.close(word, &mut out);
                }
            }
            if level == 2 {
                language = Some(text);
                continue;
            }
            let Some(lang) = language else { continue };
            if open.is_some() || !config.languages.iter().any(|l| l == lang) {
                continue;
            }
            if let Some(kind) = capture_kind(text, config) {
                trace!(word, language = lang, heading = text, "Capturing section");
                open = Some(OpenSection {
                    level,
                    kind,
                    heading: text.to_string(),
                    language: lang.to_string(),
                    lines: Vec::new(),
                });
            }
        } else if let Some(section) = open.as_mut() {
            let normalized = normalize(line.trim());
            let normalized = normalized.trim();
            if !normalized.is_empty() {
                section.lines.push(normalized.to_string());
            }
        }
    }

    if let Some(section) = open {
        section.close(word, &mut out);
    }
    out
}
