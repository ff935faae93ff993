use crate::models::{ExtractedEntry, RelationBucket, Relations};
use crate::normalize::first_template;
use crate::pos::part_of_speech;
use crate::templates::TemplateAction;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::trace;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").unwrap());

static RELATION_HEADINGS: Lazy<FxHashMap<&'static str, RelationBucket>> = Lazy::new(|| {
    RelationBucket::ALL
        .into_iter()
        .map(|bucket| (bucket.label(), bucket))
        .collect()
});

/// Lines that only open or close a list block.
const LIST_MARKERS: &[&str] = &["{{ws beginlist}}", "{{ws endlist}}"];

/// Headings that end a relation block without starting another.
const SENTINEL_HEADINGS: &[&str] = &["Various", "See also", "Further reading"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No relation heading seen yet
    Idle,
    Collecting(RelationBucket),
    Ignoring,
}

/// Replaces every non-word character with a space and trims, so
/// `=====Synonyms=====` and `'''Synonyms:'''` both read `Synonyms`.
pub fn normalize_heading(line: &str) -> String {
    NON_WORD.replace_all(line, " ").trim().to_string()
}

/// Splits `===Noun===` into its level and text. Level is the smaller of the
/// opening and closing `=` runs.
pub fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let line = line.trim();
    let open = line.bytes().take_while(|&b| b == b'=').count();
    let close = line.bytes().rev().take_while(|&b| b == b'=').count();
    if open == 0 || close == 0 || open + close >= line.len() {
        return None;
    }
    let level = open.min(close);
    let text = line[level..line.len() - level].trim_matches('=').trim();
    if text.is_empty() {
        None
    } else {
        Some((level, text))
    }
}

/// Line-oriented relation scanner for one page body.
///
/// Feed lines in order, then call [`Classifier::finish`]. A fresh classifier
/// carries no state from earlier pages.
#[derive(Debug)]
pub struct Classifier {
    state: State,
    relations: Relations,
    parts_of_speech: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            relations: Relations::new(),
            parts_of_speech: Vec::new(),
        }
    }

    pub fn feed_line(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() || LIST_MARKERS.contains(&line) {
            return;
        }

        let heading = normalize_heading(line);
        if let Some(&bucket) = RELATION_HEADINGS.get(heading.as_str()) {
            trace!(bucket = %bucket, "Relation heading");
            self.state = State::Collecting(bucket);
            return;
        }
        if line.starts_with('=') && SENTINEL_HEADINGS.contains(&heading.as_str()) {
            trace!(heading = %heading, "Relation block closed");
            self.state = State::Ignoring;
            return;
        }

        // other headings leave the state alone
        if let Some((_, text)) = parse_heading(line) {
            if let Some(pos) = part_of_speech(text) {
                if !self.parts_of_speech.iter().any(|p| p == pos) {
                    self.parts_of_speech.push(pos.to_string());
                }
            }
            return;
        }

        if let State::Collecting(bucket) = self.state {
            if let Some(target) = relation_target(line) {
                self.relations.push(bucket, target);
            }
        }
    }

    pub fn finish(self) -> (Relations, Vec<String>) {
        (self.relations, self.parts_of_speech)
    }
}

/// Pulls the relation target out of the first template on a line.
///
/// Link templates such as `{{l|en|glad}}` name their target in a later
/// argument; the template table says which. Anything else yields its first
/// positional argument.
fn relation_target(line: &str) -> Option<String> {
    let found = first_template(line)?;
    let template = &found.template;
    let value = match template.action() {
        Some(TemplateAction::Arg(n)) => template.arg(n).or_else(|| template.arg(1)),
        _ => template.arg(1),
    }?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Buckets relation targets found under the seven relation headings.
pub fn classify<I, S>(lines: I) -> Relations
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut classifier = Classifier::new();
    for line in lines {
        classifier.feed_line(line.as_ref());
    }
    classifier.finish().0
}

/// Builds the entry for a page: `word` plus everything the body classifies to.
pub fn classify_page(word: &str, body: &str) -> ExtractedEntry {
    let mut classifier = Classifier::new();
    for line in body.lines() {
        classifier.feed_line(line);
    }
    let (relations, parts_of_speech) = classifier.finish();
    ExtractedEntry {
        word: word.to_string(),
        relations,
        parts_of_speech,
    }
}
