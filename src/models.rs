use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fields collected between `<page>` and `</page>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRecord {
    pub page_id: Option<String>,
    pub title: String,
    pub redirect_target: Option<String>,
    pub content_model: Option<String>,
    pub content_format: Option<String>,
    pub body_text: Option<String>,
}

/// What the assembler hands back when a page closes.
#[derive(Debug, Clone, PartialEq)]
pub enum AssembledPage {
    Article(PageRecord),
    Redirect(Redirect),
    /// Stylesheet, script or module page; never a lexical entry
    NonText { title: String, model: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RelationBucket {
    Synonyms,
    Antonyms,
    Hyponyms,
    Hypernyms,
    Instances,
    Meronyms,
    Holonyms,
}

impl RelationBucket {
    pub const ALL: [RelationBucket; 7] = [
        RelationBucket::Synonyms,
        RelationBucket::Antonyms,
        RelationBucket::Hyponyms,
        RelationBucket::Hypernyms,
        RelationBucket::Instances,
        RelationBucket::Meronyms,
        RelationBucket::Holonyms,
    ];

    /// Heading text that opens this bucket's section.
    pub fn label(self) -> &'static str {
        match self {
            RelationBucket::Synonyms => "Synonyms",
            RelationBucket::Antonyms => "Antonyms",
            RelationBucket::Hyponyms => "Hyponyms",
            RelationBucket::Hypernyms => "Hypernyms",
            RelationBucket::Instances => "Instances",
            RelationBucket::Meronyms => "Meronyms",
            RelationBucket::Holonyms => "Holonyms",
        }
    }
}

impl fmt::Display for RelationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Relation targets keyed by bucket. Every bucket is always present so the
/// serialized shape is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relations(BTreeMap<RelationBucket, Vec<String>>);

impl Default for Relations {
    fn default() -> Self {
        Self(
            RelationBucket::ALL
                .into_iter()
                .map(|bucket| (bucket, Vec::new()))
                .collect(),
        )
    }
}

impl Relations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, bucket: RelationBucket) -> &[String] {
        self.0.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn push(&mut self, bucket: RelationBucket, target: String) {
        self.0.entry(bucket).or_default().push(target);
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Total number of targets over all buckets.
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RelationBucket, &[String])> {
        self.0.iter().map(|(bucket, targets)| (*bucket, targets.as_slice()))
    }
}

/// One classified page, the unit handed to the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntry {
    pub word: String,
    pub relations: Relations,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts_of_speech: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureKind {
    Translations,
    Pronunciation,
    Linkages,
    Compounds,
}

/// A whole section copied out of an entry page, with templates normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedSection {
    pub word: String,
    pub language: String,
    pub kind: CaptureKind,
    pub heading: String,
    pub lines: Vec<String>,
}
