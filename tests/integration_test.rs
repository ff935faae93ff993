//! Integration tests for the Wikilex extraction pipeline.
//!
//! These tests drive the full flow from BZ2-compressed (or raw) XML input to
//! the records handed to a sink. Tests are organized into sections:
//!
//! - **Parser Tests** -- Page assembly, BZ2 detection, namespaced tags
//! - **Extraction Tests** -- Relation entries, redirects, limits, JSON lines
//! - **Capture Tests** -- Translation and pronunciation sections
//! - **Failure Tests** -- Malformed XML and broken tag nesting
//!
//! # Test Strategy
//!
//! Most tests share the `sample_xml()` fixture, a minimal Wiktionary dump with
//! a siteinfo block, two thesaurus pages, an entry page, a redirect and a
//! module page. Each test builds its own temp file so nothing is shared.
//!
//! # Sample Data
//!
//! - `Glossary:happy` -- Synonyms `glad`, Antonyms `sad`
//! - `Glossary:cat` -- Hyponyms and Meronyms in the list layout
//! - `happy` -- entry page with Pronunciation and Translations
//! - `Happy` -- redirect to `happy`
//! - `Module:links` -- Scribunto page, never an entry

use bzip2::write::BzEncoder;
use bzip2::Compression;
use std::io::{BufReader, Cursor, Read, Write};
use tempfile::NamedTempFile;
use wikilex::error::ExtractError;
use wikilex::models::AssembledPage;
use wikilex::parser::{open_dump, WikiReader};
use wikilex::{CaptureKind, CollectSink, ExtractConfig, JsonLinesSink, RelationBucket};

/// Helper: create a BZ2-compressed XML file from a string and return the temp file handle.
fn create_bz2_xml(xml: &str) -> NamedTempFile {
    let mut encoder = BzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(xml.as_bytes()).unwrap();
    let compressed = encoder.finish().unwrap();

    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(&compressed).unwrap();
    tmp.flush().unwrap();
    tmp
}

fn create_raw_xml(xml: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(xml.as_bytes()).unwrap();
    tmp.flush().unwrap();
    tmp
}

fn glossary() -> ExtractConfig {
    ExtractConfig::default().with_target_namespaces(["Glossary"])
}

/// Sample Wiktionary XML with thesaurus pages, an entry page, a redirect and
/// a module page.
fn sample_xml() -> &'static str {
    r#"<mediawiki xmlns="http://www.mediawiki.org/xml/export-0.10/" version="0.10" xml:lang="en">
  <siteinfo>
    <sitename>Wiktionary</sitename>
    <dbname>enwiktionary</dbname>
    <generator>MediaWiki 1.42</generator>
    <case>case-sensitive</case>
    <namespaces>
      <namespace key="0" case="case-sensitive" />
      <namespace key="828" case="case-sensitive">Module</namespace>
      <namespace key="110" case="case-sensitive">Glossary</namespace>
    </namespaces>
  </siteinfo>
  <page>
    <title>Glossary:happy</title>
    <ns>110</ns>
    <id>10</id>
    <revision>
      <id>1000</id>
      <parentid>999</parentid>
      <timestamp>2024-01-15T10:30:00Z</timestamp>
      <contributor>
        <username>Editor</username>
        <id>77</id>
      </contributor>
      <comment>tidy</comment>
      <model>wikitext</model>
      <format>text/x-wiki</format>
      <text bytes="64" xml:space="preserve">===Synonyms===
{{l|en|glad}}
===Antonyms===
{{l|en|sad}}</text>
      <sha1>abc</sha1>
    </revision>
  </page>
  <page>
    <title>Glossary:cat</title>
    <ns>110</ns>
    <id>11</id>
    <revision>
      <id>1001</id>
      <model>wikitext</model>
      <format>text/x-wiki</format>
      <text xml:space="preserve">==English==
===Noun===
====Sense: feline====
=====Hyponyms=====
{{ws beginlist}}
{{ws|kitten}}
{{ws|tomcat}}
{{ws endlist}}
=====Meronyms=====
{{ws beginlist}}
{{ws|whisker}}
{{ws endlist}}
=====Various=====
{{ws|not a relation}}</text>
    </revision>
  </page>
  <page>
    <title>happy</title>
    <ns>0</ns>
    <id>12</id>
    <revision>
      <id>1002</id>
      <model>wikitext</model>
      <format>text/x-wiki</format>
      <text xml:space="preserve">==English==
===Pronunciation===
* {{IPA|en|/ˈhæpi/}}
===Adjective===
# Feeling joy.
====Translations====
* Finnish: iloinen
==Finnish==
===Pronunciation===
* hap</text>
    </revision>
  </page>
  <page>
    <title>Happy</title>
    <ns>0</ns>
    <id>13</id>
    <redirect title="happy" />
    <revision>
      <id>1003</id>
      <model>wikitext</model>
      <format>text/x-wiki</format>
      <text xml:space="preserve">#REDIRECT [[happy]]</text>
    </revision>
  </page>
  <page>
    <title>Module:links</title>
    <ns>828</ns>
    <id>14</id>
    <revision>
      <id>1004</id>
      <model>Scribunto</model>
      <format>text/plain</format>
      <text xml:space="preserve">local export = {}</text>
    </revision>
  </page>
</mediawiki>"#
}

// ---------------------------------------------------------------------------
// Parser Tests
// ---------------------------------------------------------------------------

#[test]
fn parser_reads_all_pages() {
    let tmp = create_bz2_xml(sample_xml());
    let reader = open_dump(tmp.path()).unwrap();
    let pages: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
    assert_eq!(pages.len(), 5);
}

#[test]
fn parser_classifies_page_kinds() {
    let tmp = create_bz2_xml(sample_xml());
    let pages: Vec<AssembledPage> = open_dump(tmp.path())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    let articles = pages
        .iter()
        .filter(|p| matches!(p, AssembledPage::Article(_)))
        .count();
    assert_eq!(articles, 3);
    assert!(pages
        .iter()
        .any(|p| matches!(p, AssembledPage::Redirect(r) if r.from == "Happy" && r.to == "happy")));
    assert!(pages
        .iter()
        .any(|p| matches!(p, AssembledPage::NonText { model, .. } if model == "Scribunto")));
}

#[test]
fn parser_keeps_page_id_over_revision_and_contributor_ids() {
    let tmp = create_bz2_xml(sample_xml());
    let first = open_dump(tmp.path()).unwrap().next().unwrap().unwrap();
    match first {
        AssembledPage::Article(record) => {
            assert_eq!(record.title, "Glossary:happy");
            assert_eq!(record.page_id.as_deref(), Some("10"));
            assert_eq!(record.content_model.as_deref(), Some("wikitext"));
        }
        other => panic!("expected article, got {:?}", other),
    }
}

#[test]
fn parser_records_siteinfo_namespaces() {
    let tmp = create_bz2_xml(sample_xml());
    let mut reader = open_dump(tmp.path()).unwrap();
    reader.next().unwrap().unwrap();
    let namespaces = reader.assembler().namespaces();
    assert_eq!(namespaces.get("110").map(String::as_str), Some("Glossary"));
    assert_eq!(namespaces.get("0").map(String::as_str), Some(""));
}

#[test]
fn parser_reads_raw_xml() {
    let tmp = create_raw_xml(sample_xml());
    let reader = open_dump(tmp.path()).unwrap();
    assert_eq!(reader.count(), 5);
}

#[test]
fn parser_accepts_prefixed_and_uppercase_tags() {
    let xml = r#"<mw:MEDIAWIKI xmlns:mw="http://www.mediawiki.org/xml/export-0.10/">
  <mw:Page>
    <mw:Title>Glossary:big</mw:Title>
    <mw:Revision><mw:Text>==Synonyms==
{{ws|large}}</mw:Text></mw:Revision>
  </mw:Page>
</mw:MEDIAWIKI>"#;
    let mut sink = CollectSink::new();
    wikilex::run(Cursor::new(xml), &glossary(), &mut sink).unwrap();
    assert_eq!(sink.entries.len(), 1);
    assert_eq!(sink.entries[0].word, "big");
    assert_eq!(sink.entries[0].relations.get(RelationBucket::Synonyms), ["large"]);
}

// ---------------------------------------------------------------------------
// Extraction Tests
// ---------------------------------------------------------------------------

#[test]
fn extraction_buckets_relations() {
    let tmp = create_bz2_xml(sample_xml());
    let mut sink = CollectSink::new();
    let stats = wikilex::run_path(tmp.path(), &glossary(), &mut sink).unwrap();

    assert_eq!(sink.entries.len(), 2);
    let happy = &sink.entries[0];
    assert_eq!(happy.word, "happy");
    assert_eq!(happy.relations.get(RelationBucket::Synonyms), ["glad"]);
    assert_eq!(happy.relations.get(RelationBucket::Antonyms), ["sad"]);
    for bucket in [
        RelationBucket::Hyponyms,
        RelationBucket::Hypernyms,
        RelationBucket::Instances,
        RelationBucket::Meronyms,
        RelationBucket::Holonyms,
    ] {
        assert!(happy.relations.get(bucket).is_empty());
    }

    let cat = &sink.entries[1];
    assert_eq!(cat.word, "cat");
    assert_eq!(cat.relations.get(RelationBucket::Hyponyms), ["kitten", "tomcat"]);
    assert_eq!(cat.relations.get(RelationBucket::Meronyms), ["whisker"]);
    assert_eq!(cat.relations.len(), 3);
    assert_eq!(cat.parts_of_speech, vec!["noun"]);

    assert_eq!(stats.pages(), 5);
    assert_eq!(stats.entries(), 2);
    assert_eq!(stats.relations(), 5);
    assert_eq!(stats.non_text(), 1);
}

#[test]
fn extraction_skips_redirects_by_default() {
    let tmp = create_bz2_xml(sample_xml());
    let mut sink = CollectSink::new();
    let stats = wikilex::run_path(tmp.path(), &glossary(), &mut sink).unwrap();
    assert!(sink.redirects.is_empty());
    assert_eq!(stats.redirects(), 0);
    assert_eq!(stats.redirects_skipped(), 1);
}

#[test]
fn extraction_emits_redirects_when_enabled() {
    let tmp = create_bz2_xml(sample_xml());
    let mut sink = CollectSink::new();
    let config = glossary().with_redirects(true);
    let stats = wikilex::run_path(tmp.path(), &config, &mut sink).unwrap();
    assert_eq!(sink.redirects.len(), 1);
    assert_eq!(sink.redirects[0].from, "Happy");
    assert_eq!(sink.redirects[0].to, "happy");
    assert_eq!(stats.redirects(), 1);
}

#[test]
fn extraction_respects_limit() {
    let tmp = create_bz2_xml(sample_xml());
    let mut sink = CollectSink::new();
    let config = glossary().with_limit(Some(1));
    let stats = wikilex::run_path(tmp.path(), &config, &mut sink).unwrap();
    assert_eq!(sink.entries.len(), 1);
    assert_eq!(stats.entries(), 1);
    assert_eq!(stats.pages(), 1);
}

#[test]
fn extraction_ignores_other_namespaces() {
    let tmp = create_bz2_xml(sample_xml());
    let mut sink = CollectSink::new();
    let stats = wikilex::run_path(tmp.path(), &ExtractConfig::default(), &mut sink).unwrap();
    assert!(sink.entries.is_empty());
    assert_eq!(stats.pages(), 5);
}

#[test]
fn extraction_writes_json_lines() {
    let tmp = create_bz2_xml(sample_xml());
    let out = NamedTempFile::new().unwrap();
    {
        let mut sink = JsonLinesSink::create(out.path()).unwrap();
        let config = glossary().with_redirects(true);
        wikilex::run_path(tmp.path(), &config, &mut sink).unwrap();
    }

    let content = std::fs::read_to_string(out.path()).unwrap();
    let records: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["word"], "happy");
    assert_eq!(records[0]["relations"]["Synonyms"][0], "glad");
    assert_eq!(records[0]["relations"]["Instances"].as_array().unwrap().len(), 0);
    assert_eq!(records[2]["from"], "Happy");
}

#[test]
fn unknown_tags_do_not_stop_parsing() {
    let xml = r#"<mediawiki>
  <page>
    <title>Glossary:odd</title>
    <sparkle>shiny</sparkle>
    <revision><text>==Antonyms==
{{ws|even}}</text></revision>
  </page>
  <page>
    <title>Glossary:next</title>
    <revision><text>==Synonyms==
{{ws|following}}</text></revision>
  </page>
</mediawiki>"#;
    let tmp = create_bz2_xml(xml);
    let mut sink = CollectSink::new();
    let stats = wikilex::run_path(tmp.path(), &glossary(), &mut sink).unwrap();
    assert_eq!(sink.entries.len(), 2);
    assert_eq!(sink.entries[1].relations.get(RelationBucket::Synonyms), ["following"]);
    assert_eq!(stats.unsupported_tags(), 1);
}

/// Yields a dump of `count` small pages without ever holding it in memory.
struct SyntheticDump {
    count: usize,
    next: usize,
    pending: Vec<u8>,
    offset: usize,
    closed: bool,
}

impl SyntheticDump {
    fn new(count: usize) -> Self {
        Self {
            count,
            next: 0,
            pending: b"<mediawiki>\n".to_vec(),
            offset: 0,
            closed: false,
        }
    }

    fn refill(&mut self) {
        self.offset = 0;
        self.pending.clear();
        if self.next < self.count {
            let page = format!(
                "<page><title>Glossary:w{}</title><id>{}</id><revision><id>{}</id><text>==Synonyms==\n{{{{ws|s{}}}}}\n==Antonyms==\n{{{{l|en|a{}}}}}</text></revision></page>\n",
                self.next, self.next, self.next + 1_000_000, self.next, self.next
            );
            self.pending.extend_from_slice(page.as_bytes());
            self.next += 1;
        } else if !self.closed {
            self.pending.extend_from_slice(b"</mediawiki>\n");
            self.closed = true;
        }
    }
}

impl Read for SyntheticDump {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.offset >= self.pending.len() {
            self.refill();
        }
        let available = &self.pending[self.offset..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.offset += n;
        Ok(n)
    }
}

#[test]
fn many_small_pages_stay_bounded() {
    let count = 20_000;
    let mut reader = WikiReader::new(BufReader::new(SyntheticDump::new(count)));
    let mut seen = 0;
    for page in reader.by_ref() {
        match page.unwrap() {
            AssembledPage::Article(_) => seen += 1,
            other => panic!("unexpected {:?}", other),
        }
    }
    assert_eq!(seen, count);
    assert!(reader.assembler().peak_buffered() < 128);
    assert_eq!(reader.assembler().depth(), 0);
}

#[test]
fn many_small_pages_extract_in_order() {
    let mut sink = CollectSink::new();
    let stats = wikilex::run(BufReader::new(SyntheticDump::new(2_000)), &glossary(), &mut sink).unwrap();
    assert_eq!(stats.entries(), 2_000);
    assert_eq!(sink.entries[0].word, "w0");
    assert_eq!(sink.entries[1999].word, "w1999");
    assert_eq!(sink.entries[1999].relations.get(RelationBucket::Synonyms), ["s1999"]);
    assert_eq!(sink.entries[1999].relations.get(RelationBucket::Antonyms), ["a1999"]);
}

// ---------------------------------------------------------------------------
// Capture Tests
// ---------------------------------------------------------------------------

#[test]
fn capture_translations_and_pronunciations() {
    let tmp = create_bz2_xml(sample_xml());
    let mut sink = CollectSink::new();
    let config = glossary()
        .with_translations(true)
        .with_pronunciations(true)
        .with_languages(["English"]);
    let stats = wikilex::run_path(tmp.path(), &config, &mut sink).unwrap();

    assert_eq!(sink.sections.len(), 2);
    assert_eq!(sink.sections[0].kind, CaptureKind::Pronunciation);
    assert_eq!(sink.sections[1].kind, CaptureKind::Translations);
    assert_eq!(sink.sections[1].word, "happy");
    assert_eq!(sink.sections[1].language, "English");
    assert_eq!(sink.sections[1].lines, vec!["* Finnish: iloinen"]);
    assert_eq!(stats.sections(), 2);
    // thesaurus pages still become entries
    assert_eq!(sink.entries.len(), 2);
}

#[test]
fn capture_requires_known_language() {
    let mut sink = CollectSink::new();
    let config = glossary().with_translations(true).with_languages(["Klingon"]);
    let err = wikilex::run(Cursor::new(sample_xml()), &config, &mut sink).unwrap_err();
    assert!(matches!(err, ExtractError::Config { .. }));
    assert!(sink.entries.is_empty());
}

// ---------------------------------------------------------------------------
// Failure Tests
// ---------------------------------------------------------------------------

#[test]
fn malformed_xml_is_fatal() {
    let xml = r#"<mediawiki>
  <page>
    <title>Glossary:good</title>
    <revision><text>==Synonyms==
{{ws|fine}}</text></revision>
  </page>
  <page>
    <title>Glossary:bad</title>
    <revision><text attr="unterminated>broken</text></revision>
  </page>
</mediawiki>"#;
    let tmp = create_bz2_xml(xml);
    let mut sink = CollectSink::new();
    let err = wikilex::run_path(tmp.path(), &glossary(), &mut sink).unwrap_err();
    assert!(err.is_fatal_parse_error());
    // pages before the bad region were delivered
    assert_eq!(sink.entries.len(), 1);
}

#[test]
fn mismatched_tags_are_fatal() {
    let xml = "<mediawiki><page><title>Glossary:x</title><revision><text>a</revision></text></page></mediawiki>";
    let mut sink = CollectSink::new();
    let err = wikilex::run(Cursor::new(xml), &glossary(), &mut sink).unwrap_err();
    match err {
        ExtractError::Structural { title, message, .. } => {
            assert_eq!(title.as_deref(), Some("Glossary:x"));
            assert!(message.contains("expected </text>"));
        }
        other => panic!("expected structural error, got {:?}", other),
    }
    assert!(sink.entries.is_empty());
}

#[test]
fn truncated_dump_is_fatal() {
    let full = sample_xml();
    let truncated = &full[..full.find("<title>happy</title>").unwrap()];
    let tmp = create_bz2_xml(truncated);
    let mut sink = CollectSink::new();
    let err = wikilex::run_path(tmp.path(), &glossary(), &mut sink).unwrap_err();
    assert!(err.is_fatal_parse_error());
    assert_eq!(sink.entries.len(), 2);
}
