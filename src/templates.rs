use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// What the normalizer does with a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateAction {
    /// Replace with a literal; `\1` stands for the first positional argument
    Replace(&'static str),
    /// Replace with the n-th positional argument (1-based)
    Arg(usize),
    /// Remove without a trace
    Drop,
}

/// Templates replaced by a phrase.
pub const REPLACE_TEMPLATES: &[(&str, &str)] = &[
    ("en dash", " - "),
    ("em dash", " - "),
    ("ndash", " - "),
    ("\\", " / "),
    ("...", "..."),
    ("BCE", "BCE"),
    ("B.C.E.", "B.C.E."),
    ("CE", "CE"),
    ("C.E.", "C.E."),
    ("BC", "BC"),
    ("B.C.", "B.C."),
    ("A.D.", "A.D."),
    ("AD", "AD"),
    ("Latn-def", "latin character"),
    ("sumti", "x\\1"),
    ("inflection of", "inflection of \\1"),
    ("initialism of", "initialism of \\1"),
    ("synonym of", "synonym of \\1"),
    ("given name", "\\1 given name"),
    ("forename", "\\1 given name"),
    ("historical given name", "\\1 given name"),
    ("surname", "surname"),
    ("taxon", "taxonomic \\1"),
    ("SI-unit", "unit of measurement"),
    ("SI-unit-abb2", "unit of measurement"),
    ("SI-unit-2", "unit of measurement"),
    ("SI-unit-np", "unit of measurement"),
    ("gloss", "(\\1)"),
];

/// Templates replaced by their first positional argument.
pub const ARG1_TEMPLATES: &[&str] = &[
    "...", "Br. English form of", "W", "Wikipedia", "abb", "abbreviation of", "abbreviation",
    "acronym of", "agent noun of", "alt form of", "alt form", "alt-form", "alt-sp", "altcaps",
    "alternate form of", "alternate spelling of", "alternative capitalisation of",
    "alternative capitalization of", "alternative case form of", "alternative form of",
    "alternative name of", "alternative plural of", "alternative spelling of",
    "alternative term for", "alternative typography of", "altform", "altspell", "altspelling",
    "apocopic form of", "archaic form of", "archaic spelling of", "aspirate mutation of",
    "attributive form of", "attributive of", "caret notation of", "clip", "clipping of",
    "clipping", "common misspelling of", "comparative of", "contraction of", "dated form of",
    "dated spelling of", "deliberate misspelling of", "diminutive of", "ellipsis of",
    "ellipse of", "elongated form of", "en-archaic second-person singular of",
    "en-archaic third-person singular of", "en-comparative of", "en-irregular plural of",
    "en-past of", "en-second person singular past of", "en-second-person singular past of",
    "en-simple past of", "en-superlative of", "en-third person singular of",
    "en-third-person singular of", "euphemistic form of", "euphemistic spelling of",
    "eye dialect of", "eye dialect", "eye-dialect of", "femine of", "feminine noun of",
    "feminine plural of", "feminine singular of", "form of", "former name of", "gerund of",
    "hard mutation of", "honoraltcaps", "imperative of", "informal form of",
    "informal spelling of", "ja-l", "ja-r", "lenition of", "masculine plural of",
    "masculine singular of", "misconstruction of", "misspelling of", "mixed mutation of", "n-g",
    "native or resident of", "nb...", "neuter plural of", "neuter singular of", "ngd", "nobr",
    "nominative plural of", "non-gloss definition", "non-gloss", "nonstandard form of",
    "nonstandard spelling of", "nowrap", "obsolete form of", "obsolete spelling of",
    "obsolete typography of", "overwrite", "past of", "past sense of", "past tense of",
    "pedlink", "plural form of", "plural of", "present of", "present particle of",
    "present tense of", "pronunciation spelling of", "pronunciation spelling",
    "pronunciation respelling of", "rare form of", "rare spelling of", "rareform",
    "second person singular past of", "second-person singular of",
    "second-person singular past of", "short for", "short form of", "short of",
    "singular form of", "singular of", "slim-wikipedia", "soft mutation of", "standard form of",
    "standard spelling of", "standspell", "sub", "sup", "superlative of",
    "superseded spelling of", "swp", "taxlink", "taxlinknew", "uncommon spelling of",
    "unsupported", "verb", "vern", "w", "wikipedia", "wikisaurus", "wikispecies", "zh-m",
];

/// Templates replaced by their second positional argument. Most take a
/// language code first.
pub const ARG2_TEMPLATES: &[&str] = &["zh-l", "ja-l", "l", "defn", "w", "m", "mention"];

/// Templates replaced by their third positional argument.
pub const ARG3_TEMPLATES: &[&str] = &["w2"];

/// Templates dropped from cleaned text.
pub const IGNORED_TEMPLATES: &[&str] = &[
    "-", "=", "*", "!", ",", "...", "AD", "BCE", "B.C.E.", "Book-B", "C.", "CE", "C.E.", "BC",
    "B.C.", "A.D.", "Clade", "CURRENTYEAR", "EtymOnLine", "EtymOnline", "IPAchar", "LR",
    "PAGENAME", "Q", "Webster 1913", "\\", "abbreviation-old", "af", "affix", "altcaps",
    "anchor", "ante", "attention", "attn", "bor", "borrowed", "bottom", "bottom2", "bottom3",
    "bottom4", "bullet", "checksense", "circa", "circa2", "cite", "cite book", "Cite news",
    "cite news", "cite-book", "cite-journal", "cite-magazine", "cite-news", "cite-newgroup",
    "cite-song", "cite-text", "cite-video", "cite-web", "cite web", "cog", "col-top",
    "col-bottom", "datedef", "def-date", "defdate", "defdt", "defn", "der", "der-bottom",
    "der-bottom2", "der-bottom3", "der-bottom4", "der-mid2", "der-mid3", "der-mid4", "der-mid",
    "derived", "dot", "doublet", "eggcorn of", "ellipsis", "em dash", "en dash", "etyl",
    "example needed", "examples", "examples-right", "frac", "g", "gloss-stub", "glossary",
    "hyp2", "hyp-top", "hyp-mid", "hyp-mid3", "hyp-bottom3", "hyp-bottom", "inh", "inherited",
    "interwiktionary", "ISO 639", "jump", "katharevousa", "ko-inline", "lang", "list", "ll",
    "lookfrom", "m", "mention", "mid2", "mid3", "mid4", "middot", "multiple images", "nb...",
    "nbsp", "ndash", "no entry", "noncog", "noncognate", "nowrap", "nuclide", "overline",
    "phrasebook", "pedia", "pedialite", "picdic", "picdiclabel", "picdiclabel/new", "pos_v",
    "post", "quote-book", "quote-journal", "quote-magazine", "quote-news", "quote-newsgroup",
    "quote-song", "quote-text", "quote-video", "quote-web", "redirect", "rel-bottom", "rel-mid",
    "rel-mid2", "rel-mid3", "rel-mid4", "rfap", "rfc", "rfc-auto", "rfc-def", "rfc-header",
    "rfc-level", "rfc-subst", "rfc-tsort", "rfc-sense", "rfcite-sense", "rfd-redundant",
    "rfd-sense", "rfdate", "rfdatek", "rfdef", "rfe", "rfex", "rfexample", "rfm-sense",
    "rfgloss", "rfquote", "rfquote-sense", "rfquotek", "rft-sense", "rfv-sense", "rhymes",
    "see", "see also", "seeCites", "seemoreCites", "seemorecites", "seeMoreCites",
    "seeSynonyms", "sic", "smallcaps", "soplink", "spndash", "stroke order", "stub-gloss",
    "sub", "suffixsee", "sup", "syndiff", "t-check", "t+check", "table:colors/fi", "top2",
    "top3", "top4", "translation only", "trans-mid", "trans-bottom", "uncertain", "unk",
    "unsupported", "used in phrasal verbs", "was wotd", "wikisource1911Enc", "wikivoyage", "ws",
    "ws link", "zh-hg",
];

/// A name listed under several actions keeps the one with the highest
/// precedence: phrase, then first, second, third argument, then drop.
static TEMPLATE_ACTIONS: Lazy<FxHashMap<&'static str, TemplateAction>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    for (name, replacement) in REPLACE_TEMPLATES {
        map.entry(*name).or_insert(TemplateAction::Replace(*replacement));
    }
    for (n, names) in [(1, ARG1_TEMPLATES), (2, ARG2_TEMPLATES), (3, ARG3_TEMPLATES)] {
        for name in names {
            map.entry(*name).or_insert(TemplateAction::Arg(n));
        }
    }
    for name in IGNORED_TEMPLATES {
        map.entry(*name).or_insert(TemplateAction::Drop);
    }
    map
});

/// Looks up the action for a template name as written in wikitext.
///
/// Underscores count as spaces and the first letter is case-insensitive, the
/// way MediaWiki resolves template titles.
pub fn action_for(name: &str) -> Option<TemplateAction> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    if name.contains('_') {
        let spaced = name.replace('_', " ");
        return lookup(&spaced);
    }
    lookup(name)
}

fn lookup(name: &str) -> Option<TemplateAction> {
    if let Some(action) = TEMPLATE_ACTIONS.get(name) {
        return Some(*action);
    }
    let mut chars = name.chars();
    let first = chars.next()?;
    let flipped: String = if first.is_uppercase() {
        first.to_lowercase().chain(chars).collect()
    } else {
        first.to_uppercase().chain(chars).collect()
    };
    TEMPLATE_ACTIONS.get(flipped.as_str()).copied()
}

/// Number of distinct template names with an action.
pub fn known_template_count() -> usize {
    TEMPLATE_ACTIONS.len()
}
