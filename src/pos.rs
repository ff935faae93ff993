use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

/// Section headings (lowercased) mapped to a canonical part of speech.
/// Includes misspellings that occur in real headings.
const POS_HEADINGS: &[(&str, &str)] = &[
    ("abbreviation", "abbrev"),
    ("acronym", "abbrev"),
    ("adjectival", "adj_noun"),
    ("adjectival noun", "adj_noun"),
    ("adjectival verb", "adj_verb"),
    ("adjective", "adj"),
    ("adjectuve", "adj"),
    ("adjectives", "adj"),
    ("adverb", "adv"),
    ("adverbs", "adv"),
    ("adverbial phrase", "adv_phrase"),
    ("affix", "affix"),
    ("adjective suffix", "affix"),
    ("article", "article"),
    ("character", "character"),
    ("circumfix", "circumfix"),
    ("circumposition", "circumpos"),
    ("classifier", "classifier"),
    ("clipping", "abbrev"),
    ("clitic", "clitic"),
    ("command form", "cmd"),
    ("command conjugation", "cmd_conj"),
    ("combining form", "combining_form"),
    ("comparative", "adj_comp"),
    ("conjunction", "conj"),
    ("conjuntion", "conj"),
    ("contraction", "abbrev"),
    ("converb", "converb"),
    ("counter", "counter"),
    ("determiner", "det"),
    ("diacritical mark", "character"),
    ("enclitic", "clitic"),
    ("enclitic particle", "clitic"),
    ("gerund", "gerund"),
    ("glyph", "character"),
    ("han character", "character"),
    ("han characters", "character"),
    ("ideophone", "noun"),
    ("infix", "infix"),
    ("infinitive", "participle"),
    ("initialism", "abbrev"),
    ("interfix", "interfix"),
    ("interjection", "intj"),
    ("interrogative pronoun", "pron"),
    ("intransitive verb", "verb"),
    ("instransitive verb", "verb"),
    ("letter", "letter"),
    ("ligature", "character"),
    ("label", "character"),
    ("nom character", "character"),
    ("nominal nuclear clause", "clause"),
    ("νoun", "noun"),
    ("nouɲ", "noun"),
    ("noun", "noun"),
    ("nouns", "noun"),
    ("noum", "noun"),
    ("number", "num"),
    ("numeral", "num"),
    ("ordinal number", "ordinal"),
    ("participle", "participle"),
    ("particle", "particle"),
    ("past participle", "participle"),
    ("perfect expression", "participle"),
    ("perfection expression", "participle"),
    ("perfect participle", "participle"),
    ("personal pronoun", "pron"),
    ("phrasal verb", "phrasal_verb"),
    ("phrase", "phrase"),
    ("phrases", "phrase"),
    ("possessive determiner", "det"),
    ("possessive pronoun", "det"),
    ("postposition", "postp"),
    ("predicative", "predicative"),
    ("prefix", "prefix"),
    ("preposition", "prep"),
    ("prepositions", "prep"),
    ("prepositional expressions", "prep"),
    ("prepositional phrase", "prep_phrase"),
    ("prepositional pronoun", "pron"),
    ("present participle", "participle"),
    ("preverb", "verb"),
    ("pronoun", "pron"),
    ("proper noun", "name"),
    ("proper oun", "name"),
    ("proposition", "prep"),
    ("proverb", "proverb"),
    ("punctuation mark", "punct"),
    ("punctuation", "punct"),
    ("relative", "conj"),
    ("root", "root"),
    ("syllable", "character"),
    ("suffix", "suffix"),
    ("suffix form", "suffix"),
    ("symbol", "symbol"),
    ("transitive verb", "verb"),
    ("verb", "verb"),
    ("verbal noun", "noun"),
    ("verbs", "verb"),
    ("digit", "digit"),
];

static POS_MAP: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| POS_HEADINGS.iter().copied().collect());

/// Every canonical part of speech the extractor can report.
pub static PARTS_OF_SPEECH: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| POS_HEADINGS.iter().map(|(_, pos)| *pos).collect());

/// Maps a heading's text to a part of speech, ignoring case and extra spaces.
pub fn part_of_speech(heading: &str) -> Option<&'static str> {
    let key = heading
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    POS_MAP.get(key.as_str()).copied()
}
