use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// Canonical language names as they appear in level-2 headings of
/// Wiktionary entry pages.
const LANGUAGE_NAMES: &[&str] = &[
    "Abaza",
    "Abkhaz",
    "Acehnese",
    "Acholi",
    "Adyghe",
    "Afar",
    "Afrikaans",
    "Ainu",
    "Akan",
    "Akkadian",
    "Albanian",
    "Alemannic German",
    "Aleut",
    "Amharic",
    "Ancient Greek",
    "Arabic",
    "Aragonese",
    "Aramaic",
    "Armenian",
    "Aromanian",
    "Assamese",
    "Asturian",
    "Avar",
    "Aymara",
    "Azerbaijani",
    "Balinese",
    "Balochi",
    "Bambara",
    "Bashkir",
    "Basque",
    "Bavarian",
    "Belarusian",
    "Bengali",
    "Bikol Central",
    "Bislama",
    "Bosnian",
    "Breton",
    "Buginese",
    "Bulgarian",
    "Burmese",
    "Buryat",
    "Catalan",
    "Cebuano",
    "Central Atlas Tamazight",
    "Central Kurdish",
    "Chamorro",
    "Chechen",
    "Cherokee",
    "Cheyenne",
    "Chichewa",
    "Chinese",
    "Chuvash",
    "Classical Nahuatl",
    "Classical Syriac",
    "Coptic",
    "Cornish",
    "Corsican",
    "Cree",
    "Crimean Tatar",
    "Croatian",
    "Czech",
    "Dalmatian",
    "Danish",
    "Dhivehi",
    "Dutch",
    "Dzongkha",
    "Eastern Mari",
    "Egyptian",
    "Elfdalian",
    "Emilian",
    "English",
    "Erzya",
    "Esperanto",
    "Estonian",
    "Etruscan",
    "Ewe",
    "Extremaduran",
    "Faroese",
    "Fijian",
    "Finnish",
    "French",
    "Friulian",
    "Fula",
    "Galician",
    "Gallurese",
    "Ganda",
    "Gaulish",
    "Georgian",
    "German",
    "German Low German",
    "Gilbertese",
    "Gothic",
    "Greek",
    "Greenlandic",
    "Guaraní",
    "Gujarati",
    "Haitian Creole",
    "Hakka",
    "Hausa",
    "Hawaiian",
    "Hebrew",
    "Higaonon",
    "Hiligaynon",
    "Hindi",
    "Hittite",
    "Hmong",
    "Hungarian",
    "Icelandic",
    "Ido",
    "Igbo",
    "Ilocano",
    "Indonesian",
    "Ingrian",
    "Ingush",
    "Interlingua",
    "Interlingue",
    "Inuktitut",
    "Irish",
    "Istriot",
    "Italian",
    "Japanese",
    "Javanese",
    "Judeo-Spanish",
    "Kabardian",
    "Kabyle",
    "Kalmyk",
    "Kannada",
    "Kanuri",
    "Kapampangan",
    "Karachay-Balkar",
    "Karakalpak",
    "Karelian",
    "Kashmiri",
    "Kashubian",
    "Kazakh",
    "Khmer",
    "Kikuyu",
    "Kinyarwanda",
    "Komi-Permyak",
    "Komi-Zyrian",
    "Kongo",
    "Korean",
    "Kumyk",
    "Kurmanji",
    "Kyrgyz",
    "Ladin",
    "Lakota",
    "Lao",
    "Latgalian",
    "Latin",
    "Latvian",
    "Laz",
    "Lezgi",
    "Ligurian",
    "Limburgish",
    "Lingala",
    "Lithuanian",
    "Livonian",
    "Lojban",
    "Lombard",
    "Low German",
    "Lower Sorbian",
    "Luxembourgish",
    "Macedonian",
    "Maguindanao",
    "Malagasy",
    "Malay",
    "Malayalam",
    "Maltese",
    "Manchu",
    "Mandarin",
    "Manx",
    "Maori",
    "Mapudungun",
    "Marathi",
    "Middle Dutch",
    "Middle English",
    "Middle French",
    "Middle High German",
    "Middle Irish",
    "Middle Low German",
    "Min Nan",
    "Mirandese",
    "Moksha",
    "Mongolian",
    "Nahuatl",
    "Nauruan",
    "Navajo",
    "Neapolitan",
    "Nepali",
    "Nivkh",
    "Norman",
    "Norn",
    "North Frisian",
    "Northern Kurdish",
    "Northern Sami",
    "Norwegian",
    "Norwegian Bokmål",
    "Norwegian Nynorsk",
    "Novial",
    "Occitan",
    "Ojibwe",
    "Old Church Slavonic",
    "Old Dutch",
    "Old East Slavic",
    "Old English",
    "Old French",
    "Old Frisian",
    "Old High German",
    "Old Irish",
    "Old Norse",
    "Old Occitan",
    "Old Polish",
    "Old Portuguese",
    "Old Saxon",
    "Old Spanish",
    "Oriya",
    "Oromo",
    "Ossetian",
    "Ottoman Turkish",
    "Pali",
    "Pangasinan",
    "Papiamentu",
    "Pashto",
    "Pennsylvania German",
    "Persian",
    "Phoenician",
    "Piedmontese",
    "Pitjantjatjara",
    "Plautdietsch",
    "Polish",
    "Portuguese",
    "Proto-Germanic",
    "Proto-Indo-European",
    "Proto-Slavic",
    "Punjabi",
    "Quechua",
    "Rapa Nui",
    "Romagnol",
    "Romani",
    "Romanian",
    "Romansch",
    "Russian",
    "Rusyn",
    "Rwanda-Rundi",
    "Sakha",
    "Samoan",
    "Sanskrit",
    "Sardinian",
    "Saterland Frisian",
    "Scots",
    "Scottish Gaelic",
    "Serbo-Croatian",
    "Shona",
    "Sicilian",
    "Silesian",
    "Sindhi",
    "Sinhalese",
    "Skolt Sami",
    "Slovak",
    "Slovene",
    "Somali",
    "Sorbian",
    "Sotho",
    "Southern Altai",
    "Southern Sami",
    "Spanish",
    "Sranan Tongo",
    "Sumerian",
    "Sundanese",
    "Swahili",
    "Swazi",
    "Swedish",
    "Swiss German",
    "Sylheti",
    "Tabasaran",
    "Tagalog",
    "Tahitian",
    "Tajik",
    "Tamil",
    "Taos",
    "Tatar",
    "Telugu",
    "Tetum",
    "Thai",
    "Tibetan",
    "Tigrinya",
    "Tok Pisin",
    "Tongan",
    "Translingual",
    "Tsonga",
    "Tswana",
    "Tumbuka",
    "Turkish",
    "Turkmen",
    "Tuvan",
    "Twi",
    "Udmurt",
    "Ugaritic",
    "Ukrainian",
    "Upper Sorbian",
    "Urdu",
    "Uyghur",
    "Uzbek",
    "Venda",
    "Venetian",
    "Veps",
    "Vietnamese",
    "Volapük",
    "Votic",
    "Võro",
    "Walloon",
    "Waray-Waray",
    "Welsh",
    "West Frisian",
    "Western Apache",
    "Wolof",
    "Xhosa",
    "Yakut",
    "Yiddish",
    "Yoruba",
    "Yucatec Maya",
    "Yup'ik",
    "Zazaki",
    "Zealandic",
    "Zhuang",
    "Zulu",
];

static LANGUAGES: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| LANGUAGE_NAMES.iter().copied().collect());

/// Exact, case-sensitive match against the language table.
pub fn is_language(name: &str) -> bool {
    LANGUAGES.contains(name)
}

pub fn language_count() -> usize {
    LANGUAGES.len()
}
