//! Word definitions consulted by the grammar.
//!
//! The grammar only needs to know which grammatical roles a word can play;
//! glosses are carried for front ends but never read by the parser.

use std::collections::HashMap;
use std::fmt;

/// Grammatical role a word can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// Structural particle (`li`, `e`, `pi`, ...).
    Particle,
    /// Content word usable as a head or modifier.
    Content,
    /// Word that can precede a verb phrase (`wile`, `ken`, ...).
    Preverb,
    /// Word that can head a prepositional phrase.
    Preposition,
    /// Number word with its value.
    Number(u32),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Particle => write!(f, "particle"),
            Self::Content => write!(f, "content word"),
            Self::Preverb => write!(f, "preverb"),
            Self::Preposition => write!(f, "preposition"),
            Self::Number(value) => write!(f, "number ({value})"),
        }
    }
}

/// One grammatical definition of a word.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Definition {
    /// Role the word plays under this definition.
    pub category: Category,
    /// Optional short translation.
    pub gloss: Option<String>,
}

impl Definition {
    /// Creates a definition without a gloss.
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category,
            gloss: None,
        }
    }

    /// Builder method to attach a gloss.
    #[must_use]
    pub fn with_gloss(mut self, gloss: impl Into<String>) -> Self {
        self.gloss = Some(gloss.into());
        self
    }
}

/// Words in the sitelen pona code point order.
pub(crate) const PU_WORDS: [&str; 120] = [
    "a", "akesi", "ala", "alasa", "ale", "anpa", "ante", "anu", "awen", "e", "en", "esun", "ijo",
    "ike", "ilo", "insa", "jaki", "jan", "jelo", "jo", "kala", "kalama", "kama", "kasi", "ken",
    "kepeken", "kili", "kiwen", "ko", "kon", "kule", "kulupu", "kute", "la", "lape", "laso", "lawa",
    "len", "lete", "li", "lili", "linja", "lipu", "loje", "lon", "luka", "lukin", "lupa", "ma",
    "mama", "mani", "meli", "mi", "mije", "moku", "moli", "monsi", "mu", "mun", "musi", "mute",
    "nanpa", "nasa", "nasin", "nena", "ni", "nimi", "noka", "o", "olin", "ona", "open", "pakala",
    "pali", "palisa", "pan", "pana", "pi", "pilin", "pimeja", "pini", "pipi", "poka", "poki",
    "pona", "pu", "sama", "seli", "selo", "seme", "sewi", "sijelo", "sike", "sin", "sina",
    "sinpin", "sitelen", "sona", "soweli", "suli", "suno", "supa", "suwi", "tan", "taso", "tawa",
    "telo", "tenpo", "toki", "tomo", "tu", "unpa", "uta", "utala", "walo", "wan", "waso", "wawa",
    "weka", "wile",
];

/// Later words with their own code points, in code point order.
pub(crate) const KU_SULI_WORDS: [&str; 17] = [
    "namako", "kin", "oko", "kipisi", "leko", "monsuta", "tonsi", "jasima", "kijetesantakalu",
    "soko", "meso", "epiku", "kokosila", "lanpan", "n", "misikeke", "ku",
];

const PARTICLES: [&str; 11] = ["a", "e", "en", "la", "li", "o", "pi", "anu", "taso", "kin", "n"];

/// Particles that never act as content words.
const PURE_PARTICLES: [&str; 9] = ["a", "e", "en", "la", "li", "o", "pi", "anu", "n"];

const PREVERBS: [&str; 9] = ["alasa", "awen", "kama", "ken", "lukin", "open", "pini", "sona", "wile"];

const PREPOSITIONS: [&str; 5] = ["kepeken", "lon", "sama", "tan", "tawa"];

const NUMBERS: [(&str, u32); 6] = [
    ("wan", 1),
    ("tu", 2),
    ("luka", 5),
    ("mute", 20),
    ("ale", 100),
    ("ali", 100),
];

/// Word to definitions lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, Vec<Definition>>,
}

impl Dictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in toki pona lexicon.
    #[must_use]
    pub fn toki_pona() -> Self {
        let mut dictionary = Self::new();
        for word in PU_WORDS.iter().chain(KU_SULI_WORDS.iter()).chain(["ali"].iter()) {
            if !PURE_PARTICLES.contains(word) {
                dictionary.insert(word, Definition::new(Category::Content));
            }
        }
        for word in PARTICLES {
            dictionary.insert(word, Definition::new(Category::Particle));
        }
        for word in PREVERBS {
            dictionary.insert(word, Definition::new(Category::Preverb));
        }
        for word in PREPOSITIONS {
            dictionary.insert(word, Definition::new(Category::Preposition));
        }
        for (word, value) in NUMBERS {
            dictionary.insert(word, Definition::new(Category::Number(value)));
        }
        dictionary
    }

    /// Returns every definition of `word`.
    #[must_use]
    pub fn lookup(&self, word: &str) -> &[Definition] {
        self.entries.get(word).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns true if `word` has any definition.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Returns true if `word` can play `category`.
    #[must_use]
    pub fn has_category(&self, word: &str, category: Category) -> bool {
        self.lookup(word)
            .iter()
            .any(|definition| definition.category == category)
    }

    /// Returns true if `word` is a content word.
    #[must_use]
    pub fn is_content_word(&self, word: &str) -> bool {
        self.has_category(word, Category::Content)
    }

    /// Returns true if `word` can be a preverb.
    #[must_use]
    pub fn is_preverb(&self, word: &str) -> bool {
        self.has_category(word, Category::Preverb)
    }

    /// Returns true if `word` can head a prepositional phrase.
    #[must_use]
    pub fn is_preposition(&self, word: &str) -> bool {
        self.has_category(word, Category::Preposition)
    }

    /// Returns the numeric value of a number word.
    #[must_use]
    pub fn number_value(&self, word: &str) -> Option<u32> {
        self.lookup(word)
            .iter()
            .find_map(|definition| match definition.category {
                Category::Number(value) => Some(value),
                _ => None,
            })
    }

    /// Adds a definition, ignoring exact duplicates.
    pub fn insert(&mut self, word: &str, definition: Definition) {
        let definitions = self.entries.entry(word.to_string()).or_default();
        if !definitions.contains(&definition) {
            definitions.push(definition);
        }
    }

    /// Removes a word and returns its definitions.
    pub fn remove(&mut self, word: &str) -> Option<Vec<Definition>> {
        self.entries.remove(word)
    }

    /// Number of defined words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
