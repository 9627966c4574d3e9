//! Syntax trees for toki pona sentences.
//!
//! Every node is an owned tree with no back references. A successful parse
//! yields one `Vec<Sentence>` per derivation.

/// Emphasis attached to a word or sentence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Emphasis {
    /// A single emphasis particle (`a`, `n`).
    Word(String),
    /// A lengthened particle (`aaa`, `nnn`).
    LongWord {
        /// The particle.
        word: String,
        /// Number of letters.
        length: usize,
    },
    /// Several `a` particles in a row.
    MultipleA {
        /// Number of particles.
        count: usize,
    },
    /// A glyph written as a long glyph.
    LongGlyph,
}

/// The smallest unit a phrase is built from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordUnit {
    /// A plain word.
    Default {
        /// The word.
        word: String,
        /// Emphasis carried by the word itself.
        emphasis: Option<Emphasis>,
    },
    /// A polar question form (`ken ala ken`).
    XAlaX {
        /// The questioned word.
        word: String,
    },
    /// A repeated word (`mute mute`).
    Reduplication {
        /// The repeated word.
        word: String,
        /// Number of repetitions.
        count: usize,
    },
    /// Two or more number words read as one number.
    Numbers(Vec<String>),
}

impl WordUnit {
    /// Creates a plain word unit.
    #[must_use]
    pub fn word(word: &str) -> Self {
        Self::Default {
            word: word.to_string(),
            emphasis: None,
        }
    }

    /// The word this unit is built on; the first word for numbers.
    #[must_use]
    pub fn head_word(&self) -> &str {
        match self {
            Self::Default { word, .. } | Self::XAlaX { word } | Self::Reduplication { word, .. } => {
                word
            }
            Self::Numbers(words) => words.first().map_or("", String::as_str),
        }
    }

    /// Returns the word if this is a plain word unit.
    #[must_use]
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Default { word, .. } => Some(word),
            _ => None,
        }
    }

    /// Returns true if this is the plain word `word`.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.as_word() == Some(word)
    }
}

/// Something that modifies a phrase head.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modifier {
    /// A word unit.
    Default(WordUnit),
    /// A name (`jan Sonja`).
    ProperWords(String),
    /// `pi` followed by a phrase.
    Pi(Phrase),
    /// An ordinal: `nanpa` followed by a phrase.
    Nanpa {
        /// The `nanpa` word unit.
        nanpa: WordUnit,
        /// The number phrase.
        phrase: Phrase,
    },
}

/// A phrase.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phrase {
    /// A head word with its modifiers.
    Default {
        /// The head.
        head: WordUnit,
        /// Modifiers, in order.
        modifiers: Vec<Modifier>,
    },
    /// A preverb applied to a phrase (`wile moku`).
    Preverb {
        /// The preverb.
        preverb: WordUnit,
        /// Modifiers of the preverb (only `ala` survives filtering).
        modifiers: Vec<Modifier>,
        /// The verb phrase.
        phrase: Box<Phrase>,
    },
    /// A prepositional phrase used as a phrase.
    Preposition(Box<Preposition>),
}

impl Phrase {
    /// Creates an unmodified phrase.
    #[must_use]
    pub fn head(head: WordUnit) -> Self {
        Self::Default {
            head,
            modifiers: Vec::new(),
        }
    }

    /// Returns true for a head word with no modifiers.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        matches!(self, Self::Default { modifiers, .. } if modifiers.is_empty())
    }

    /// Returns true for a default phrase, neither preverb nor preposition.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default { .. })
    }
}

/// A preposition with its object phrases.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Preposition {
    /// The preposition.
    pub preposition: WordUnit,
    /// Modifiers of the preposition (only `ala` survives filtering).
    pub modifiers: Vec<Modifier>,
    /// The objects.
    pub phrases: MultiplePhrases,
}

/// One or more coordinated phrases.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MultiplePhrases {
    /// A lone phrase.
    Single(Phrase),
    /// Phrases joined by `en`, `e`, `li` or `o`.
    And(Vec<MultiplePhrases>),
    /// Phrases joined by `anu`.
    Anu(Vec<MultiplePhrases>),
}

impl MultiplePhrases {
    /// Every leaf phrase, left to right.
    #[must_use]
    pub fn phrases(&self) -> Vec<&Phrase> {
        let mut phrases = Vec::new();
        self.collect_phrases(&mut phrases);
        phrases
    }

    fn collect_phrases<'a>(&'a self, out: &mut Vec<&'a Phrase>) {
        match self {
            Self::Single(phrase) => out.push(phrase),
            Self::And(items) | Self::Anu(items) => {
                for item in items {
                    item.collect_phrases(out);
                }
            }
        }
    }

    /// Returns the phrase if this is a lone phrase.
    #[must_use]
    pub fn as_single(&self) -> Option<&Phrase> {
        match self {
            Self::Single(phrase) => Some(phrase),
            _ => None,
        }
    }
}

/// The predicates of a clause.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MultiplePredicates {
    /// A lone predicate phrase.
    Single(Phrase),
    /// Predicates sharing objects and prepositions.
    Associated {
        /// The verb phrases.
        predicates: MultiplePhrases,
        /// Objects introduced by `e`.
        objects: Option<MultiplePhrases>,
        /// Trailing prepositional phrases.
        prepositions: Vec<Preposition>,
    },
    /// Predicates joined by `li` or `o`.
    And(Vec<MultiplePredicates>),
    /// Predicates joined by `anu`.
    Anu(Vec<MultiplePredicates>),
}

/// A clause.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Clause {
    /// Phrases standing alone (`toki`, `jan en soweli`).
    Phrases(MultiplePhrases),
    /// An address (`jan Sonja o`).
    Vocative(MultiplePhrases),
    /// A statement.
    Li {
        /// The subjects.
        subjects: MultiplePhrases,
        /// The predicates.
        predicates: MultiplePredicates,
        /// False for `mi` and `sina` clauses written without `li`.
        explicit_li: bool,
    },
    /// A command or wish.
    O {
        /// The addressee, if named.
        subjects: Option<MultiplePhrases>,
        /// The predicates.
        predicates: MultiplePredicates,
    },
}

/// The kind of question a sentence asks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interrogative {
    /// A content question with `seme`.
    Seme,
    /// A polar question (`x ala x`, `anu seme`).
    XAlaX,
}

/// A sentence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sentence {
    /// A sentence with at least one clause.
    Default {
        /// A leading `taso`.
        starting_particle: Option<WordUnit>,
        /// Contexts introduced with `la`, in order.
        la_clauses: Vec<Clause>,
        /// The main clause.
        final_clause: Clause,
        /// True when the sentence ends with `anu seme`.
        anu_seme: bool,
        /// Sentence-final emphasis.
        emphasis: Option<Emphasis>,
        /// The terminating punctuation, empty at the end of the text.
        punctuation: String,
        /// The question asked, if any.
        interrogative: Option<Interrogative>,
    },
    /// A sentence made only of emphasis (`a!`).
    Filler {
        /// The emphasis.
        emphasis: Emphasis,
        /// The terminating punctuation, empty at the end of the text.
        punctuation: String,
    },
}

// =============================================================================
// Word unit traversal
// =============================================================================

/// Nodes whose word units can be listed, left to right.
pub trait WordUnits {
    /// Appends every word unit in this node to `out`.
    fn collect_word_units<'a>(&'a self, out: &mut Vec<&'a WordUnit>);

    /// Every word unit in this node.
    fn word_units(&self) -> Vec<&WordUnit> {
        let mut out = Vec::new();
        self.collect_word_units(&mut out);
        out
    }
}

impl WordUnits for Modifier {
    fn collect_word_units<'a>(&'a self, out: &mut Vec<&'a WordUnit>) {
        match self {
            Self::Default(unit) => out.push(unit),
            Self::ProperWords(_) => {}
            Self::Pi(phrase) => phrase.collect_word_units(out),
            Self::Nanpa { nanpa, phrase } => {
                out.push(nanpa);
                phrase.collect_word_units(out);
            }
        }
    }
}

impl WordUnits for Phrase {
    fn collect_word_units<'a>(&'a self, out: &mut Vec<&'a WordUnit>) {
        match self {
            Self::Default { head, modifiers } => {
                out.push(head);
                for modifier in modifiers {
                    modifier.collect_word_units(out);
                }
            }
            Self::Preverb {
                preverb,
                modifiers,
                phrase,
            } => {
                out.push(preverb);
                for modifier in modifiers {
                    modifier.collect_word_units(out);
                }
                phrase.collect_word_units(out);
            }
            Self::Preposition(preposition) => preposition.collect_word_units(out),
        }
    }
}

impl WordUnits for Preposition {
    fn collect_word_units<'a>(&'a self, out: &mut Vec<&'a WordUnit>) {
        out.push(&self.preposition);
        for modifier in &self.modifiers {
            modifier.collect_word_units(out);
        }
        self.phrases.collect_word_units(out);
    }
}

impl WordUnits for MultiplePhrases {
    fn collect_word_units<'a>(&'a self, out: &mut Vec<&'a WordUnit>) {
        for phrase in self.phrases() {
            phrase.collect_word_units(out);
        }
    }
}

impl WordUnits for MultiplePredicates {
    fn collect_word_units<'a>(&'a self, out: &mut Vec<&'a WordUnit>) {
        match self {
            Self::Single(phrase) => phrase.collect_word_units(out),
            Self::Associated {
                predicates,
                objects,
                prepositions,
            } => {
                predicates.collect_word_units(out);
                if let Some(objects) = objects {
                    objects.collect_word_units(out);
                }
                for preposition in prepositions {
                    preposition.collect_word_units(out);
                }
            }
            Self::And(items) | Self::Anu(items) => {
                for item in items {
                    item.collect_word_units(out);
                }
            }
        }
    }
}

impl WordUnits for Clause {
    fn collect_word_units<'a>(&'a self, out: &mut Vec<&'a WordUnit>) {
        match self {
            Self::Phrases(phrases) | Self::Vocative(phrases) => phrases.collect_word_units(out),
            Self::Li {
                subjects,
                predicates,
                ..
            } => {
                subjects.collect_word_units(out);
                predicates.collect_word_units(out);
            }
            Self::O {
                subjects,
                predicates,
            } => {
                if let Some(subjects) = subjects {
                    subjects.collect_word_units(out);
                }
                predicates.collect_word_units(out);
            }
        }
    }
}

impl WordUnits for Sentence {
    fn collect_word_units<'a>(&'a self, out: &mut Vec<&'a WordUnit>) {
        match self {
            Self::Default {
                starting_particle,
                la_clauses,
                final_clause,
                ..
            } => {
                out.extend(starting_particle);
                for clause in la_clauses {
                    clause.collect_word_units(out);
                }
                final_clause.collect_word_units(out);
            }
            Self::Filler { .. } => {}
        }
    }
}

/// The question asked by a run of clauses, ignoring any `anu seme` tag.
///
/// A polar question form wins over `seme`.
#[must_use]
pub fn clause_interrogative<'a>(clauses: impl IntoIterator<Item = &'a Clause>) -> Option<Interrogative> {
    let mut found = None;
    for clause in clauses {
        for unit in clause.word_units() {
            match unit {
                WordUnit::XAlaX { .. } => return Some(Interrogative::XAlaX),
                unit if unit.head_word() == "seme" => found = Some(Interrogative::Seme),
                _ => {}
            }
        }
    }
    found
}
