//! Tokens produced by the tokenizer.

use std::fmt;

/// How a proper word was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProperWordKind {
    /// Capitalized Latin words (`Sonja Lang`).
    Latin,
    /// A sitelen pona cartouche, named acrophonically.
    Cartouche,
}

/// A token of toki pona text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// A single word.
    Word(String),
    /// A word spelled with one letter repeated (`aaa`, `nnn`).
    LongWord {
        /// The repeated letter as a word (`a` or `n`).
        word: String,
        /// Number of letters.
        length: usize,
    },
    /// Two or more `a` particles in a row.
    MultipleA {
        /// Number of particles.
        count: usize,
    },
    /// One word repeated (`mute mute`).
    Reduplication {
        /// The repeated word.
        word: String,
        /// Number of repetitions, at least two.
        count: usize,
    },
    /// A polar question form (`ken ala ken`).
    XAlaX {
        /// The questioned word.
        word: String,
    },
    /// A name.
    ProperWord {
        /// The name as written, words separated by single spaces.
        words: String,
        /// Writing system the name came from.
        kind: ProperWordKind,
    },
    /// Normalized punctuation; `"\n"` for a line break.
    Punctuation(String),
    /// Glyphs joined into one (`toki‍pona`).
    CombinedGlyphs {
        /// The joined words, in order.
        words: Vec<String>,
    },
    /// A long glyph extended over blank space.
    SpaceLongGlyph {
        /// Words of the extended glyph.
        words: Vec<String>,
        /// Number of space characters under the extension.
        space_length: usize,
    },
    /// A long glyph whose extension covers the following tokens.
    HeadedLongGlyphStart {
        /// Words of the extended glyph.
        words: Vec<String>,
    },
    /// The end of a headed long glyph's extension.
    HeadedLongGlyphEnd,
    /// Glyphs placed inside a long glyph's extension.
    InsideLongGlyph {
        /// Words of the inner glyph.
        words: Vec<String>,
    },
}

impl Token {
    /// Creates a word token.
    #[must_use]
    pub fn word(word: &str) -> Self {
        Self::Word(word.to_string())
    }

    /// Creates a punctuation token.
    #[must_use]
    pub fn punctuation(mark: &str) -> Self {
        Self::Punctuation(mark.to_string())
    }

    /// Returns the word if this is a plain word token.
    #[must_use]
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(word) => Some(word),
            _ => None,
        }
    }

    /// Returns true if this is the plain word `word`.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.as_word() == Some(word)
    }

    /// Returns the mark if this is punctuation.
    #[must_use]
    pub fn as_punctuation(&self) -> Option<&str> {
        match self {
            Self::Punctuation(mark) => Some(mark),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(word) => write!(f, "\"{word}\""),
            Self::LongWord { word, length } => write!(f, "\"{}\"", word.repeat(*length)),
            Self::MultipleA { count } => write!(f, "\"{}\"", vec!["a"; *count].join(" ")),
            Self::Reduplication { word, count } => {
                write!(f, "\"{}\"", vec![word.as_str(); *count].join(" "))
            }
            Self::XAlaX { word } => write!(f, "\"{word} ala {word}\""),
            Self::ProperWord { words, .. } => write!(f, "\"{words}\""),
            Self::Punctuation(mark) if mark == "\n" => write!(f, "line break"),
            Self::Punctuation(mark) => write!(f, "\"{mark}\""),
            Self::CombinedGlyphs { words } => write!(f, "combined glyphs \"{}\"", words.join(" ")),
            Self::SpaceLongGlyph { words, .. }
            | Self::HeadedLongGlyphStart { words }
            | Self::InsideLongGlyph { words } => write!(f, "long glyph \"{}\"", words.join(" ")),
            Self::HeadedLongGlyphEnd => write!(f, "end of long glyph"),
        }
    }
}
