//! sitelen pona code points (UCSUR block U+F1900..U+F19FF).

use crate::dictionary::{KU_SULI_WORDS, PU_WORDS};

/// First glyph code point (`a`).
pub const FIRST_GLYPH: char = '\u{F1900}';
/// First glyph code point after the original word list (`namako`).
pub const FIRST_KU_SULI_GLYPH: char = '\u{F1978}';
/// Opens a cartouche.
pub const CARTOUCHE_START: char = '\u{F1990}';
/// Closes a cartouche.
pub const CARTOUCHE_END: char = '\u{F1991}';
/// Stacks the neighbouring glyphs.
pub const STACKING_JOINER: char = '\u{F1995}';
/// Scales the neighbouring glyphs side by side.
pub const SCALING_JOINER: char = '\u{F1996}';
/// Generic joiner, also used between glyphs.
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';
/// Starts a long glyph extension.
pub const LONG_GLYPH_START: char = '\u{F1997}';
/// Ends a long glyph extension.
pub const LONG_GLYPH_END: char = '\u{F1998}';
/// sitelen pona middle dot, a sentence end.
pub const MIDDLE_DOT: char = '\u{F199C}';
/// sitelen pona colon.
pub const COLON: char = '\u{F199D}';

/// Returns the word a glyph stands for.
#[must_use]
pub fn glyph_word(glyph: char) -> Option<&'static str> {
    let code = u32::from(glyph);
    let pu = u32::from(FIRST_GLYPH);
    let ku_suli = u32::from(FIRST_KU_SULI_GLYPH);
    if (pu..ku_suli).contains(&code) {
        PU_WORDS.get(usize::try_from(code - pu).ok()?).copied()
    } else if code >= ku_suli {
        KU_SULI_WORDS.get(usize::try_from(code - ku_suli).ok()?).copied()
    } else {
        None
    }
}

/// Returns the glyph for a word.
#[must_use]
pub fn word_glyph(word: &str) -> Option<char> {
    let (start, index) = if let Some(index) = PU_WORDS.iter().position(|w| *w == word) {
        (FIRST_GLYPH, index)
    } else {
        let index = KU_SULI_WORDS.iter().position(|w| *w == word)?;
        (FIRST_KU_SULI_GLYPH, index)
    };
    char::from_u32(u32::from(start) + u32::try_from(index).ok()?)
}

/// Returns true for the three glyph joiners.
#[must_use]
pub fn is_joiner(c: char) -> bool {
    matches!(c, ZERO_WIDTH_JOINER | STACKING_JOINER | SCALING_JOINER)
}

/// Words of a glyph run, skipping joiners and spaces. `None` if a character
/// is not a known glyph.
#[must_use]
pub fn glyph_words(glyphs: &str) -> Option<Vec<String>> {
    glyphs
        .chars()
        .filter(|c| !is_joiner(*c) && !c.is_whitespace())
        .map(|c| glyph_word(c).map(str::to_string))
        .collect()
}

/// Name spelled by a cartouche: the first letter of each glyph's word,
/// capitalized.
#[must_use]
pub fn cartouche_name(words: &[String]) -> String {
    let letters: String = words.iter().filter_map(|word| word.chars().next()).collect();
    let mut chars = letters.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Maps full-width and sitelen pona punctuation to ASCII.
#[must_use]
pub fn normalize_punctuation(marks: &str) -> String {
    marks
        .chars()
        .map(|c| match c {
            '。' | '｡' | MIDDLE_DOT => ".".to_string(),
            '，' | '、' => ",".to_string(),
            '：' | COLON => ":".to_string(),
            '；' => ";".to_string(),
            '？' => "?".to_string(),
            '！' => "!".to_string(),
            '…' => "...".to_string(),
            other => other.to_string(),
        })
        .collect()
}
