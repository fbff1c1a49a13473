//! Removal of characters that can never be kanji.
//!
//! The exclusion set is fixed: the hiragana block up to ゖ, the katakana
//! block from ァ through ー (which includes ・), the punctuation
//! `。、「」（）` with the ideographic space, and ASCII letters, digits and
//! space. Everything else is kept, including characters the dictionary does
//! not know; those drop out later at lookup time.

/// Full-width punctuation removed before lookup
pub const EXCLUDED_PUNCTUATION: [char; 7] = ['。', '、', '「', '」', '\u{3000}', '（', '）'];

pub fn is_excluded(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{3096}' | '\u{30A1}'..='\u{30FC}' | ' ')
        || c.is_ascii_alphanumeric()
        || EXCLUDED_PUNCTUATION.contains(&c)
}

/// Characters of `text` outside the exclusion set, in order
pub fn in_scope_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| !is_excluded(*c))
}

pub fn filter_in_scope(text: &str) -> String {
    in_scope_chars(text).collect()
}
