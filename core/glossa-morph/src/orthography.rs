//! Orthographic normalization for Modern Greek surface forms.

use alloc::string::String;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical composition. All generated forms and all lookup input pass
/// through NFC before anything else touches them.
pub fn nfc(s: &str) -> String {
    s.nfc().collect()
}

/// Sigma placement: σ becomes ς word-finally, ς becomes σ anywhere else.
pub fn fix_final_sigma(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut chars = word.chars().peekable();
    while let Some(c) = chars.next() {
        let is_last = chars.peek().is_none();
        out.push(match (c, is_last) {
            ('σ', true) => 'ς',
            ('ς', false) => 'σ',
            _ => c,
        });
    }
    out
}

/// Accent- and case-insensitive lookup key: decompose, strip combining
/// marks, lowercase, fold ς to σ, recompose. Keys concatenate cleanly, so
/// `phonetic_key(stem) + phonetic_key(suffix) == phonetic_key(stem+suffix)`.
pub fn phonetic_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ς' { 'σ' } else { c })
        .nfc()
        .collect()
}

const VOWELS: &[char] = &['α', 'ε', 'η', 'ι', 'ο', 'υ', 'ω'];

pub fn starts_with_vowel(word: &str) -> bool {
    let key = phonetic_key(word);
    key.chars().next().is_some_and(|c| VOWELS.contains(&c))
}

/// Plosive onsets, the environment where final-N is retained. Covers the
/// digraphs γκ, μπ, ντ, τσ, τζ as well as the simple stops.
pub fn starts_with_plosive(word: &str) -> bool {
    let key = phonetic_key(word);
    if ["γκ", "μπ", "ντ", "τσ", "τζ"]
        .iter()
        .any(|d| key.starts_with(d))
    {
        return true;
    }
    matches!(key.chars().next(), Some('κ' | 'π' | 'τ' | 'ξ' | 'ψ'))
}
