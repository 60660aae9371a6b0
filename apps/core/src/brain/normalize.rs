//! Text normalization helpers shared by the brain components.
//!
//! Two deliberately distinct normalizations exist:
//! - [`normalize_for_lexicon`]: diacritic folding + naive singularization,
//!   used by the lexicon matcher.
//! - [`normalize_for_patterns`]: diacritic folding only, used by the intent
//!   classifier so its patterns match accent-insensitively but against the
//!   grammatically literal sentence.
//!
//! The asymmetry mirrors the behavior of the production service this engine
//! replaces; it is kept as two named functions pending product-owner
//! confirmation that it is intentional.

/// Minimum length (in chars) for a word to be singularized.
/// 2-3 letter function words ("dos", "mas") must never lose their final "s".
const SINGULARIZE_MIN_LEN: usize = 4;

/// Replaces the Portuguese accented characters with their ASCII base form.
///
/// Only the accents that actually occur in pt-BR text are folded; anything
/// else passes through unchanged.
pub fn strip_diacritics(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            _ => c,
        })
        .collect()
}

/// Normalization applied to individual tokens before lexicon lookup:
/// lowercase, fold diacritics, then drop a trailing "s" from words of
/// [`SINGULARIZE_MIN_LEN`] chars or more (naive plural reduction).
pub fn normalize_for_lexicon(word: &str) -> String {
    let mut normalized = strip_diacritics(&word.to_lowercase());
    if normalized.chars().count() >= SINGULARIZE_MIN_LEN && normalized.ends_with('s') {
        normalized.pop();
    }
    normalized
}

/// Normalization applied to the whole message before intent pattern
/// matching: lowercase + diacritic folding, nothing else. Singularizing
/// here would corrupt the verb conjugations the patterns anchor on.
pub fn normalize_for_patterns(text: &str) -> String {
    strip_diacritics(&text.to_lowercase())
}
