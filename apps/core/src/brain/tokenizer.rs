//! Message tokenization.
//!
//! Splits raw text into lowercased word tokens and carries the Portuguese
//! stopword table the lexicon matcher filters against.

use regex::Regex;
use std::sync::LazyLock;

use super::normalize::strip_diacritics;

/// Stopwords for Brazilian Portuguese (stored accent-folded; callers are
/// expected to fold the candidate word before checking).
const STOPWORDS_PT: &[&str] = &[
    // articles and contractions
    "o", "a", "os", "as", "um", "uma", "uns", "umas", "ao", "aos", "do", "da", "dos", "das", "no",
    "na", "nos", "nas", "num", "numa", "pelo", "pela", "pelos", "pelas",
    // prepositions and conjunctions
    "de", "em", "por", "para", "pra", "com", "sem", "sob", "sobre", "entre", "ate", "que", "se",
    "ou", "mas", "nem", "pois", "porque", "quando", "enquanto", "como", "conforme",
    // pronouns
    "eu", "tu", "ele", "ela", "eles", "elas", "voce", "voces", "vc", "vcs", "me", "te", "lhe",
    "lhes", "meu", "minha", "meus", "minhas", "seu", "sua", "seus", "suas", "teu", "tua", "este",
    "esta", "estes", "estas", "esse", "essa", "esses", "essas", "isso", "isto", "aquele", "aquela",
    "aquilo", "algum", "alguma", "nenhum", "nenhuma", "todo", "toda", "todos", "todas", "outro",
    "outra", "outros", "outras",
    // interrogatives (structural signal, not semantic content)
    "qual", "quais", "quem", "onde", "quanto", "quantos", "quanta", "quantas",
    // high-frequency verb forms and auxiliaries
    "ser", "sou", "sao", "era", "eram", "foi", "foram", "sera", "serao", "seria", "estar", "estou",
    "esta", "estao", "estava", "ter", "tenho", "tem", "tinha", "teve", "haver", "ha", "havia",
    "ir", "vou", "vai", "vamos", "fui", "pode", "podem", "posso", "podia", "quero", "queria",
    "gostaria", "preciso", "precisa", "deve", "devo",
    // discourse fillers
    "sim", "nao", "ja", "ainda", "tambem", "so", "apenas", "muito", "muita", "muitos", "muitas",
    "mais", "menos", "bem", "mal", "aqui", "ali", "la", "agora", "depois", "antes", "entao",
    "favor", "obrigado", "obrigada", "ola", "oi",
];

static WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w{2,}").expect("Invalid regex: word run pattern"));

/// Splits text into lowercase word tokens.
///
/// A token is a maximal run of word characters (Unicode letters, digits,
/// underscore) of length >= 2. Purely numeric runs are dropped. Empty or
/// punctuation-only input yields an empty vec; there are no error cases.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RUN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .filter(|token| !token.chars().all(|c| c.is_numeric()))
        .collect()
}

/// Checks the stopword table. The comparison is accent-insensitive so that
/// "não"/"nao" and "você"/"voce" hit the same entry.
pub fn is_stopword(word: &str) -> bool {
    let folded = strip_diacritics(&word.to_lowercase());
    STOPWORDS_PT.contains(&folded.as_str())
}
