//! Shallow sentence-structure analysis.
//!
//! Pure word-boundary presence checks against fixed word lists. The result
//! is an auxiliary signal exposed in the engine output; it does not feed
//! back into intent scoring.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::normalize::normalize_for_patterns;

/// Interrogative words and phrases (accent-folded).
const INTERROGATIVES: &[&str] = &[
    "como", "qual", "quais", "onde", "quando", "quem", "por que", "o que", "quanto", "quantos",
    "pra que",
];

/// Second-person subject pronouns, formal and chat-speak.
const SUBJECTS: &[&str] = &["voce", "voces", "vc", "vcs"];

/// Common action/state verbs worth surfacing (open list, accent-folded).
const VERBS: &[&str] = &[
    "fazer", "faz", "fazem", "agendar", "agenda", "marcar", "marca", "pagar", "paga", "funciona",
    "funcionar", "ajudar", "ajuda", "quero", "gostaria", "preciso", "consigo", "posso", "pode",
    "tem", "ter", "enviar", "envia", "cancelar", "cancela", "atender", "atende", "custa", "usar",
    "usa",
];

fn word_list_patterns(words: &'static [&'static str]) -> Vec<(&'static str, Regex)> {
    words
        .iter()
        .map(|w| {
            let pattern = format!(r"\b{}\b", regex::escape(w));
            (*w, Regex::new(&pattern).expect("Invalid word-list pattern"))
        })
        .collect()
}

static INTERROGATIVE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| word_list_patterns(INTERROGATIVES));
static SUBJECT_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| word_list_patterns(SUBJECTS));
static VERB_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| word_list_patterns(VERBS));

/// Coarse sentence form, derived by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceStructure {
    /// Interrogative word plus an explicit subject pronoun.
    InterrogativeWithSubject,
    /// Interrogative word without a subject pronoun.
    Interrogative,
    /// No interrogative word, but the sentence ends with "?".
    QuestionImplicit,
    /// Ends with "!".
    Exclamation,
    /// Everything else.
    Statement,
}

/// Structural signals extracted from one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralAnalysis {
    /// Whether the message reads as a question (interrogative word or "?").
    pub is_question: bool,
    /// Whether the message ends with "!".
    pub is_exclamation: bool,
    /// Interrogative words found, in list order.
    pub interrogatives: Vec<String>,
    /// Subject pronouns found.
    pub subjects: Vec<String>,
    /// Action/state verbs found.
    pub verbs: Vec<String>,
    /// Derived sentence form.
    pub structure: SentenceStructure,
}

fn found_words(patterns: &[(&'static str, Regex)], text: &str) -> Vec<String> {
    patterns
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(word, _)| word.to_string())
        .collect()
}

/// Analyzes the shallow structure of a message. No error cases; empty input
/// is a statement with no signals.
pub fn analyze_structure(text: &str) -> StructuralAnalysis {
    let normalized = normalize_for_patterns(text);
    let trimmed = text.trim();

    let interrogatives = found_words(&INTERROGATIVE_PATTERNS, &normalized);
    let subjects = found_words(&SUBJECT_PATTERNS, &normalized);
    let verbs = found_words(&VERB_PATTERNS, &normalized);

    let ends_question = trimmed.ends_with('?');
    let ends_exclamation = trimmed.ends_with('!');

    let structure = if !interrogatives.is_empty() && !subjects.is_empty() {
        SentenceStructure::InterrogativeWithSubject
    } else if !interrogatives.is_empty() {
        SentenceStructure::Interrogative
    } else if ends_question {
        SentenceStructure::QuestionImplicit
    } else if ends_exclamation {
        SentenceStructure::Exclamation
    } else {
        SentenceStructure::Statement
    };

    StructuralAnalysis {
        is_question: ends_question || !interrogatives.is_empty(),
        is_exclamation: ends_exclamation,
        interrogatives,
        subjects,
        verbs,
        structure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrogative_with_subject() {
        let analysis = analyze_structure("O que vc faz?");

        assert_eq!(analysis.structure, SentenceStructure::InterrogativeWithSubject);
        assert!(analysis.is_question);
        assert!(analysis.interrogatives.contains(&"o que".to_string()));
        assert!(analysis.subjects.contains(&"vc".to_string()));
        assert!(analysis.verbs.contains(&"faz".to_string()));
    }

    #[test]
    fn test_interrogative_without_subject() {
        let analysis = analyze_structure("Qual o preço dos planos?");

        assert_eq!(analysis.structure, SentenceStructure::Interrogative);
        assert!(analysis.subjects.is_empty());
    }

    #[test]
    fn test_implicit_question() {
        let analysis = analyze_structure("Tem vaga pra sexta?");

        assert_eq!(analysis.structure, SentenceStructure::QuestionImplicit);
        assert!(analysis.is_question);
    }

    #[test]
    fn test_exclamation() {
        let analysis = analyze_structure("Tenho um problema!");

        assert_eq!(analysis.structure, SentenceStructure::Exclamation);
        assert!(analysis.is_exclamation);
        assert!(!analysis.is_question);
    }

    #[test]
    fn test_plain_statement() {
        let analysis = analyze_structure("gostaria de agendar uma visita");

        assert_eq!(analysis.structure, SentenceStructure::Statement);
        assert!(!analysis.is_question);
        assert!(analysis.verbs.contains(&"gostaria".to_string()));
    }

    #[test]
    fn test_empty_input() {
        let analysis = analyze_structure("");

        assert_eq!(analysis.structure, SentenceStructure::Statement);
        assert!(analysis.interrogatives.is_empty());
        assert!(analysis.subjects.is_empty());
        assert!(analysis.verbs.is_empty());
    }

    #[test]
    fn test_accented_subject_detected() {
        let analysis = analyze_structure("Você pode me ajudar?");

        assert!(analysis.subjects.contains(&"voce".to_string()));
        assert_eq!(analysis.structure, SentenceStructure::QuestionImplicit);
    }
}
