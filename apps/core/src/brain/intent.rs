//! Intent classification using ordered regex pattern groups.
//!
//! Pure pattern matching, no ML. Every pattern of every category is searched
//! against the accent-folded message; each hit is scored by how much of the
//! sentence the matched span explains, and the best-scoring (intent,
//! confidence) pair wins. The fallback `general_inquiry` is an unconditional
//! default, not a wildcard pattern, so it can never shadow a real match.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::normalize::normalize_for_patterns;

/// Detected intent category. Closed set; `GeneralInquiry` is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// "O que você faz?" - asking what the assistant can do
    AskCapabilities,
    /// "Quero agendar uma visita" - scheduling request
    AskScheduling,
    /// "Qual o preço dos planos?" - pricing question
    AskPricing,
    /// "Como faço para pagar?" - how-to / instructions
    AskHowTo,
    /// "Já foi resolvido?" - status inquiry
    AskStatus,
    /// "Onde fica a empresa?" - location question
    AskLocation,
    /// "Qual o horário de atendimento?" - time/hours question
    AskTime,
    /// "Não consigo agendar, deu erro" - problem report
    ReportIssue,
    /// Catch-all when nothing matches with enough specificity
    GeneralInquiry,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns the wire-format label for the intent.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::AskCapabilities => "ask_capabilities",
            Intent::AskScheduling => "ask_scheduling",
            Intent::AskPricing => "ask_pricing",
            Intent::AskHowTo => "ask_how_to",
            Intent::AskStatus => "ask_status",
            Intent::AskLocation => "ask_location",
            Intent::AskTime => "ask_time",
            Intent::ReportIssue => "report_issue",
            Intent::GeneralInquiry => "general_inquiry",
        }
    }
}

/// Result of intent classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent.
    pub intent: Intent,
    /// Confidence score, always within [0.5, 0.95].
    pub confidence: f32,
}

// --- Confidence heuristics ---
// Tuned constants with no principled derivation; kept for behavioral
// compatibility with the service this engine replaces. Retune here, not in
// the control flow.

/// Confidence when nothing matched (the `general_inquiry` floor).
pub const FALLBACK_CONFIDENCE: f32 = 0.5;
/// Utterances of up to this many words count as "short".
const SHORT_UTTERANCE_WORDS: usize = 3;
/// Span ratio a short utterance must exceed to be considered fully explained.
const SHORT_UTTERANCE_RATIO: f32 = 0.5;
/// Confidence for a short utterance mostly covered by the match.
const SHORT_UTTERANCE_CONFIDENCE: f32 = 0.90;
/// Span ratio above which any match is considered strong.
const STRONG_MATCH_RATIO: f32 = 0.6;
/// Confidence for a strong match.
const STRONG_MATCH_CONFIDENCE: f32 = 0.85;
/// Base confidence for weaker matches, scaled up by the span ratio.
const BASE_CONFIDENCE: f32 = 0.80;
/// Weight of the span ratio on top of [`BASE_CONFIDENCE`].
const RATIO_WEIGHT: f32 = 0.15;
/// Hard ceiling for every confidence produced here.
const MAX_CONFIDENCE: f32 = 0.95;

fn new_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("Invalid intent pattern"))
        .collect()
}

// Patterns are written accent-folded because they run against
// `normalize_for_patterns` output. Compiled once at startup.

static CAPABILITY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    new_patterns(&[
        r"\bo que (voce|vc|vcs|voces) (faz|fazem|sabe|sabem)",
        r"\bo que (voce|vc) (pode|consegue) fazer",
        r"\b(quais|que) (sao )?(suas|as) (funcoes|funcionalidades|capacidades|habilidades)",
        r"\bcomo (voce|vc) (pode|consegue) (me )?ajudar",
        r"\bpra que (voce|vc) serve",
    ])
});

static SCHEDULING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    new_patterns(&[
        r"\b(quero|gostaria de|preciso|posso) (agendar|marcar|remarcar)",
        r"\b(agendar|reagendar|remarcar|desmarcar)\b",
        r"\bmarcar (um |uma )?(horario|visita|consulta|reuniao)",
        r"\bvisita ao? cliente\b",
        r"\b(novo|meu) compromisso\b",
    ])
});

static PRICING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    new_patterns(&[
        r"\b(qual|quais|quanto) .*(prec|valor|custa|custo)",
        r"\bquanto custa\b",
        r"\bpreco d[eao]s? \w+",
        r"\b(valor|preco) (do|da|de|dos|das)\b",
        r"\b(plano|planos|pacote|pacotes)\b.*\b(valor|preco|quanto)",
    ])
});

static HOW_TO_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    new_patterns(&[
        r"\bcomo (faco|fazer|posso|devo|consigo)\b",
        r"\bcomo (se )?(usa|usar|configura|configurar|paga|pagar|agenda|agendar|cadastra|cadastrar)",
        r"\bpasso a passo\b",
        r"\bme (ensina|explica) como\b",
    ])
});

static STATUS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    new_patterns(&[
        r"\bcomo (esta|estao|ta|tao|anda|andam|vai|vao)\b",
        r"\b(qual|como) .*(status|situacao|andamento)",
        r"\bja (foi|esta|ficou) (feito|pronto|resolvido|agendado)",
        r"\btem (novidade|previsao)\b",
    ])
});

static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    new_patterns(&[
        r"\bonde (fica|e|esta|estao|encontro)\b",
        r"\b(qual|me passa) o ?endereco\b",
        r"\bcomo (chego|chegar)\b",
        r"\blocalizacao\b",
    ])
});

static TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    new_patterns(&[
        r"\b(qual|quais|que) .*(horario|horarios|hora|horas)",
        r"\bhorario de (funcionamento|atendimento)\b",
        r"\b(abre|fecha|funciona) (a que|que) horas\b",
        r"\bate que horas\b",
    ])
});

static ISSUE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    new_patterns(&[
        r"\bnao (consigo|conseguo|funciona|esta funcionando|carrega|abre|conecta)\b",
        r"\b(problema|erro|falha|defeito|bug)s?\b",
        r"\b(travou|quebrou|parou|caiu|travando)\b",
        r"\b(reclamacao|reclamar)\b",
    ])
});

/// One intent category with its ordered pattern list.
#[derive(Clone)]
struct IntentPatterns {
    intent: Intent,
    patterns: Vec<Regex>,
}

/// Regex-based intent classifier.
#[derive(Clone)]
pub struct IntentClassifier {
    /// Category iteration order is fixed and test-covered. It only matters
    /// for equal confidences, where first-found wins.
    groups: Vec<IntentPatterns>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Creates a classifier with the full pattern table.
    pub fn new() -> Self {
        let groups = vec![
            IntentPatterns {
                intent: Intent::AskCapabilities,
                patterns: CAPABILITY_PATTERNS.clone(),
            },
            IntentPatterns {
                intent: Intent::AskScheduling,
                patterns: SCHEDULING_PATTERNS.clone(),
            },
            IntentPatterns {
                intent: Intent::AskPricing,
                patterns: PRICING_PATTERNS.clone(),
            },
            IntentPatterns {
                intent: Intent::AskHowTo,
                patterns: HOW_TO_PATTERNS.clone(),
            },
            IntentPatterns {
                intent: Intent::AskStatus,
                patterns: STATUS_PATTERNS.clone(),
            },
            IntentPatterns {
                intent: Intent::AskLocation,
                patterns: LOCATION_PATTERNS.clone(),
            },
            IntentPatterns {
                intent: Intent::AskTime,
                patterns: TIME_PATTERNS.clone(),
            },
            IntentPatterns {
                intent: Intent::ReportIssue,
                patterns: ISSUE_PATTERNS.clone(),
            },
        ];

        Self { groups }
    }

    /// Classifies the intent of a message.
    ///
    /// Every pattern of every category is searched (not anchored) against
    /// the accent-folded text; the best-scoring hit wins under strict `>`
    /// comparison, so earlier categories keep ties. Empty input returns the
    /// fallback.
    pub fn classify(&self, text: &str) -> IntentResult {
        let mut best = IntentResult {
            intent: Intent::GeneralInquiry,
            confidence: FALLBACK_CONFIDENCE,
        };

        let text_chars = text.chars().count();
        if text.trim().is_empty() || text_chars == 0 {
            return best;
        }

        let normalized = normalize_for_patterns(text);
        let word_count = text.split_whitespace().count();

        for group in &self.groups {
            for pattern in &group.patterns {
                if let Some(m) = pattern.find(&normalized) {
                    let matched_chars = m.as_str().chars().count();
                    let confidence = match_confidence(matched_chars, text_chars, word_count);
                    if confidence > best.confidence {
                        best = IntentResult {
                            intent: group.intent,
                            confidence,
                        };
                    }
                }
            }
        }

        best
    }
}

/// Scores a single pattern hit: a crude proxy for how much of the sentence
/// the matched span explains, favoring short, precisely matching utterances.
fn match_confidence(matched_chars: usize, text_chars: usize, word_count: usize) -> f32 {
    let match_ratio = matched_chars as f32 / text_chars as f32;

    let confidence = if word_count <= SHORT_UTTERANCE_WORDS && match_ratio > SHORT_UTTERANCE_RATIO {
        SHORT_UTTERANCE_CONFIDENCE
    } else if match_ratio > STRONG_MATCH_RATIO {
        STRONG_MATCH_CONFIDENCE
    } else {
        BASE_CONFIDENCE + RATIO_WEIGHT * match_ratio
    };

    confidence.min(MAX_CONFIDENCE)
}
