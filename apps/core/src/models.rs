use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::brain::{AnalysisReport, SchedulingDetails, SemanticReading, StructuralAnalysis};

/// One approved word of a tenant's dynamic vocabulary.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VocabularyEntry {
    /// The word itself (stored normalized: lowercase, accent-folded).
    pub word: String,
    /// Human-written definition shown back in replies and reports.
    pub definition: String,
    /// Alternative spellings or related words.
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Example sentences using the word.
    #[serde(default)]
    pub examples: Vec<String>,
}

/// An unknown word flagged during analysis, waiting for human curation.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PendingWord {
    pub word: String,
    /// Curation state: "pending" until a human approves or rejects it.
    pub status: String,
}

impl PendingWord {
    pub fn pending(word: &str) -> Self {
        Self {
            word: word.to_string(),
            status: "pending".to_string(),
        }
    }
}

/// Request body of `POST /cognitive-response`.
#[derive(Debug, Deserialize, Validate)]
pub struct EngineRequest {
    /// The end-user message to analyze and answer.
    #[validate(length(min = 1))]
    pub message: String,
    /// Tenant identifier; must parse as a UUID.
    #[validate(length(min = 1))]
    pub tenant_id: String,
    /// Optional prior conversation excerpt, forwarded to the generator.
    #[serde(default)]
    pub prior_context: Option<String>,
}

/// Response body of `POST /cognitive-response`.
#[derive(Debug, Serialize)]
pub struct EngineResponse {
    /// The reply to send back to the end user.
    pub reply: String,
    /// Wire label of the detected intent (e.g. "ask_pricing").
    pub detected_intent: String,
    /// Confidence of the intent classification.
    pub intent_confidence: f32,
    /// Shallow sentence-structure signals.
    pub structural_analysis: StructuralAnalysis,
    /// Lexicon reading: recognized concepts, topics, pending words.
    pub semantics: SemanticReading,
    /// Slot extraction, null unless the message is a scheduling request.
    pub scheduling_details: Option<SchedulingDetails>,
    /// Blended confidence of the whole analysis.
    pub overall_confidence: f32,
    /// True when the engine understood too little of the message.
    pub needs_more_training: bool,
    /// Whether the reply came from the generator backend or a template.
    pub used_generator: bool,
}

impl EngineResponse {
    /// Builds the wire response from an analysis report and a chosen reply.
    pub fn from_report(report: AnalysisReport, reply: String, used_generator: bool) -> Self {
        Self {
            reply,
            detected_intent: report.intent.intent.label().to_string(),
            intent_confidence: report.intent.confidence,
            structural_analysis: report.structure,
            semantics: report.semantics,
            scheduling_details: report.scheduling,
            overall_confidence: report.overall_confidence,
            needs_more_training: report.needs_more_training,
            used_generator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_fails_validation() {
        let request = EngineRequest {
            message: "".to_string(),
            tenant_id: "a2f7c9d0-1b2c-4d5e-8f90-123456789abc".to_string(),
            prior_context: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_valid_request_passes_validation() {
        let request = EngineRequest {
            message: "Qual o preço?".to_string(),
            tenant_id: "a2f7c9d0-1b2c-4d5e-8f90-123456789abc".to_string(),
            prior_context: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_vocabulary_entry_defaults_optional_lists() {
        let entry: VocabularyEntry =
            serde_json::from_str(r#"{"word":"rack","definition":"Armário de rede"}"#)
                .expect("should deserialize");
        assert!(entry.synonyms.is_empty());
        assert!(entry.examples.is_empty());
    }
}
