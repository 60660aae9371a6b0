//! Brain analyzer, the orchestrator of the analysis pipeline.
//!
//! Runs tokenization, lexicon interpretation, intent classification,
//! structure analysis and (for scheduling messages) slot extraction, then
//! blends the per-stage confidences into one overall score.

use chrono::Utc;
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

use super::intent::{Intent, IntentClassifier, IntentResult};
use super::lexicon::{interpret, SemanticReading};
use super::report::AnalysisReport;
use super::scheduling::{extract_scheduling_details, SchedulingDetails};
use super::structure::analyze_structure;
use super::tokenizer::tokenize;
use crate::models::VocabularyEntry;

// Overall-confidence blend. Tuned constants, not derived.

/// Starting point of the blend when the intent match is weak.
const BASE_OVERALL_CONFIDENCE: f32 = 0.45;
/// Intent confidence above which the blend starts from the higher base.
const CONFIDENT_INTENT_THRESHOLD: f32 = 0.8;
/// Starting point of the blend for a confident intent match.
const CONFIDENT_INTENT_BASE: f32 = 0.75;
/// Added when the lexicon recognized at least one concept.
const SEMANTIC_BOOST: f32 = 0.10;
/// Added when slot extraction filled most scheduling fields.
const SCHEDULING_BOOST: f32 = 0.05;
/// Scheduling extraction confidence required for the boost.
const SCHEDULING_BOOST_THRESHOLD: f32 = 0.6;
/// Ceiling of the blended score.
const OVERALL_CONFIDENCE_CAP: f32 = 0.95;
/// Below this overall confidence the message is flagged for curation.
const TRAINING_THRESHOLD: f32 = 0.55;

/// Main analyzer. Cheap to clone; the pattern tables are process-wide
/// statics behind the classifier.
#[derive(Clone)]
pub struct BrainAnalyzer {
    intent_classifier: IntentClassifier,
}

impl Default for BrainAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl BrainAnalyzer {
    pub fn new() -> Self {
        Self {
            intent_classifier: IntentClassifier::new(),
        }
    }

    /// Runs the full pipeline over one message.
    ///
    /// `tenant_vocabulary` is the approved word list of the tenant, keyed by
    /// normalized word; pass an empty map when none is loaded.
    pub fn analyze(
        &self,
        message: &str,
        tenant_vocabulary: &HashMap<String, VocabularyEntry>,
    ) -> AnalysisReport {
        let started = Instant::now();

        let tokens = tokenize(message);
        let semantics = interpret(&tokens, tenant_vocabulary);
        let intent = self.intent_classifier.classify(message);
        let structure = analyze_structure(message);

        // Slot extraction runs only for scheduling messages; for everything
        // else the field stays null in the output.
        let scheduling = if intent.intent == Intent::AskScheduling {
            Some(extract_scheduling_details(message))
        } else {
            None
        };

        let overall_confidence = blend_confidence(&intent, &semantics, scheduling.as_ref());
        let needs_more_training = overall_confidence < TRAINING_THRESHOLD;

        let report = AnalysisReport {
            message: message.to_string(),
            intent,
            structure,
            semantics,
            scheduling,
            overall_confidence,
            needs_more_training,
            processing_time_ms: started.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        };

        debug!(summary = %report.summary(), "message analyzed");
        report
    }
}

fn blend_confidence(
    intent: &IntentResult,
    semantics: &SemanticReading,
    scheduling: Option<&SchedulingDetails>,
) -> f32 {
    let mut confidence = if intent.confidence > CONFIDENT_INTENT_THRESHOLD {
        CONFIDENT_INTENT_BASE
    } else {
        BASE_OVERALL_CONFIDENCE
    };

    if !semantics.recognized.is_empty() {
        confidence += SEMANTIC_BOOST;
    }

    if let Some(details) = scheduling {
        if details.confidence > SCHEDULING_BOOST_THRESHOLD {
            confidence += SCHEDULING_BOOST;
        }
    }

    confidence.min(OVERALL_CONFIDENCE_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::structure::SentenceStructure;

    fn no_vocab() -> HashMap<String, VocabularyEntry> {
        HashMap::new()
    }

    #[test]
    fn test_pricing_message_end_to_end() {
        let analyzer = BrainAnalyzer::new();
        let report = analyzer.analyze("Qual o preço dos planos?", &no_vocab());

        assert_eq!(report.intent.intent, Intent::AskPricing);
        assert_eq!(report.structure.structure, SentenceStructure::Interrogative);
        assert_eq!(report.semantics.dominant_topic.as_deref(), Some("comercial"));
        assert!(report.scheduling.is_none());
        assert!(report.overall_confidence >= 0.8);
        assert!(!report.needs_more_training);
    }

    #[test]
    fn test_scheduling_message_fills_slots() {
        let analyzer = BrainAnalyzer::new();
        let report = analyzer.analyze(
            "gostaria de agendar uma visita ao cliente Farkon segunda feira as 9:00, \
             o serviço será limpesa do rack",
            &no_vocab(),
        );

        assert_eq!(report.intent.intent, Intent::AskScheduling);
        let details = report.scheduling.as_ref().unwrap();
        assert_eq!(details.client_name.as_deref(), Some("Farkon"));
        assert!(details.confidence > 0.6);
        assert!(report.overall_confidence > 0.85);

        let pending: Vec<&str> = report
            .semantics
            .new_words
            .iter()
            .map(|w| w.word.as_str())
            .collect();
        assert!(pending.contains(&"limpesa"));
        assert!(pending.contains(&"farkon"));
    }

    #[test]
    fn test_non_scheduling_intent_skips_extraction() {
        let analyzer = BrainAnalyzer::new();
        // mentions a weekday but asks about hours
        let report = analyzer.analyze("Qual o horário de atendimento na segunda?", &no_vocab());

        assert_ne!(report.intent.intent, Intent::AskScheduling);
        assert!(report.scheduling.is_none());
    }

    #[test]
    fn test_gibberish_flags_training() {
        let analyzer = BrainAnalyzer::new();
        let report = analyzer.analyze("zzkw qqpl mmtr", &no_vocab());

        assert_eq!(report.intent.intent, Intent::GeneralInquiry);
        assert!(report.needs_more_training);
        assert!(report.overall_confidence < 0.55);
    }

    #[test]
    fn test_overall_confidence_never_exceeds_cap() {
        let analyzer = BrainAnalyzer::new();
        let report = analyzer.analyze(
            "quero agendar a visita ao cliente Farkon amanhã às 9:00 para limpeza do rack",
            &no_vocab(),
        );

        assert!(report.overall_confidence <= 0.95);
    }
}
