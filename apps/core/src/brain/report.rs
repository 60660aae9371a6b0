//! Aggregated analysis report for one processed message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::intent::IntentResult;
use super::lexicon::SemanticReading;
use super::scheduling::SchedulingDetails;
use super::structure::StructuralAnalysis;

/// Everything the pipeline learned about a single message, bundled for the
/// response layer and for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The original message, untouched.
    pub message: String,
    /// Winning intent and its confidence.
    pub intent: IntentResult,
    /// Shallow sentence-structure signals.
    pub structure: StructuralAnalysis,
    /// Lexicon reading: concepts, topics, pending words.
    pub semantics: SemanticReading,
    /// Slot extraction, present only for scheduling messages.
    pub scheduling: Option<SchedulingDetails>,
    /// Blended confidence across all analysis stages.
    pub overall_confidence: f32,
    /// True when the engine understood too little of the message.
    pub needs_more_training: bool,
    /// Wall-clock duration of the analysis.
    pub processing_time_ms: u64,
    /// When the analysis ran.
    pub timestamp: DateTime<Utc>,
}

impl AnalysisReport {
    /// One-line digest for log records.
    pub fn summary(&self) -> String {
        format!(
            "intent={} confidence={:.2} topic={} concepts={} pending={}",
            self.intent.intent.label(),
            self.overall_confidence,
            self.semantics.dominant_topic.as_deref().unwrap_or("-"),
            self.semantics.recognized.len(),
            self.semantics.new_words.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::intent::Intent;
    use crate::brain::structure::analyze_structure;

    #[test]
    fn test_summary_mentions_intent_and_topic() {
        let report = AnalysisReport {
            message: "Qual o preço?".to_string(),
            intent: IntentResult {
                intent: Intent::AskPricing,
                confidence: 0.9,
            },
            structure: analyze_structure("Qual o preço?"),
            semantics: SemanticReading {
                dominant_topic: Some("comercial".to_string()),
                ..Default::default()
            },
            scheduling: None,
            overall_confidence: 0.8,
            needs_more_training: false,
            processing_time_ms: 1,
            timestamp: Utc::now(),
        };

        let summary = report.summary();
        assert!(summary.contains("ask_pricing"));
        assert!(summary.contains("comercial"));
    }
}
