//! # Brain Module
//!
//! Rule-based language understanding for Portuguese business chat.
//! Pure functions and compiled-in tables, no model inference.
//!
//! ## Components
//! - `normalize`: accent folding and naive singularization
//! - `tokenizer`: word tokenization and the stopword table
//! - `lexicon`: token-to-concept matching and topic aggregation
//! - `intent`: regex intent classification
//! - `structure`: shallow sentence-structure analysis
//! - `scheduling`: slot extraction for scheduling messages
//! - `composer`: template-based reply composition
//! - `report`: the aggregated per-message report
//! - `analyzer`: the pipeline orchestrator

pub mod analyzer;
pub mod composer;
pub mod intent;
pub mod lexicon;
pub mod normalize;
pub mod report;
pub mod scheduling;
pub mod structure;
pub mod tokenizer;

pub use analyzer::BrainAnalyzer;
pub use composer::compose;
pub use intent::{Intent, IntentClassifier, IntentResult};
pub use lexicon::{RecognizedConcept, SemanticReading};
pub use report::AnalysisReport;
pub use scheduling::SchedulingDetails;
pub use structure::{SentenceStructure, StructuralAnalysis};
