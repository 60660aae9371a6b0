//! Request orchestration: validation, vocabulary loading, analysis,
//! pending-word recording and reply selection.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::brain::{compose, Intent};
use crate::database;
use crate::error::AppError;
use crate::generator::GeneratorClient;
use crate::models::{EngineRequest, EngineResponse, VocabularyEntry};
use crate::web::state::AppState;

/// Cache key for a tenant's serialized approved vocabulary.
const VOCAB_CACHE_KEY: &str = "vocabulary";
/// How long a cached vocabulary stays fresh.
const VOCAB_CACHE_TTL: Duration = Duration::from_secs(300);

/// Loads the tenant vocabulary, cache first. Database failures degrade to an
/// empty vocabulary so one broken tenant store cannot take the endpoint down.
async fn load_vocabulary(state: &AppState, tenant_id: &str) -> HashMap<String, VocabularyEntry> {
    if let Some(cached) = state.cache.get(tenant_id, VOCAB_CACHE_KEY) {
        match serde_json::from_str(&cached) {
            Ok(vocabulary) => return vocabulary,
            Err(error) => {
                warn!(%tenant_id, %error, "discarding undecodable cached vocabulary");
                state.cache.clear(Some(tenant_id));
            }
        }
    }

    match database::fetch_tenant_vocabulary(&state.pool, tenant_id).await {
        Ok(vocabulary) => {
            if let Ok(serialized) = serde_json::to_string(&vocabulary) {
                state
                    .cache
                    .set(tenant_id, VOCAB_CACHE_KEY, serialized, VOCAB_CACHE_TTL);
            }
            vocabulary
        }
        Err(error) => {
            warn!(%tenant_id, %error, "vocabulary lookup failed, continuing without it");
            HashMap::new()
        }
    }
}

/// Handles one `POST /cognitive-response` request end to end.
pub async fn respond(state: &AppState, request: EngineRequest) -> Result<EngineResponse, AppError> {
    request.validate()?;
    let tenant_id = Uuid::parse_str(request.tenant_id.trim())?.to_string();

    let vocabulary = load_vocabulary(state, &tenant_id).await;
    let report = state.analyzer.analyze(&request.message, &vocabulary);

    // Pending words are best-effort bookkeeping; a failed insert must not
    // fail the reply.
    for pending in &report.semantics.new_words {
        if let Err(error) = database::upsert_pending_word(&state.pool, &tenant_id, &pending.word).await
        {
            warn!(%tenant_id, word = %pending.word, %error, "failed to record pending word");
        }
    }

    let template_reply = compose(report.intent.intent, &report.semantics);

    // The generator is consulted only when the template source is weak: the
    // fallback intent, or an analysis the engine itself flags as poor.
    let generator_worthwhile = state.generator.is_enabled()
        && (report.intent.intent == Intent::GeneralInquiry || report.needs_more_training);

    let (reply, used_generator) = if generator_worthwhile {
        let prompt =
            GeneratorClient::build_prompt(&report, &vocabulary, request.prior_context.as_deref());
        match state.generator.generate(&prompt).await {
            Ok(Some(generated)) => (generated, true),
            Ok(None) => (template_reply, false),
            Err(error) => {
                warn!(%tenant_id, %error, "generator failed, falling back to template");
                (template_reply, false)
            }
        }
    } else {
        (template_reply, false)
    };

    info!(%tenant_id, summary = %report.summary(), used_generator, "request handled");

    Ok(EngineResponse::from_report(report, reply, used_generator))
}
