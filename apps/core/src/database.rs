use crate::models::{PendingWord, VocabularyEntry};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

pub async fn init_db(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    let db_url = format!("sqlite://{}", db_path.to_string_lossy());

    info!("Initializing database at: {}", db_url);

    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run migrations manually for now. One table holds both approved
    // vocabulary and pending words, distinguished by status.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tenant_vocabulary (
            tenant_id TEXT NOT NULL,
            word TEXT NOT NULL,
            definition TEXT NOT NULL DEFAULT '',
            synonyms JSON NOT NULL DEFAULT '[]',
            examples JSON NOT NULL DEFAULT '[]',
            status TEXT NOT NULL DEFAULT 'pending',
            created_at DATETIME NOT NULL,
            PRIMARY KEY (tenant_id, word)
        );
        "#,
    )
    .execute(&pool)
    .await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

#[derive(FromRow)]
struct VocabularyRow {
    word: String,
    definition: String,
    synonyms: Json<Vec<String>>,
    examples: Json<Vec<String>>,
}

/// Loads the approved vocabulary of one tenant, keyed by word.
pub async fn fetch_tenant_vocabulary(
    pool: &SqlitePool,
    tenant_id: &str,
) -> Result<HashMap<String, VocabularyEntry>, sqlx::Error> {
    let rows = sqlx::query_as::<_, VocabularyRow>(
        r#"
        SELECT word, definition, synonyms, examples
        FROM tenant_vocabulary
        WHERE tenant_id = ? AND status = 'approved'
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            (
                row.word.clone(),
                VocabularyEntry {
                    word: row.word,
                    definition: row.definition,
                    synonyms: row.synonyms.0,
                    examples: row.examples.0,
                },
            )
        })
        .collect())
}

/// Records an unknown word for curation. Idempotent: a word already present
/// for the tenant is left untouched, whatever its status. In particular an
/// approved entry is never downgraded back to pending.
pub async fn upsert_pending_word(
    pool: &SqlitePool,
    tenant_id: &str,
    word: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO tenant_vocabulary (tenant_id, word, status, created_at)
        VALUES (?, ?, 'pending', ?)
        ON CONFLICT (tenant_id, word) DO NOTHING
        "#,
    )
    .bind(tenant_id)
    .bind(word)
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await?;

    Ok(())
}

/// Writes (or overwrites) an approved vocabulary entry for a tenant. This is
/// the curation write path: it also promotes a pending word.
pub async fn upsert_vocabulary_entry(
    pool: &SqlitePool,
    tenant_id: &str,
    entry: &VocabularyEntry,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO tenant_vocabulary (tenant_id, word, definition, synonyms, examples, status, created_at)
        VALUES (?, ?, ?, ?, ?, 'approved', ?)
        ON CONFLICT (tenant_id, word) DO UPDATE SET
            definition = excluded.definition,
            synonyms = excluded.synonyms,
            examples = excluded.examples,
            status = 'approved'
        "#,
    )
    .bind(tenant_id)
    .bind(&entry.word)
    .bind(&entry.definition)
    .bind(Json(&entry.synonyms))
    .bind(Json(&entry.examples))
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await?;

    Ok(())
}

/// Lists words still awaiting curation for a tenant, oldest first.
pub async fn list_pending_words(
    pool: &SqlitePool,
    tenant_id: &str,
) -> Result<Vec<PendingWord>, sqlx::Error> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        r#"
        SELECT word, status
        FROM tenant_vocabulary
        WHERE tenant_id = ? AND status = 'pending'
        ORDER BY created_at ASC, word ASC
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(word, status)| PendingWord { word, status })
        .collect())
}
