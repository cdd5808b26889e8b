use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sn_core::{Error, Mode, NewNote, NoteStorage, NoteSummary, Result, SavedNote, NOTE_NOT_FOUND};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS saved_notes (
        id TEXT PRIMARY KEY,
        owner_id TEXT NOT NULL,
        article_url TEXT NOT NULL,
        article_title TEXT NOT NULL,
        content TEXT NOT NULL,
        note_type TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS saved_notes_owner_created
        ON saved_notes (owner_id, created_at DESC)
    "#,
];

pub struct SQLiteStorage {
    pool: SqlitePool,
    db_path: PathBuf,
}

fn storage_error(context: &str, err: sqlx::Error) -> Error {
    Error::Storage(format!("{}: {}", context, err))
}

fn not_found() -> Error {
    Error::NotFound(NOTE_NOT_FOUND.to_string())
}

/// Fixed-width timestamps so `ORDER BY created_at` sorts chronologically.
fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_id(row: &SqliteRow) -> Result<Uuid> {
    Uuid::parse_str(row.get::<&str, _>("id"))
        .map_err(|e| Error::Storage(format!("Corrupt note id: {}", e)))
}

fn parse_created_at(row: &SqliteRow) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(row.get::<&str, _>("created_at"))
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| Error::Storage(format!("Failed to parse date: {}", e)))
}

fn parse_type(row: &SqliteRow) -> Result<Mode> {
    row.get::<&str, _>("note_type")
        .parse()
        .map_err(|_| Error::Storage("Corrupt note type".to_string()))
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| storage_error("Failed to connect to database", e))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| storage_error(&format!("Failed to run migration {}", i), e))?;
        }

        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait]
impl NoteStorage for SQLiteStorage {
    async fn save(&self, owner_id: &str, note: NewNote) -> Result<SavedNote> {
        let saved = SavedNote::new(owner_id, note);

        sqlx::query(
            r#"
            INSERT INTO saved_notes
            (id, owner_id, article_url, article_title, content, note_type, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(saved.id.to_string())
        .bind(&saved.owner_id)
        .bind(&saved.article_url)
        .bind(&saved.article_title)
        .bind(&saved.content)
        .bind(saved.note_type.as_str())
        .bind(timestamp(&saved.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to save note", e))?;

        Ok(saved)
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<NoteSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, article_title, article_url, note_type, created_at
            FROM saved_notes
            WHERE owner_id = ?
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to list notes", e))?;

        rows.iter()
            .map(|row| -> Result<NoteSummary> {
                Ok(NoteSummary {
                    id: parse_id(row)?,
                    article_title: row.get("article_title"),
                    article_url: row.get("article_url"),
                    note_type: parse_type(row)?,
                    created_at: parse_created_at(row)?,
                })
            })
            .collect()
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<SavedNote> {
        let row = sqlx::query(
            r#"
            SELECT * FROM saved_notes
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(id.to_string())
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to load note", e))?
        .ok_or_else(not_found)?;

        Ok(SavedNote {
            id: parse_id(&row)?,
            owner_id: row.get("owner_id"),
            article_url: row.get("article_url"),
            article_title: row.get("article_title"),
            content: row.get("content"),
            note_type: parse_type(&row)?,
            created_at: parse_created_at(&row)?,
        })
    }

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM saved_notes WHERE id = ? AND owner_id = ?")
            .bind(id.to_string())
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete note", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
