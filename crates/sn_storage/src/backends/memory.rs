use std::sync::Arc;

use async_trait::async_trait;
use sn_core::{Error, NewNote, NoteStorage, NoteSummary, Result, SavedNote, NOTE_NOT_FOUND};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local note store. Cloning shares the underlying notes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    notes: Arc<RwLock<Vec<SavedNote>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found() -> Error {
    Error::NotFound(NOTE_NOT_FOUND.to_string())
}

#[async_trait]
impl NoteStorage for InMemoryStorage {
    async fn save(&self, owner_id: &str, note: NewNote) -> Result<SavedNote> {
        let saved = SavedNote::new(owner_id, note);
        self.notes.write().await.push(saved.clone());
        Ok(saved)
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<NoteSummary>> {
        let notes = self.notes.read().await;
        // Reverse insertion order first so equal timestamps still list newest first.
        let mut summaries: Vec<NoteSummary> = notes
            .iter()
            .rev()
            .filter(|n| n.owner_id == owner_id)
            .map(SavedNote::summary)
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<SavedNote> {
        self.notes
            .read()
            .await
            .iter()
            .find(|n| n.id == id && n.owner_id == owner_id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<()> {
        let mut notes = self.notes.write().await;
        let position = notes
            .iter()
            .position(|n| n.id == id && n.owner_id == owner_id)
            .ok_or_else(not_found)?;
        notes.remove(position);
        Ok(())
    }
}
