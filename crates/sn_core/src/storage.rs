use async_trait::async_trait;
use uuid::Uuid;
use crate::types::{NewNote, NoteSummary, SavedNote};
use crate::Result;

/// Owner-scoped persistence for finished notes.
///
/// A note owned by someone else must be reported exactly like a missing one.
#[async_trait]
pub trait NoteStorage: Send + Sync {
    /// Store a note for `owner_id`
    async fn save(&self, owner_id: &str, note: NewNote) -> Result<SavedNote>;

    /// All notes of `owner_id`, newest first
    async fn list(&self, owner_id: &str) -> Result<Vec<NoteSummary>>;

    async fn get(&self, owner_id: &str, id: Uuid) -> Result<SavedNote>;

    async fn delete(&self, owner_id: &str, id: Uuid) -> Result<()>;
}
