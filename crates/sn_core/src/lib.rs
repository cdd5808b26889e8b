pub mod error;
pub mod fetch;
pub mod models;
pub mod storage;
pub mod types;

pub use error::{Error, Result, Stage};
pub use fetch::PageFetcher;
pub use models::GenerationModel;
pub use storage::NoteStorage;
pub use types::{
    ArticleSource, ExtractedArticle, GenerationRequest, GenerationResult, Mode, NewNote,
    NoteDraft, NoteSummary, SavedNote,
};

/// Message shared by every "no such note for this owner" failure.
pub const NOTE_NOT_FOUND: &str = "Note not found";
