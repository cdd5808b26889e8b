use std::sync::Arc;

use sn_core::NoteStorage;
use sn_scraper::Pipeline;

pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub storage: Arc<dyn NoteStorage>,
}
