use std::sync::Arc;

use sn_core::{Error, NoteStorage, Result};
use tracing::info;

pub mod backends;

pub use backends::*;

/// Default database file for the sqlite backend.
pub const DEFAULT_DB_PATH: &str = "notes.db";

/// Builds the backend named by `storage` ("memory" or "sqlite").
#[cfg_attr(not(feature = "sqlite"), allow(unused_variables))]
pub async fn create_storage(storage: &str, db_path: Option<&str>) -> Result<Arc<dyn NoteStorage>> {
    match storage {
        "memory" => {
            info!("🏦 Using in-memory note storage");
            Ok(Arc::new(InMemoryStorage::new()))
        }
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let path = std::path::PathBuf::from(db_path.unwrap_or(DEFAULT_DB_PATH));
            info!("🏦 Using sqlite note storage at {}", path.display());
            Ok(Arc::new(SQLiteStorage::new_with_path(&path).await?))
        }
        other => Err(Error::Storage(format!(
            "Unsupported storage backend '{}'. Available: {}",
            other,
            available_backends().join(", ")
        ))),
    }
}

pub fn available_backends() -> Vec<&'static str> {
    let mut backends = vec!["memory"];
    if cfg!(feature = "sqlite") {
        backends.push("sqlite");
    }
    backends
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_storage;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_storage() {
        assert!(create_storage("memory", None).await.is_ok());
        let err = create_storage("qdrant", None).await.err().unwrap();
        assert!(err.to_string().contains("memory"));
    }
}
