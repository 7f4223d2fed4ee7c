use async_trait::async_trait;
use thiserror::Error;
use wall_common::model::message::{Message, NewMessage};
use wall_db::client::{DbClient, DbError};
use wall_storage::client::{StorageClient, StorageError};

pub type Result<T, E = BackendError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Database(#[from] DbError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The backend seam of the feed view. An explicitly constructed client gets
/// injected at startup; tests inject a fake.
#[async_trait]
pub trait WallBackend: Send + Sync {
    /// All messages, newest first.
    async fn fetch_wall(&self) -> Result<Vec<Message>>;

    async fn post_message(&self, message: NewMessage) -> Result<()>;

    /// Uploads a photo and resolves its public URL.
    async fn upload_photo(&self, key: &str, bytes: Vec<u8>, content_type: &str)
    -> Result<String>;
}

pub struct LiveBackend {
    db: DbClient,
    storage: StorageClient,
}

impl LiveBackend {
    #[must_use]
    pub fn new(db: DbClient, storage: StorageClient) -> Self {
        Self { db, storage }
    }
}

#[async_trait]
impl WallBackend for LiveBackend {
    async fn fetch_wall(&self) -> Result<Vec<Message>> {
        Ok(self.db.fetch_wall().await?)
    }

    async fn post_message(&self, message: NewMessage) -> Result<()> {
        self.db.create_message(&message).await?;
        Ok(())
    }

    async fn upload_photo(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        self.storage.upload(key, bytes, content_type).await?;
        Ok(self.storage.public_url(key))
    }
}
