use crate::record::MessageRecord;
use sqlx::{PgPool, query_as, query_scalar};
use thiserror::Error;
use uuid::Uuid;
use wall_common::model::message::{Message, MessageMarker, NewMessage};
use wall_common::model::{Id, ModelValidationError};

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("An object in the database was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub struct DbClient {
    pool: PgPool,
}

impl DbClient {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Fetches the whole wall, newest first. The feed deliberately has no
    /// pagination; `created_at` is the sole sort key.
    pub async fn fetch_wall(&self) -> Result<Vec<Message>> {
        let records: Vec<MessageRecord> = query_as(
            "
            SELECT
                messages.id,
                messages.author,
                messages.body,
                messages.photo_url,
                messages.created_at
            FROM
                messages
            ORDER BY
                messages.created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        records
            .into_iter()
            .map(|record| Message::try_from(record).map_err(DbError::from))
            .collect()
    }

    /// Inserts a message. Id and creation timestamp are assigned by the
    /// database.
    pub async fn create_message(&self, message: &NewMessage) -> Result<Id<MessageMarker>> {
        let returned_id: Uuid = query_scalar(
            "
            INSERT INTO messages (author, body, photo_url)
            VALUES ($1, $2, $3)
            RETURNING messages.id
            ",
        )
        .bind(&message.author)
        .bind(message.body.get())
        .bind(message.photo_url.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(returned_id.into())
    }
}
