use crate::client::Result;
use sqlx::PgPool;
use sqlx::postgres::PgListener;
use tracing::debug;

/// Notification channel the `messages_notify_change` trigger posts to. The
/// payload is the operation kind only, never row data.
pub const CHANGE_CHANNEL: &str = "wall_messages_changed";

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Change {
    Inserted,
    Updated,
    Deleted,
}

impl Change {
    #[must_use]
    pub fn parse(payload: &str) -> Option<Self> {
        match payload {
            "INSERT" => Some(Change::Inserted),
            "UPDATE" => Some(Change::Updated),
            "DELETE" => Some(Change::Deleted),
            _ => None,
        }
    }
}

/// A wildcard subscription to changes of the wall. Consumers re-fetch on any
/// event; the operation kind is only reported for logging. Dropping the feed
/// tears the listener connection down.
pub struct ChangeFeed {
    listener: PgListener,
}

impl ChangeFeed {
    pub async fn connect(pool: &PgPool) -> Result<Self> {
        let mut listener = PgListener::connect_with(pool).await?;
        listener.listen(CHANGE_CHANNEL).await?;
        Ok(Self { listener })
    }

    /// Waits for the next change. An unrecognized payload still counts as a
    /// change, it just cannot be attributed to an operation.
    pub async fn next(&mut self) -> Result<Option<Change>> {
        let notification = self.listener.recv().await?;
        let change = Change::parse(notification.payload());
        if change.is_none() {
            debug!(
                payload = notification.payload(),
                "Unrecognized change notification payload"
            );
        }
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trigger_operations() {
        assert_eq!(Change::parse("INSERT"), Some(Change::Inserted));
        assert_eq!(Change::parse("UPDATE"), Some(Change::Updated));
        assert_eq!(Change::parse("DELETE"), Some(Change::Deleted));
        assert_eq!(Change::parse("TRUNCATE"), None);
        assert_eq!(Change::parse(""), None);
    }
}
