use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;
use wall_common::model::ModelValidationError;
use wall_common::model::message::{Message, MessageBody};

#[derive(Clone, Eq, PartialEq, Debug, FromRow)]
pub struct MessageRecord {
    pub id: Uuid,
    pub author: String,
    pub body: String,
    pub photo_url: Option<String>,
    pub created_at: OffsetDateTime,
}

impl TryFrom<MessageRecord> for Message {
    type Error = ModelValidationError;

    fn try_from(value: MessageRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            author: value.author,
            body: MessageBody::new(value.body)?,
            photo_url: value.photo_url,
            created_at: value.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn record(body: &str) -> MessageRecord {
        MessageRecord {
            id: Uuid::new_v4(),
            author: "James Neo Culala".to_owned(),
            body: body.to_owned(),
            photo_url: None,
            created_at: datetime!(2026-08-30 12:00 UTC),
        }
    }

    #[test]
    fn valid_record_converts() {
        let record = record("Hello world");
        let id = record.id;

        let message = Message::try_from(record).unwrap();
        assert_eq!(message.id.get(), id);
        assert_eq!(message.body.get(), "Hello world");
        assert_eq!(message.photo_url, None);
    }

    #[test]
    fn blank_body_is_rejected() {
        assert!(Message::try_from(record("   ")).is_err());
    }
}
