use crate::model::Id;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use thiserror::Error;
use time::OffsetDateTime;

pub const MESSAGE_BODY_MAX_LEN: usize = 280;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct MessageMarker;

/// A message on the wall, as stored by the backend. Never updated or deleted
/// by this system; `created_at` is the sole sort key of the feed.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Message {
    pub id: Id<MessageMarker>,
    pub author: String,
    pub body: MessageBody,
    pub photo_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A message about to be inserted. Id and creation timestamp are assigned by
/// the backend.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct NewMessage {
    pub author: String,
    pub body: MessageBody,
    pub photo_url: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageBody(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
pub enum InvalidMessageBodyError {
    #[error("The message body is empty after trimming.")]
    Empty,
    #[error("The message body is longer than {MESSAGE_BODY_MAX_LEN} characters: {0}")]
    TooLong(String),
}

impl MessageBody {
    /// Trims the input and rejects empty and oversized bodies. The stored
    /// body is always the trimmed form.
    pub fn new(body: String) -> Result<Self, InvalidMessageBodyError> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            Err(InvalidMessageBodyError::Empty)
        } else if trimmed.chars().count() > MESSAGE_BODY_MAX_LEN {
            Err(InvalidMessageBodyError::TooLong(body))
        } else {
            Ok(MessageBody(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for MessageBody {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        MessageBody::new(inner).map_err(|err| {
            let raw = match &err {
                InvalidMessageBodyError::Empty => "",
                InvalidMessageBodyError::TooLong(body) => body,
            };
            Error::invalid_value(Unexpected::Str(raw), &"MessageBody")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_body_trims() {
        let body = MessageBody::new("  Hello world \n".to_owned()).unwrap();
        assert_eq!(body.get(), "Hello world");
    }

    #[test]
    fn message_body_rejects_empty_and_whitespace() {
        assert_eq!(
            MessageBody::new(String::new()),
            Err(InvalidMessageBodyError::Empty)
        );
        assert_eq!(
            MessageBody::new("   \t\n".to_owned()),
            Err(InvalidMessageBodyError::Empty)
        );
    }

    #[test]
    fn message_body_caps_at_280_chars() {
        let at_cap = "a".repeat(MESSAGE_BODY_MAX_LEN);
        assert!(MessageBody::new(at_cap).is_ok());

        let over_cap = "a".repeat(MESSAGE_BODY_MAX_LEN + 1);
        assert_eq!(
            MessageBody::new(over_cap.clone()),
            Err(InvalidMessageBodyError::TooLong(over_cap))
        );
    }

    #[test]
    fn message_body_counts_chars_not_bytes() {
        let multibyte = "ä".repeat(MESSAGE_BODY_MAX_LEN);
        assert!(multibyte.len() > MESSAGE_BODY_MAX_LEN);
        assert!(MessageBody::new(multibyte).is_ok());
    }

    #[test]
    fn message_body_deserialization_validates() {
        let body: MessageBody = serde_json::from_str("\" hi \"").unwrap();
        assert_eq!(body.get(), "hi");

        assert!(serde_json::from_str::<MessageBody>("\"  \"").is_err());

        let over_cap = format!("\"{}\"", "a".repeat(MESSAGE_BODY_MAX_LEN + 1));
        assert!(serde_json::from_str::<MessageBody>(&over_cap).is_err());
    }
}
