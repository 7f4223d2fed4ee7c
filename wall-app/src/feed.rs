use crate::backend::WallBackend;
use crate::draft::StagedPhoto;
use time::OffsetDateTime;
use tracing::warn;
use wall_common::model::message::{MESSAGE_BODY_MAX_LEN, Message, MessageBody, NewMessage};

/// The one stateful component: draft, staged photo, cached feed, loading
/// flag and the pending alert. All backend traffic goes through the injected
/// [`WallBackend`].
pub struct FeedView {
    author: String,
    draft: String,
    photo: Option<StagedPhoto>,
    messages: Vec<Message>,
    loading: bool,
    alert: Option<String>,
    scroll: usize,
}

impl FeedView {
    #[must_use]
    pub fn new(author: String) -> Self {
        Self {
            author,
            draft: String::new(),
            photo: None,
            messages: Vec::new(),
            loading: true,
            alert: None,
            scroll: 0,
        }
    }

    /// Replaces the cached feed wholesale with the backend's current rows.
    /// A failed fetch is swallowed: the previous cache (or nothing, on the
    /// very first load) stays on screen. The loading flag clears either way.
    pub async fn load(&mut self, backend: &dyn WallBackend) {
        match backend.fetch_wall().await {
            Ok(messages) => self.messages = messages,
            Err(error) => warn!(%error, "Failed to fetch the wall"),
        }
        self.loading = false;
    }

    /// Re-runs the full query. Called on every change notification, whatever
    /// the change was.
    pub async fn refresh(&mut self, backend: &dyn WallBackend) {
        self.load(backend).await;
    }

    /// Input boundary of the draft: characters beyond the cap are dropped,
    /// so the remaining-character counter can never go negative.
    pub fn push_char(&mut self, c: char) {
        if self.draft.chars().count() < MESSAGE_BODY_MAX_LEN {
            self.draft.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.draft.pop();
    }

    #[must_use]
    pub fn chars_remaining(&self) -> usize {
        MESSAGE_BODY_MAX_LEN - self.draft.chars().count()
    }

    #[must_use]
    pub fn can_share(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Stages a photo for the next share, replacing any previous one.
    pub fn stage_photo(&mut self, photo: StagedPhoto) {
        self.photo = Some(photo);
    }

    /// Submits the draft. No-op while the draft is empty or whitespace-only.
    /// With a staged photo the upload happens first; if it fails, the whole
    /// submission is aborted and the draft (text and photo) survives so the
    /// user can retry. Only a successful insert clears the draft.
    pub async fn share(&mut self, backend: &dyn WallBackend) {
        let Ok(body) = MessageBody::new(self.draft.clone()) else {
            return;
        };

        let photo_url = match &self.photo {
            Some(photo) => {
                let key = photo.object_key(OffsetDateTime::now_utc());
                match backend
                    .upload_photo(&key, photo.bytes.clone(), photo.content_type)
                    .await
                {
                    Ok(url) => Some(url),
                    Err(error) => {
                        self.alert = Some(format!("Error uploading photo: {error}"));
                        return;
                    }
                }
            }
            None => None,
        };

        let message = NewMessage {
            author: self.author.clone(),
            body,
            photo_url,
        };

        match backend.post_message(message).await {
            Ok(()) => {
                self.draft.clear();
                self.photo = None;
            }
            Err(error) => {
                self.alert = Some(format!("Error posting message: {error}"));
            }
        }
    }

    pub fn raise_alert(&mut self, message: String) {
        self.alert = Some(message);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.messages.len() {
            self.scroll += 1;
        }
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn photo(&self) -> Option<&StagedPhoto> {
        self.photo.as_ref()
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }
}
