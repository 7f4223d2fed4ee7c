use std::path::Path;
use time::OffsetDateTime;

/// A photo staged for the next share. At most one is retained; staging a new
/// one replaces it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct StagedPhoto {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

impl StagedPhoto {
    pub async fn read_from(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "photo".to_owned(), |name| name.to_string_lossy().into_owned());

        Ok(Self {
            content_type: content_type_for(&file_name),
            file_name,
            bytes,
        })
    }

    /// Derives the object key: upload time in milliseconds plus the original
    /// file extension. Collision-resistant for a low-volume feed.
    #[must_use]
    pub fn object_key(&self, at: OffsetDateTime) -> String {
        let millis = at.unix_timestamp_nanos() / 1_000_000;
        match self.file_name.rsplit_once('.') {
            Some((_, extension)) => format!("{millis}.{extension}"),
            None => millis.to_string(),
        }
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map_or("", |(_, extension)| extension);

    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn photo(file_name: &str) -> StagedPhoto {
        StagedPhoto {
            file_name: file_name.to_owned(),
            bytes: vec![0; 4],
            content_type: content_type_for(file_name),
        }
    }

    #[test]
    fn object_key_is_millis_plus_extension() {
        let at = datetime!(1970-01-01 0:00:01 UTC);
        assert_eq!(photo("cat.png").object_key(at), "1000.png");
        assert_eq!(photo("archive.tar.gz").object_key(at), "1000.gz");
        assert_eq!(photo("noextension").object_key(at), "1000");
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(photo("cat.PNG").content_type, "image/png");
        assert_eq!(photo("cat.jpeg").content_type, "image/jpeg");
        assert_eq!(photo("cat.bin").content_type, "application/octet-stream");
        assert_eq!(photo("noextension").content_type, "application/octet-stream");
    }
}
