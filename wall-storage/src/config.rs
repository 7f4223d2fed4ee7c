use serde::{Deserialize, Serialize};

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Bucket holding uploaded photos.
    pub bucket: String,
    /// Base URL under which objects in the bucket are publicly fetchable.
    pub public_base_url: String,
}

impl StorageConfig {
    /// Resolves the public URL of an object. Same key, same URL.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_joins_base_and_key() {
        let config = StorageConfig {
            bucket: "wall-photos".to_owned(),
            public_base_url: "https://cdn.example.com/wall-photos".to_owned(),
        };

        assert_eq!(
            config.public_url("1756555200000.png"),
            "https://cdn.example.com/wall-photos/1756555200000.png"
        );
    }

    #[test]
    fn public_url_tolerates_trailing_slash() {
        let config = StorageConfig {
            bucket: "wall-photos".to_owned(),
            public_base_url: "https://cdn.example.com/wall-photos/".to_owned(),
        };

        assert_eq!(
            config.public_url("a.png"),
            "https://cdn.example.com/wall-photos/a.png"
        );
    }
}
