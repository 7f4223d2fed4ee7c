use crate::config::StorageConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;
use thiserror::Error;
use tracing::debug;

pub type Result<T, E = StorageError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Error uploading object: {0}")]
    Upload(#[from] SdkError<PutObjectError>),
    #[error("Error checking bucket: {0}")]
    Bucket(#[from] SdkError<HeadBucketError>),
}

pub struct StorageClient {
    client: Client,
    config: StorageConfig,
}

impl StorageClient {
    #[must_use]
    pub fn new(sdk_config: &aws_config::SdkConfig, config: StorageConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
            config,
        }
    }

    /// Uploads an object under `key`. The object becomes fetchable at
    /// [`Self::public_url`] once this returns.
    pub async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        debug!(key, content_type, size = bytes.len(), "Uploading object");

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await?;

        Ok(())
    }

    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        self.config.public_url(key)
    }

    /// Heads the bucket so a misconfiguration fails at startup instead of on
    /// the first share.
    pub async fn health_check(&self) -> Result<()> {
        self.client
            .head_bucket()
            .bucket(&self.config.bucket)
            .send()
            .await?;

        Ok(())
    }
}
