//! S3 client implementation.

use async_trait::async_trait;
use std::path::Path;

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::keys::public_object_url;

/// Configuration for the S3 client.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Static access key; when unset the default provider chain is used
    pub access_key_id: Option<String>,
    /// Static secret key, paired with `access_key_id`
    pub secret_access_key: Option<String>,
}

impl S3Config {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Ok(Self {
            bucket: std::env::var("S3_BUCKET")
                .map_err(|_| StorageError::config_error("S3_BUCKET not set"))?,
            region: std::env::var("S3_REGION")
                .map_err(|_| StorageError::config_error("S3_REGION not set"))?,
            access_key_id: std::env::var("S3_ACCESS_KEY_ID").ok(),
            secret_access_key: std::env::var("S3_SECRET_ACCESS_KEY").ok(),
        })
    }
}

/// Durable object storage capability consumed by the upload pipeline.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stream the file at `path` to storage under `key`.
    async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<()>;

    /// Publicly resolvable URL for an object key.
    fn object_url(&self, key: &str) -> String;
}

/// AWS S3 storage client.
#[derive(Clone)]
pub struct S3Client {
    client: Client,
    bucket: String,
    region: String,
}

impl S3Client {
    /// Create a new S3 client from configuration.
    ///
    /// Static credentials are used when the config carries them; otherwise
    /// the default AWS provider chain (env vars, profile, instance metadata)
    /// resolves them.
    pub async fn new(config: S3Config) -> StorageResult<Self> {
        let client = match (&config.access_key_id, &config.secret_access_key) {
            (Some(key_id), Some(secret)) => {
                let credentials = Credentials::new(key_id, secret, None, None, "clipdock");

                let s3_config = Builder::new()
                    .behavior_version(BehaviorVersion::latest())
                    .region(Region::new(config.region.clone()))
                    .credentials_provider(credentials)
                    .build();

                Client::from_conf(s3_config)
            }
            _ => {
                let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(config.region.clone()))
                    .load()
                    .await;

                Client::new(&sdk_config)
            }
        };

        Ok(Self {
            client,
            bucket: config.bucket,
            region: config.region,
        })
    }

    /// Create from environment variables.
    pub async fn from_env() -> StorageResult<Self> {
        let config = S3Config::from_env()?;
        Self::new(config).await
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<()> {
        debug!("Uploading {} to {}", path.display(), key);

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::upload_failed(e.to_string()))?;

        info!("Uploaded {} to {}", path.display(), key);
        Ok(())
    }

    fn object_url(&self, key: &str) -> String {
        public_object_url(&self.bucket, &self.region, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn static_config() -> S3Config {
        S3Config {
            bucket: "clips".to_string(),
            region: "us-east-2".to_string(),
            access_key_id: Some("AKIDEXAMPLE".to_string()),
            secret_access_key: Some("example-secret".to_string()),
        }
    }

    #[tokio::test]
    async fn test_new_with_static_credentials() {
        let client = S3Client::new(static_config()).await.unwrap();
        assert_eq!(
            client.object_url("landscape/abc"),
            "https://clips.s3.us-east-2.amazonaws.com/landscape/abc"
        );
    }
}
