use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use crate::config::Config;
use crate::storage::{ObjectStore, StorageError, StoredObject};

/// Object store backed by any S3-compatible bucket (AWS, MinIO, Supabase storage).
#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStore {
    /// Constructs an S3 client with static credentials against the configured endpoint.
    pub async fn from_config(config: &Config) -> Self {
        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "hireflow-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.s3_region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.s3_endpoint)
            .load()
            .await;

        // Path-style addressing keeps MinIO and other self-hosted endpoints working.
        let client_config = aws_sdk_s3::config::Builder::from(&s3_config)
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(client_config),
            bucket: config.s3_bucket.clone(),
            public_base_url: config.s3_public_base_url.clone(),
        }
    }

    pub fn public_url(&self, key: &str) -> String {
        public_url(&self.public_base_url, key)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::ObjectStore(format!("S3 upload failed: {e}")))?;

        info!("Uploaded resume to s3://{}/{}", self.bucket, key);

        Ok(StoredObject {
            key: key.to_string(),
            public_url: self.public_url(key),
        })
    }
}

fn public_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_joins_base_and_key() {
        assert_eq!(
            public_url("https://cdn.example.com/applicants-resume/", "abc_cv.pdf"),
            "https://cdn.example.com/applicants-resume/abc_cv.pdf"
        );
    }

    #[test]
    fn test_public_url_without_trailing_slash() {
        assert_eq!(
            public_url("http://localhost:9000/resumes", "k.txt"),
            "http://localhost:9000/resumes/k.txt"
        );
    }
}
