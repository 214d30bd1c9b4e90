//! S3 photo bucket
//!
//! Uses rust-s3 crate for lightweight S3 operations. The bucket is chosen per
//! upload because it can be changed at runtime from the settings page.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, info};

use super::{BlobError, PhotoStore};
use crate::core::config::AwsConfig;

/// S3-compatible photo store
pub struct S3PhotoStore {
    region: Region,
    credentials: Credentials,
    /// Custom endpoint (LocalStack, MinIO); `None` targets AWS itself
    endpoint: Option<String>,
}

impl S3PhotoStore {
    /// Create a new photo store from configuration
    ///
    /// Credentials are resolved from the environment, the shared profile or
    /// instance metadata, in that order.
    pub fn new(config: &AwsConfig) -> Result<Self, String> {
        let credentials = Credentials::new(None, None, None, None, None)
            .map_err(|e| format!("Failed to load S3 credentials: {}", e))?;

        let region = match &config.endpoint_url {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse::<Region>()
                .map_err(|e| format!("Invalid AWS region '{}': {}", config.region, e))?,
        };

        info!(
            "S3 photo store initialized for region: {}, endpoint: {}",
            config.region,
            config.endpoint_url.as_deref().unwrap_or("aws")
        );

        Ok(Self {
            region,
            credentials,
            endpoint: config.endpoint_url.clone(),
        })
    }

    /// Get the public URL for an uploaded object
    ///
    /// AWS buckets use virtual-hosted style URLs; custom endpoints use path style.
    pub fn public_url(endpoint: Option<&str>, bucket_id: &str, key: &str) -> String {
        let key = urlencoding::encode(key);
        match endpoint {
            Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket_id, key),
            None => format!("https://{}.s3.amazonaws.com/{}", bucket_id, key),
        }
    }
}

#[async_trait]
impl PhotoStore for S3PhotoStore {
    async fn upload(
        &self,
        bucket_id: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        let mut bucket = Bucket::new(bucket_id, self.region.clone(), self.credentials.clone())
            .map_err(|e| BlobError::Bucket {
                bucket: bucket_id.to_string(),
                message: e.to_string(),
            })?;

        // Use path-style URLs for custom endpoints (http://endpoint/bucket instead of http://bucket.endpoint)
        if self.endpoint.is_some() {
            bucket.set_path_style();
        }

        let upload_error = |message: String| BlobError::Upload {
            bucket: bucket_id.to_string(),
            key: key.to_string(),
            message,
        };

        let response = bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| upload_error(e.to_string()))?;

        let status = response.status_code();
        if !(200..300).contains(&status) {
            let body = String::from_utf8_lossy(response.as_slice()).into_owned();
            return Err(upload_error(format!("status {}: {}", status, body)));
        }

        debug!("Uploaded file '{}' to bucket '{}'", key, bucket_id);
        Ok(Self::public_url(self.endpoint.as_deref(), bucket_id, key))
    }
}
