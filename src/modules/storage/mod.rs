//! Storage module for member records and photos
//!
//! Handlers depend on the [`MemberStore`] and [`PhotoStore`] capabilities; the
//! DynamoDB and S3 adapters are the production implementations.

mod dynamodb_client;
mod s3_client;

pub use dynamodb_client::DynamoDbMemberStore;
pub use s3_client::S3PhotoStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::types::Member;

/// Errors raised by a [`MemberStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to scan table '{table}': {message}")]
    Scan { table: String, message: String },

    #[error("failed to write to table '{table}': {message}")]
    Put { table: String, message: String },
}

/// Errors raised by a [`PhotoStore`]
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("invalid bucket '{bucket}': {message}")]
    Bucket { bucket: String, message: String },

    #[error("failed to upload '{key}' to bucket '{bucket}': {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },
}

/// Key-value table holding member records
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Return every member in the table, in the store's native scan order
    async fn scan_all(&self, table_id: &str) -> Result<Vec<Member>, StoreError>;

    /// Write a member record
    async fn put_item(&self, table_id: &str, member: &Member) -> Result<(), StoreError>;
}

/// Object store holding member photos
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Upload an object and return its public URL
    ///
    /// # Arguments
    /// * `bucket_id` - The bucket to upload into
    /// * `key` - The object key
    /// * `data` - The file content as bytes
    /// * `content_type` - The MIME type of the file
    async fn upload(
        &self,
        bucket_id: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError>;
}
