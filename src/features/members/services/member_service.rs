use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::features::members::dtos::{NewMemberDto, PhotoUpload};
use crate::modules::storage::{BlobError, MemberStore, PhotoStore, StoreError};
use crate::shared::types::Member;

/// Why a member could not be registered
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Error uploading to S3: {0}")]
    Upload(#[source] BlobError),

    #[error("Error saving to DynamoDB: {0}")]
    Save(#[source] StoreError),
}

/// Service for member operations
pub struct MemberService {
    member_store: Arc<dyn MemberStore>,
    photo_store: Arc<dyn PhotoStore>,
}

impl MemberService {
    pub fn new(member_store: Arc<dyn MemberStore>, photo_store: Arc<dyn PhotoStore>) -> Self {
        Self {
            member_store,
            photo_store,
        }
    }

    /// Object key for a photo: a fresh UUID v4 followed by the original filename
    pub fn photo_key(file_name: &str) -> String {
        format!("{}-{}", Uuid::new_v4(), file_name)
    }

    /// List every member in the table
    pub async fn list(&self, table_id: &str) -> Result<Vec<Member>, StoreError> {
        self.member_store.scan_all(table_id).await
    }

    /// Register a member: upload the photo (if any), then write the record.
    ///
    /// The upload always precedes the write. If the write fails after a
    /// successful upload, the photo stays in the bucket.
    ///
    /// # Arguments
    /// * `table_id` - The member table
    /// * `bucket_id` - The photo bucket
    /// * `dto` - The submitted form
    ///
    /// # Returns
    /// The stored member record
    pub async fn register(
        &self,
        table_id: &str,
        bucket_id: &str,
        dto: NewMemberDto,
    ) -> Result<Member, RegisterError> {
        let photo_url = match dto.photo {
            Some(photo) => self.upload_photo(bucket_id, photo).await?,
            None => String::new(),
        };

        let member = Member {
            name: dto.name,
            student_id: dto.student_id,
            department: dto.department,
            photo_url,
        };

        if let Err(e) = self.member_store.put_item(table_id, &member).await {
            if !member.photo_url.is_empty() {
                warn!(
                    "Photo '{}' left without a member record after failed write",
                    member.photo_url
                );
            }
            return Err(RegisterError::Save(e));
        }

        info!(
            "Member registered: student_id={}, table={}, has_photo={}",
            member.student_id,
            table_id,
            !member.photo_url.is_empty()
        );
        Ok(member)
    }

    async fn upload_photo(
        &self,
        bucket_id: &str,
        photo: PhotoUpload,
    ) -> Result<String, RegisterError> {
        let key = Self::photo_key(&photo.file_name);

        self.photo_store
            .upload(bucket_id, &key, photo.data, &photo.content_type)
            .await
            .map_err(RegisterError::Upload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{fake_member_dto, Call, RecordingStores};

    #[test]
    fn test_photo_key_keeps_filename() {
        let key = MemberService::photo_key("me.png");
        let (id, name) = key.split_at(36);

        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(name, "-me.png");
        assert_ne!(key, MemberService::photo_key("me.png"));
    }

    #[tokio::test]
    async fn test_register_with_photo_uploads_before_write() {
        let stores = RecordingStores::new();
        let service = stores.service();

        let dto = fake_member_dto(Some("portrait.jpg"));
        let member = service.register("members", "photos", dto).await.unwrap();

        let calls = stores.calls();
        assert_eq!(calls.len(), 2);
        match (&calls[0], &calls[1]) {
            (Call::Upload { bucket, key }, Call::Put { table, member: stored }) => {
                assert_eq!(bucket, "photos");
                assert!(key.ends_with("-portrait.jpg"));
                assert_eq!(table, "members");
                assert_eq!(stored, &member);
                assert_eq!(
                    member.photo_url,
                    format!("https://photos.s3.amazonaws.com/{}", key)
                );
            }
            other => panic!("unexpected calls: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_without_photo_stores_empty_url() {
        let stores = RecordingStores::new();
        let service = stores.service();

        let member = service
            .register("members", "photos", fake_member_dto(None))
            .await
            .unwrap();

        assert_eq!(member.photo_url, "");
        assert!(matches!(stores.calls().as_slice(), [Call::Put { .. }]));
    }

    #[tokio::test]
    async fn test_failed_upload_skips_write() {
        let stores = RecordingStores::new().failing_upload();
        let service = stores.service();

        let result = service
            .register("members", "photos", fake_member_dto(Some("a.png")))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, RegisterError::Upload(_)));
        assert!(err.to_string().starts_with("Error uploading to S3: "));
        assert!(stores.stored_members().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_uploaded_photo() {
        let stores = RecordingStores::new().failing_put();
        let service = stores.service();

        let err = service
            .register("members", "photos", fake_member_dto(Some("a.png")))
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Error saving to DynamoDB: "));
        assert_eq!(stores.uploaded_keys().len(), 1);
        assert!(stores.stored_members().is_empty());
    }
}
