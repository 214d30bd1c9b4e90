use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fake::faker::company::en::Industry;
use fake::faker::name::en::Name;
use fake::Fake;

use crate::features::members::dtos::{NewMemberDto, PhotoUpload};
use crate::features::members::{MemberService, MembersState};
use crate::features::settings::{RegistrySettings, SettingsService};
use crate::modules::storage::{BlobError, MemberStore, PhotoStore, S3PhotoStore, StoreError};
use crate::shared::types::Member;

/// A capability call observed by [`RecordingStores`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Scan { table: String },
    Put { table: String, member: Member },
    Upload { bucket: String, key: String },
}

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Call>>,
    tables: Mutex<HashMap<String, Vec<Member>>>,
    fail_scan: AtomicBool,
    fail_put: AtomicBool,
    fail_upload: AtomicBool,
}

/// In-memory member table and photo bucket that record every call in order
#[derive(Clone, Default)]
pub struct RecordingStores {
    recorder: Arc<Recorder>,
}

impl RecordingStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_scan(self) -> Self {
        self.recorder.fail_scan.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_put(self) -> Self {
        self.recorder.fail_put.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_upload(self) -> Self {
        self.recorder.fail_upload.store(true, Ordering::SeqCst);
        self
    }

    pub fn service(&self) -> MemberService {
        MemberService::new(Arc::new(self.clone()), Arc::new(self.clone()))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.recorder.calls.lock().unwrap().clone()
    }

    pub fn stored_members(&self) -> Vec<Member> {
        self.recorder
            .tables
            .lock()
            .unwrap()
            .values()
            .flatten()
            .cloned()
            .collect()
    }

    pub fn uploaded_keys(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Upload { key, .. } => Some(key),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.recorder.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MemberStore for RecordingStores {
    async fn scan_all(&self, table_id: &str) -> Result<Vec<Member>, StoreError> {
        self.record(Call::Scan {
            table: table_id.to_string(),
        });

        if self.recorder.fail_scan.load(Ordering::SeqCst) {
            return Err(StoreError::Scan {
                table: table_id.to_string(),
                message: "ResourceNotFoundException: Requested resource not found".to_string(),
            });
        }

        Ok(self
            .recorder
            .tables
            .lock()
            .unwrap()
            .get(table_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn put_item(&self, table_id: &str, member: &Member) -> Result<(), StoreError> {
        self.record(Call::Put {
            table: table_id.to_string(),
            member: member.clone(),
        });

        if self.recorder.fail_put.load(Ordering::SeqCst) {
            return Err(StoreError::Put {
                table: table_id.to_string(),
                message: "AccessDeniedException: not authorized to perform dynamodb:PutItem"
                    .to_string(),
            });
        }

        self.recorder
            .tables
            .lock()
            .unwrap()
            .entry(table_id.to_string())
            .or_default()
            .push(member.clone());
        Ok(())
    }
}

#[async_trait]
impl PhotoStore for RecordingStores {
    async fn upload(
        &self,
        bucket_id: &str,
        key: &str,
        _data: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, BlobError> {
        self.record(Call::Upload {
            bucket: bucket_id.to_string(),
            key: key.to_string(),
        });

        if self.recorder.fail_upload.load(Ordering::SeqCst) {
            return Err(BlobError::Upload {
                bucket: bucket_id.to_string(),
                key: key.to_string(),
                message: "status 403: AccessDenied".to_string(),
            });
        }

        Ok(S3PhotoStore::public_url(None, bucket_id, key))
    }
}

/// A random add-member submission, optionally with a photo of the given filename
pub fn fake_member_dto(photo_file_name: Option<&str>) -> NewMemberDto {
    NewMemberDto {
        name: Name().fake(),
        student_id: (10_000_000..99_999_999u32).fake::<u32>().to_string(),
        department: Industry().fake(),
        photo: photo_file_name.map(|file_name| PhotoUpload {
            file_name: file_name.to_string(),
            content_type: "image/png".to_string(),
            data: vec![0x89, b'P', b'N', b'G'],
        }),
    }
}

/// Handler state backed by recording stores and the given settings
pub fn members_state(
    stores: &RecordingStores,
    table_id: Option<&str>,
    bucket_id: Option<&str>,
) -> MembersState {
    MembersState {
        member_service: Arc::new(stores.service()),
        settings_service: Arc::new(SettingsService::new(RegistrySettings::new(
            table_id.map(str::to_string),
            bucket_id.map(str::to_string),
        ))),
    }
}
