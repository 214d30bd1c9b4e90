use thiserror::Error;

use crate::shared::constants::NOT_SET_PLACEHOLDER;

/// The member table and photo bucket the registry currently targets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySettings {
    pub table_id: Option<String>,
    pub bucket_id: Option<String>,
}

/// A capability was needed but its identifier is unset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigMissing {
    #[error("DynamoDB table is not configured. Please set it in the settings.")]
    Table,

    #[error("DynamoDB table or S3 bucket is not configured. Please set them in the settings.")]
    TableOrBucket,
}

impl RegistrySettings {
    pub fn new(table_id: Option<String>, bucket_id: Option<String>) -> Self {
        Self {
            table_id: table_id.filter(|s| !s.is_empty()),
            bucket_id: bucket_id.filter(|s| !s.is_empty()),
        }
    }

    /// The member table, required for listing
    pub fn require_table(&self) -> Result<&str, ConfigMissing> {
        self.table_id.as_deref().ok_or(ConfigMissing::Table)
    }

    /// Both identifiers, required for registering a member
    pub fn require_table_and_bucket(&self) -> Result<(&str, &str), ConfigMissing> {
        match (self.table_id.as_deref(), self.bucket_id.as_deref()) {
            (Some(table), Some(bucket)) => Ok((table, bucket)),
            _ => Err(ConfigMissing::TableOrBucket),
        }
    }

    pub fn table_display(&self) -> &str {
        self.table_id.as_deref().unwrap_or(NOT_SET_PLACEHOLDER)
    }

    pub fn bucket_display(&self) -> &str {
        self.bucket_id.as_deref().unwrap_or(NOT_SET_PLACEHOLDER)
    }
}
