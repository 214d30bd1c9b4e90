use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::core::config::RegistryConfig;
use crate::features::settings::models::RegistrySettings;

/// Process-wide registry settings, shared by every handler.
///
/// Updates swap a whole immutable [`RegistrySettings`] record, so readers never
/// observe a half-applied change. Concurrent writers are last-writer-wins.
pub struct SettingsService {
    current: ArcSwap<RegistrySettings>,
}

impl SettingsService {
    pub fn new(initial: RegistrySettings) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(RegistrySettings::new(
            config.dynamodb_table.clone(),
            config.s3_bucket.clone(),
        ))
    }

    /// Snapshot of the current settings
    pub fn get(&self) -> Arc<RegistrySettings> {
        self.current.load_full()
    }

    /// Replace both identifiers at once; `None` or empty leaves a field unset
    pub fn set(&self, table_id: Option<String>, bucket_id: Option<String>) -> Arc<RegistrySettings> {
        let settings = Arc::new(RegistrySettings::new(table_id, bucket_id));
        self.current.store(Arc::clone(&settings));

        info!(
            "Registry settings updated: table={}, bucket={}",
            settings.table_display(),
            settings.bucket_display()
        );
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_both_fields() {
        let service = SettingsService::new(RegistrySettings::new(
            Some("old-table".to_string()),
            Some("old-bucket".to_string()),
        ));

        service.set(Some("new-table".to_string()), None);

        let current = service.get();
        assert_eq!(current.table_id.as_deref(), Some("new-table"));
        assert_eq!(current.bucket_id, None);
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_set() {
        let service = SettingsService::new(RegistrySettings::default());
        let before = service.get();

        service.set(Some("T1".to_string()), Some("B1".to_string()));

        assert_eq!(*before, RegistrySettings::default());
        assert_eq!(service.get().bucket_id.as_deref(), Some("B1"));
    }

    #[test]
    fn test_from_config() {
        let service = SettingsService::from_config(&RegistryConfig {
            dynamodb_table: Some("members".to_string()),
            s3_bucket: None,
        });

        assert_eq!(service.get().table_display(), "members");
        assert_eq!(service.get().bucket_display(), "Not set");
    }
}
