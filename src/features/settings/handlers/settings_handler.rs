use std::sync::Arc;

use axum::extract::State;
use minijinja::context;

use crate::core::error::Result;
use crate::core::extractor::{AppForm, PendingNotice};
use crate::features::settings::dtos::UpdateSettingsDto;
use crate::features::settings::services::SettingsService;
use crate::shared::constants::HOME_PATH;
use crate::shared::notice::{Notice, NoticeRedirect};
use crate::shared::templates::{render_page, Page};

/// Show the current storage targets
pub async fn show_settings(
    State(service): State<Arc<SettingsService>>,
    pending: PendingNotice,
) -> Result<Page> {
    let settings = service.get();

    render_page(
        "settings.html",
        context! {
            dynamodb_table => settings.table_display(),
            s3_bucket => settings.bucket_display(),
        },
        pending,
        None,
    )
}

/// Replace the storage targets
///
/// Identifiers are not checked against AWS; a wrong name surfaces on the next
/// list or add.
pub async fn update_settings(
    State(service): State<Arc<SettingsService>>,
    AppForm(dto): AppForm<UpdateSettingsDto>,
) -> NoticeRedirect {
    service.set(dto.dynamodb_table, dto.s3_bucket);

    NoticeRedirect::new(HOME_PATH, Notice::success("Settings updated successfully."))
}
