use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;

use crate::features::members::handlers::{add_member, add_member_form, list_members};
use crate::features::members::services::MemberService;
use crate::features::settings::SettingsService;
use crate::shared::constants::{ADD_MEMBER_PATH, MEMBERS_PATH};

/// Shared state for the member handlers
#[derive(Clone)]
pub struct MembersState {
    pub member_service: Arc<MemberService>,
    pub settings_service: Arc<SettingsService>,
}

/// Create routes for the members feature
///
/// `max_body_size` bounds the add-member upload, photo included.
pub fn routes(state: MembersState, max_body_size: usize) -> Router {
    Router::new()
        .route(MEMBERS_PATH, get(list_members))
        .route(
            ADD_MEMBER_PATH,
            get(add_member_form)
                .post(add_member)
                .layer(DefaultBodyLimit::max(max_body_size)),
        )
        .with_state(state)
}
