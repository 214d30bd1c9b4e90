use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use minijinja::context;
use tracing::warn;

use crate::core::error::Result;
use crate::core::extractor::PendingNotice;
use crate::features::members::dtos::NewMemberDto;
use crate::features::members::MembersState;
use crate::features::settings::ConfigMissing;
use crate::shared::constants::{ADD_MEMBER_PATH, MEMBERS_PATH, SETTINGS_PATH};
use crate::shared::notice::{Notice, NoticeRedirect};
use crate::shared::templates::{render_page, Page};
use crate::shared::types::Member;

fn to_settings(missing: ConfigMissing) -> Response {
    NoticeRedirect::new(SETTINGS_PATH, Notice::error(missing.to_string())).into_response()
}

/// List all members
///
/// A failing table degrades to an empty list with an error notice.
pub async fn list_members(
    State(state): State<MembersState>,
    pending: PendingNotice,
) -> Result<Response> {
    let settings = state.settings_service.get();
    let table_id = match settings.require_table() {
        Ok(table_id) => table_id,
        Err(missing) => return Ok(to_settings(missing)),
    };

    let (members, raised) = match state.member_service.list(table_id).await {
        Ok(members) => (members, None),
        Err(e) => {
            warn!("Failed to list members: {}", e);
            let notice = Notice::error(format!("Error accessing DynamoDB: {}", e));
            (Vec::<Member>::new(), Some(notice))
        }
    };

    let page = render_page(
        "members.html",
        context! { members => members },
        pending,
        raised,
    )?;
    Ok(page.into_response())
}

/// Show the add-member form
pub async fn add_member_form(pending: PendingNotice) -> Result<Page> {
    render_page("add_member.html", context! {}, pending, None)
}

/// Register a member from the multipart form
///
/// Redirects to the member list on success and back to the form with an
/// error notice when the upload or the write fails.
pub async fn add_member(
    State(state): State<MembersState>,
    multipart: Multipart,
) -> Result<Response> {
    let settings = state.settings_service.get();
    let (table_id, bucket_id) = match settings.require_table_and_bucket() {
        Ok(ids) => ids,
        Err(missing) => return Ok(to_settings(missing)),
    };

    let dto = NewMemberDto::from_multipart(multipart).await?;

    match state.member_service.register(table_id, bucket_id, dto).await {
        Ok(_) => Ok(Redirect::to(MEMBERS_PATH).into_response()),
        Err(e) => {
            warn!("Failed to register member: {}", e);
            Ok(NoticeRedirect::new(ADD_MEMBER_PATH, Notice::error(e.to_string())).into_response())
        }
    }
}
