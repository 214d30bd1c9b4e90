/// Placeholder shown on the settings page for an unset identifier
pub const NOT_SET_PLACEHOLDER: &str = "Not set";

/// Cookie carrying a one-shot notice across a redirect
pub const NOTICE_COOKIE: &str = "notice";

/// Content type used when a photo part does not declare one
pub const DEFAULT_PHOTO_CONTENT_TYPE: &str = "application/octet-stream";

// =============================================================================
// ROUTES
// =============================================================================

pub const HOME_PATH: &str = "/";
pub const MEMBERS_PATH: &str = "/members";
pub const ADD_MEMBER_PATH: &str = "/add_member";
pub const SETTINGS_PATH: &str = "/settings";
