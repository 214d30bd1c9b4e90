use serde::{Deserialize, Serialize};

/// A registered member as stored in the member table.
///
/// Every attribute defaults to an empty string so that items written by other
/// tools with missing attributes still list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub department: String,
    /// Public URL of the uploaded photo, empty when none was supplied
    #[serde(default)]
    pub photo_url: String,
}
