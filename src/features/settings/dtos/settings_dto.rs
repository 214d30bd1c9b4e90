use serde::Deserialize;

/// Settings form submission; a blank or omitted field clears that identifier
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSettingsDto {
    #[serde(default)]
    pub dynamodb_table: Option<String>,
    #[serde(default)]
    pub s3_bucket: Option<String>,
}
