use axum::extract::Multipart;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::shared::constants::DEFAULT_PHOTO_CONTENT_TYPE;

/// A photo attached to the add-member form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Add-member form submission
///
/// Accepts multipart/form-data with:
/// - `name`, `student_id`, `department`: required text fields (may be empty)
/// - `photo`: optional file; a part without a filename means no photo was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemberDto {
    pub name: String,
    pub student_id: String,
    pub department: String,
    pub photo: Option<PhotoUpload>,
}

impl NewMemberDto {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut name: Option<String> = None;
        let mut student_id: Option<String> = None;
        let mut department: Option<String> = None;
        let mut photo: Option<PhotoUpload> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            debug!("Failed to read multipart field: {}", e);
            AppError::BadRequest(format!("Failed to read multipart data: {}", e))
        })? {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "name" | "student_id" | "department" => {
                    let text = field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read {} field: {}", field_name, e))
                    })?;
                    let slot = match field_name.as_str() {
                        "name" => &mut name,
                        "student_id" => &mut student_id,
                        _ => &mut department,
                    };
                    *slot = Some(text);
                }
                "photo" => {
                    let file_name = field.file_name().unwrap_or("").to_string();
                    let content_type = field
                        .content_type()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| DEFAULT_PHOTO_CONTENT_TYPE.to_string());

                    let data = field.bytes().await.map_err(|e| {
                        debug!("Failed to read photo bytes: {}", e);
                        AppError::BadRequest(format!("Failed to read photo data: {}", e))
                    })?;

                    photo = if file_name.is_empty() {
                        None
                    } else {
                        Some(PhotoUpload {
                            file_name,
                            content_type,
                            data: data.to_vec(),
                        })
                    };
                }
                _ => {
                    debug!("Ignoring unknown field: {}", field_name);
                }
            }
        }

        Ok(Self {
            name: required(name, "name")?,
            student_id: required(student_id, "student_id")?,
            department: required(department, "department")?,
            photo,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}
