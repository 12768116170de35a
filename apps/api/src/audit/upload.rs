use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// Multipart field carrying the resume file.
pub const RESUME_FIELD: &str = "resume";

const FALLBACK_MIME: &str = "application/pdf";

/// File types the extractor can read.
const ACCEPTED_TYPES: &[(&str, &[&str])] = &[
    ("application/pdf", &["pdf"]),
    ("image/jpeg", &["jpg", "jpeg"]),
    ("image/png", &["png"]),
];

/// A resume received from a client, ready to hand to the extractor.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub data: Bytes,
}

/// Reads the `resume` field out of a multipart body. Other fields are ignored.
pub async fn read_resume_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        return build_upload(file_name, content_type.as_deref(), data);
    }

    Err(AppError::Validation(format!(
        "multipart field '{RESUME_FIELD}' is required"
    )))
}

fn build_upload(
    file_name: String,
    content_type: Option<&str>,
    data: Bytes,
) -> Result<ResumeUpload, AppError> {
    if data.is_empty() {
        return Err(AppError::Validation(format!("'{file_name}' is empty")));
    }
    let mime_type = resolve_mime(content_type, &file_name)?;
    Ok(ResumeUpload {
        file_name,
        mime_type,
        data,
    })
}

/// Picks the MIME type sent to the model: declared content type first, then
/// the file extension, then PDF. Only PDF, JPEG and PNG are accepted.
pub fn resolve_mime(content_type: Option<&str>, file_name: &str) -> Result<&'static str, AppError> {
    let declared = content_type
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");

    if let Some(declared) = declared {
        let declared = if declared == "image/jpg" {
            "image/jpeg".to_string()
        } else {
            declared
        };
        return ACCEPTED_TYPES
            .iter()
            .find(|(mime, _)| *mime == declared)
            .map(|(mime, _)| *mime)
            .ok_or_else(|| {
                AppError::UnsupportedMediaType(format!(
                    "'{declared}' is not supported; upload a PDF, JPEG or PNG"
                ))
            });
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension {
        Some(ext) => ACCEPTED_TYPES
            .iter()
            .find(|(_, exts)| exts.contains(&ext.as_str()))
            .map(|(mime, _)| *mime)
            .ok_or_else(|| {
                AppError::UnsupportedMediaType(format!(
                    "'.{ext}' files are not supported; upload a PDF, JPEG or PNG"
                ))
            }),
        None => Ok(FALLBACK_MIME),
    }
}
