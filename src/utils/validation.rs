use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::dto::application_dto::UploadFile;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const PDF_MIME: &str = "application/pdf";

/// Uploads must be PDFs no larger than [`MAX_UPLOAD_BYTES`].
pub fn validate_pdf_upload(file: &UploadFile) -> Result<(), ValidationError> {
    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(with_message("file_size", "File size must be less than 5MB"));
    }
    if !file.content_type.eq_ignore_ascii_case(PDF_MIME) {
        return Err(with_message("file_type", "Only PDF format is supported"));
    }
    Ok(())
}

pub fn with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// First human-readable message, fields taken in name order.
pub fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(name, errs)| errs.iter().map(move |e| (name.clone(), e)))
        .next()
        .map(|(name, e)| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", name))
        })
        .unwrap_or_else(|| "Invalid form".to_string())
}
