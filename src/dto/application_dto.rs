use bytes::Bytes;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use validator::{Validate, ValidationErrors};

use crate::auth::identity::Identity;
use crate::models::application::Application;
use crate::utils::validation::validate_pdf_upload;

/// A file held fully in memory for the duration of the upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn pdf(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self::new(file_name, crate::utils::validation::PDF_MIME, bytes)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

// Validation errors carry the field value as a param; only metadata goes in.
impl Serialize for UploadFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("UploadFile", 3)?;
        s.serialize_field("file_name", &self.file_name)?;
        s.serialize_field("content_type", &self.content_type)?;
        s.serialize_field("size", &self.bytes.len())?;
        s.end()
    }
}

#[derive(Debug, Clone, Validate)]
pub struct ApplicationForm {
    #[validate(length(min = 2, message = "Full name must be at least 2 characters"))]
    pub full_name: String,
    #[validate(length(min = 7, message = "Phone number must be at least 7 characters"))]
    pub phone_number: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_pdf_upload"))]
    pub cv: UploadFile,
    pub document: Option<UploadFile>,
}

impl ApplicationForm {
    pub fn new(
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
        cv: UploadFile,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone_number: phone_number.into(),
            email: email.into(),
            cv,
            document: None,
        }
    }

    /// Starts a form from the signed-in user's profile.
    pub fn prefilled(identity: &Identity, cv: UploadFile) -> Self {
        Self::new(
            identity.display_name.clone().unwrap_or_default(),
            String::new(),
            identity.email.clone().unwrap_or_default(),
            cv,
        )
    }

    pub fn with_document(mut self, document: UploadFile) -> Self {
        self.document = Some(document);
        self
    }

    /// Field constraints plus the optional supporting document.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if let Some(document) = &self.document {
            if let Err(err) = validate_pdf_upload(document) {
                errors.add("document", err);
            }
        }
        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Multipart field names expected by `POST /apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyFormContract {
    pub career_id: &'static str,
    pub full_name: &'static str,
    pub phone_number: &'static str,
    pub email: &'static str,
    pub cv: &'static str,
    pub document: &'static str,
}

impl Default for ApplyFormContract {
    fn default() -> Self {
        Self {
            career_id: "career_id",
            full_name: "full_name",
            phone_number: "phone_number",
            email: "email",
            cv: "cv",
            document: "document",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckApplicationsRequest<'a> {
    #[serde(rename = "careerIds")]
    pub career_ids: &'a [i64],
    #[serde(rename = "userId")]
    pub user_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppliedCareer {
    #[serde(alias = "careerId")]
    pub career_id: i64,
}

/// Accepts `{ "data": T }` as well as a bare `T`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DataEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> DataEnvelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            DataEnvelope::Wrapped { data } => data,
            DataEnvelope::Bare(data) => data,
        }
    }
}

/// Body returned by `POST /apply`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubmittedApplication {
    Wrapped { data: Application },
    Record(Application),
    Receipt {
        application_id: i64,
        #[serde(default)]
        message: Option<String>,
    },
}

impl SubmittedApplication {
    pub fn application_id(&self) -> i64 {
        match self {
            SubmittedApplication::Wrapped { data } => data.id,
            SubmittedApplication::Record(app) => app.id,
            SubmittedApplication::Receipt { application_id, .. } => *application_id,
        }
    }

    pub fn application(&self) -> Option<&Application> {
        match self {
            SubmittedApplication::Wrapped { data } => Some(data),
            SubmittedApplication::Record(app) => Some(app),
            SubmittedApplication::Receipt { .. } => None,
        }
    }
}
