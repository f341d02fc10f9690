use reqwest::multipart::{Form, Part};
use tracing::info;

use crate::auth::identity::Identity;
use crate::dto::application_dto::{
    AppliedCareer, ApplicationForm, ApplyFormContract, CheckApplicationsRequest, DataEnvelope,
    SubmittedApplication, UploadFile,
};
use crate::error::Result;
use crate::models::application::Application;

use super::api_client::{ApiClient, RequestOptions};

/// Endpoints that require the user's bearer token.
#[derive(Clone)]
pub struct ApplicationService {
    api: ApiClient,
    contract: ApplyFormContract,
}

impl ApplicationService {
    pub fn new(api: ApiClient) -> Self {
        Self::with_contract(api, ApplyFormContract::default())
    }

    pub fn with_contract(api: ApiClient, contract: ApplyFormContract) -> Self {
        Self { api, contract }
    }

    pub async fn submit(
        &self,
        identity: &Identity,
        career_id: i64,
        form: &ApplicationForm,
    ) -> Result<SubmittedApplication> {
        let body = self.build_form(career_id, form)?;
        info!(
            career_id,
            uid = %identity.uid,
            cv_bytes = form.cv.size(),
            has_document = form.document.is_some(),
            "Submitting application"
        );

        let submitted: SubmittedApplication = self
            .api
            .fetch_with_auth("/apply", identity.credentials(), RequestOptions::post_multipart(body))
            .await?;
        info!(
            career_id,
            application_id = submitted.application_id(),
            "Application submitted"
        );
        Ok(submitted)
    }

    fn build_form(&self, career_id: i64, form: &ApplicationForm) -> Result<Form> {
        let c = &self.contract;
        let mut body = Form::new()
            .text(c.career_id, career_id.to_string())
            .text(c.full_name, form.full_name.clone())
            .text(c.phone_number, form.phone_number.clone())
            .text(c.email, form.email.clone())
            .part(c.cv, file_part(&form.cv)?);
        if let Some(document) = &form.document {
            body = body.part(c.document, file_part(document)?);
        }
        Ok(body)
    }

    /// Returns which of `career_ids` the user has already applied to.
    pub async fn check_existing(&self, identity: &Identity, career_ids: &[i64]) -> Result<Vec<i64>> {
        let request = CheckApplicationsRequest {
            career_ids,
            user_id: &identity.uid,
        };
        let applied: DataEnvelope<Vec<AppliedCareer>> = self
            .api
            .fetch_with_auth(
                "/applications/check",
                identity.credentials(),
                RequestOptions::post_json(&request)?,
            )
            .await?;
        Ok(applied.into_inner().into_iter().map(|a| a.career_id).collect())
    }

    pub async fn list_for_user(&self, identity: &Identity) -> Result<Vec<Application>> {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("user_id", &identity.uid)
            .finish();
        let apps: DataEnvelope<Vec<Application>> = self
            .api
            .fetch_with_auth(
                &format!("/applications?{}", query),
                identity.credentials(),
                RequestOptions::get(),
            )
            .await?;
        Ok(apps.into_inner())
    }
}

fn file_part(file: &UploadFile) -> Result<Part> {
    Ok(Part::bytes(file.bytes.to_vec())
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)?)
}
