pub mod auth;
pub mod config;
pub mod coordinator;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    api_client::ApiClient, application_service::ApplicationService, career_service::CareerService,
};
use reqwest::Client;

/// The remote API, split by endpoint family.
#[derive(Clone)]
pub struct Services {
    pub careers: CareerService,
    pub applications: ApplicationService,
}

impl Services {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;
        Ok(Self::from_api(ApiClient::new(http_client, config.api_base_url.clone())))
    }

    pub fn from_api(api: ApiClient) -> Self {
        Self {
            careers: CareerService::new(api.clone()),
            applications: ApplicationService::new(api),
        }
    }
}
