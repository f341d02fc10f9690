use crate::dto::career_dto::{CareerListQuery, CareerListResponse, CareerPage};
use crate::error::Result;
use crate::models::career::CareerCategory;

use super::api_client::{ApiClient, RequestOptions};

/// Public career listing endpoints.
#[derive(Clone)]
pub struct CareerService {
    api: ApiClient,
}

impl CareerService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list_posts(&self, page: u32, limit: u32) -> Result<CareerPage> {
        let endpoint = CareerListQuery { page, limit }.to_endpoint();
        let response: CareerListResponse = self
            .api
            .fetch_public(&endpoint, RequestOptions::get())
            .await?;
        let page = response.into_page(limit);
        tracing::debug!(
            items = page.items.len(),
            total_pages = page.total_pages,
            "Loaded career posts"
        );
        Ok(page)
    }

    pub async fn list_categories(&self) -> Result<Vec<CareerCategory>> {
        self.api
            .fetch_public("/careers/categories", RequestOptions::get())
            .await
    }
}
