use serde::{Deserialize, Serialize};

use crate::models::career::CareerPost;

/// Body of `GET /careers`, either paginated or a bare list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CareerListResponse {
    Paged {
        #[serde(alias = "data")]
        items: Vec<CareerPost>,
        #[serde(default, alias = "totalCount")]
        total: Option<i64>,
        #[serde(default, alias = "totalPages")]
        total_pages: Option<i64>,
    },
    Bare(Vec<CareerPost>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CareerPage {
    pub items: Vec<CareerPost>,
    pub total_count: u32,
    pub total_pages: u32,
}

impl CareerListResponse {
    pub fn into_page(self, limit: u32) -> CareerPage {
        let limit = i64::from(limit.max(1));
        let (items, total, total_pages) = match self {
            CareerListResponse::Paged {
                items,
                total,
                total_pages,
            } => (items, total, total_pages),
            CareerListResponse::Bare(items) => (items, None, None),
        };

        let count = total.unwrap_or(items.len() as i64).max(0);
        let pages = total_pages
            .unwrap_or_else(|| count / limit + i64::from(count % limit != 0))
            .max(1);

        CareerPage {
            items,
            total_count: u32::try_from(count).unwrap_or(u32::MAX),
            total_pages: u32::try_from(pages).unwrap_or(u32::MAX),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CareerListQuery {
    pub page: u32,
    pub limit: u32,
}

impl CareerListQuery {
    pub fn to_endpoint(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("page", &self.page.to_string())
            .append_pair("limit", &self.limit.to_string())
            .finish();
        format!("/careers?{}", query)
    }
}
