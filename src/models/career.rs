use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time::deserialize_optional_timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerCategory {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPost {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub location: String,
    #[serde(
        default,
        alias = "createdAt",
        alias = "posted_at",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: Option<CareerCategory>,
    #[serde(default, alias = "categoryId")]
    pub category_id: Option<i64>,
}

impl CareerPost {
    pub fn category_id(&self) -> Option<i64> {
        self.category_id
            .or_else(|| self.category.as_ref().map(|c| c.id))
    }

    pub(crate) fn search_haystack(&self) -> String {
        format!("{} {} {}", self.title, self.location, self.content).to_lowercase()
    }
}
