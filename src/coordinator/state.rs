use std::collections::HashSet;

use crate::models::application::Application;
use crate::models::career::{CareerCategory, CareerPost};

use super::apply::ApplyPhase;
use super::filter::filter_postings;
use super::lookup::ApplicationLookup;
use super::pagination::Pagination;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SliceStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

impl SliceStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SliceStatus::Loading)
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, SliceStatus::Errored(_))
    }
}

/// Everything the careers page renders from. Each slice is written only by
/// its own load path.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub postings: Vec<CareerPost>,
    pub postings_status: SliceStatus,
    pub categories: Vec<CareerCategory>,
    pub categories_status: SliceStatus,
    pub history: Vec<Application>,
    pub history_status: SliceStatus,
    pub reconcile_status: SliceStatus,
    pub lookup: ApplicationLookup,
    pub pagination: Pagination,
    pub search_term: String,
    pub selected_category: Option<i64>,
    pub filtered: Vec<CareerPost>,
    pub apply: ApplyPhase,
    pub details: Option<CareerPost>,
    pub(crate) confirmed_applied: HashSet<i64>,
}

impl PageState {
    pub(crate) fn refilter(&mut self) {
        self.filtered = filter_postings(&self.postings, &self.search_term, self.selected_category);
    }

    pub(crate) fn rederive_lookup(&mut self) {
        self.lookup = ApplicationLookup::derive(&self.history, &self.confirmed_applied);
    }

    pub(crate) fn forget_user(&mut self) {
        self.history.clear();
        self.confirmed_applied.clear();
        self.history_status = SliceStatus::Idle;
        self.reconcile_status = SliceStatus::Idle;
        self.rederive_lookup();
    }

    pub fn is_loading(&self) -> bool {
        self.postings_status.is_loading() || self.categories_status.is_loading()
    }

    pub fn find_posting(&self, career_id: i64) -> Option<&CareerPost> {
        self.postings.iter().find(|p| p.id == career_id)
    }
}
