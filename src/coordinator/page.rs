use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::auth::identity::Identity;
use crate::auth::session::{Session, SignInPrompt};
use crate::dto::application_dto::{ApplicationForm, SubmittedApplication};
use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::models::career::{CareerCategory, CareerPost};
use crate::utils::validation::first_message;
use crate::Services;

use super::apply::{ApplyGate, ApplyPhase};
use super::notify::{Notice, Notifier};
use super::pagination::Pagination;
use super::sequence::{SliceSequences, Ticket};
use super::state::{PageState, SliceStatus};

pub const LOAD_JOBS_FAILED: &str = "Failed to load jobs";
pub const LOAD_CATEGORIES_FAILED: &str = "Failed to load job categories";
pub const ALREADY_APPLIED: &str = "You've already applied for this position";
pub const SUBMITTED: &str = "Application submitted successfully";

struct Inner {
    services: Services,
    state: Mutex<PageState>,
    seq: SliceSequences,
    identity: watch::Receiver<Option<Identity>>,
    notifier: Arc<dyn Notifier>,
    sign_in: Arc<dyn SignInPrompt>,
}

/// Page-level coordinator for the careers view.
///
/// Cheap to clone; clones share state. Slices load independently and a
/// failure in one never touches another. Each slice discards responses that
/// were superseded by a newer request for the same slice.
#[derive(Clone)]
pub struct CareersPage {
    inner: Arc<Inner>,
}

impl CareersPage {
    pub fn new(
        services: Services,
        session: &Session,
        notifier: Arc<dyn Notifier>,
        sign_in: Arc<dyn SignInPrompt>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                services,
                state: Mutex::new(PageState::default()),
                seq: SliceSequences::default(),
                identity: session.subscribe(),
                notifier,
                sign_in,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, notice: Notice) {
        self.inner.notifier.notify(notice);
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.inner.identity.borrow().clone()
    }

    pub fn snapshot(&self) -> PageState {
        self.state().clone()
    }

    pub fn filtered(&self) -> Vec<CareerPost> {
        self.state().filtered.clone()
    }

    pub fn categories(&self) -> Vec<CareerCategory> {
        self.state().categories.clone()
    }

    pub fn history(&self) -> Vec<Application> {
        self.state().history.clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.state().pagination
    }

    pub fn apply_phase(&self) -> ApplyPhase {
        self.state().apply.clone()
    }

    pub fn is_applied(&self, career_id: i64) -> bool {
        self.state().lookup.is_applied(career_id)
    }

    /// Initial load: postings, categories and, if signed in, the user's
    /// history, all in parallel.
    pub async fn mount(&self) {
        tokio::join!(
            self.refresh_postings(),
            self.load_categories(),
            self.load_user_history()
        );
    }

    /// Loads the current page and, when it changed, re-checks which visible
    /// careers the user has applied to.
    pub async fn refresh_postings(&self) {
        if self.load_postings().await {
            self.reconcile_applied().await;
        }
    }

    /// Returns true when a fresh posting list was applied.
    pub async fn load_postings(&self) -> bool {
        let ticket = self.inner.seq.postings.issue();
        let (page, limit) = {
            let mut state = self.state();
            state.postings_status = SliceStatus::Loading;
            (state.pagination.page, state.pagination.limit)
        };

        let result = self.inner.services.careers.list_posts(page, limit).await;

        let failure = {
            let mut state = self.state();
            if !self.inner.seq.postings.is_latest(ticket) {
                debug!(page, "Discarding stale career posts response");
                return false;
            }
            match result {
                Ok(loaded) => {
                    state.postings = loaded.items;
                    state
                        .pagination
                        .apply_totals(loaded.total_pages, loaded.total_count);
                    state.postings_status = SliceStatus::Loaded;
                    state.refilter();
                    None
                }
                Err(err) => {
                    state.postings_status = SliceStatus::Errored(err.user_message());
                    Some(err)
                }
            }
        };

        match failure {
            None => true,
            Some(err) => {
                error!(error = %err, page, limit, "Failed to load career posts");
                self.notify(Notice::error(LOAD_JOBS_FAILED));
                false
            }
        }
    }

    pub async fn load_categories(&self) -> bool {
        let ticket = self.inner.seq.categories.issue();
        self.state().categories_status = SliceStatus::Loading;

        let result = self.inner.services.careers.list_categories().await;

        let failure = {
            let mut state = self.state();
            if !self.inner.seq.categories.is_latest(ticket) {
                debug!("Discarding stale categories response");
                return false;
            }
            match result {
                Ok(categories) => {
                    state.categories = categories;
                    state.categories_status = SliceStatus::Loaded;
                    None
                }
                Err(err) => {
                    state.categories_status = SliceStatus::Errored(err.user_message());
                    Some(err)
                }
            }
        };

        match failure {
            None => true,
            Some(err) => {
                error!(error = %err, "Failed to load career categories");
                self.notify(Notice::error(LOAD_CATEGORIES_FAILED));
                false
            }
        }
    }

    /// Loads the signed-in user's applications and rebuilds the lookup.
    pub async fn load_user_history(&self) -> bool {
        let Some(identity) = self.current_identity() else {
            return false;
        };
        let ticket = self.inner.seq.history.issue();
        self.state().history_status = SliceStatus::Loading;

        let result = self
            .inner
            .services
            .applications
            .list_for_user(&identity)
            .await;

        let mut state = self.state();
        if !self.inner.seq.history.is_latest(ticket) {
            debug!(uid = %identity.uid, "Discarding stale application history");
            return false;
        }
        match result {
            Ok(apps) => {
                debug!(uid = %identity.uid, count = apps.len(), "Loaded application history");
                state.history = apps;
                state.history_status = SliceStatus::Loaded;
                state.rederive_lookup();
                true
            }
            Err(err) => {
                warn!(uid = %identity.uid, error = %err, "Failed to load user applications");
                state.history_status = SliceStatus::Errored(err.user_message());
                false
            }
        }
    }

    /// Asks the server which visible careers already have an application
    /// from this user. Results only ever add "applied" flags.
    pub async fn reconcile_applied(&self) -> bool {
        let Some(identity) = self.current_identity() else {
            return false;
        };
        let career_ids: Vec<i64> = self.state().postings.iter().map(|p| p.id).collect();
        if career_ids.is_empty() {
            return false;
        }
        let ticket = self.inner.seq.reconcile.issue();
        self.state().reconcile_status = SliceStatus::Loading;

        let result = self
            .inner
            .services
            .applications
            .check_existing(&identity, &career_ids)
            .await;

        let mut state = self.state();
        if !self.inner.seq.reconcile.is_latest(ticket) {
            debug!("Discarding stale applied-state check");
            return false;
        }
        match result {
            Ok(applied) => {
                state.confirmed_applied.extend(applied);
                state.reconcile_status = SliceStatus::Loaded;
                state.rederive_lookup();
                true
            }
            Err(err) => {
                warn!(error = %err, "Failed to check existing applications");
                state.reconcile_status = SliceStatus::Errored(err.user_message());
                false
            }
        }
    }

    pub async fn on_identity_changed(&self, identity: Option<Identity>) {
        {
            let mut state = self.state();
            // in-flight user loads and submissions belong to the previous identity
            self.inner.seq.identity.issue();
            self.inner.seq.history.issue();
            self.inner.seq.reconcile.issue();
            state.forget_user();
            state.apply = ApplyPhase::Idle;
        }

        if let Some(identity) = identity {
            debug!(uid = %identity.uid, "Identity available, loading user state");
            tokio::join!(self.load_user_history(), self.reconcile_applied());
        }
    }

    /// Follows the session and reloads user slices whenever it changes.
    pub fn spawn_identity_watch(&self) -> JoinHandle<()> {
        let page = self.clone();
        let mut rx = self.inner.identity.clone();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let identity: Option<Identity> = rx.borrow_and_update().clone();
                page.on_identity_changed(identity).await;
            }
        })
    }

    /// Returns true when the page changed and a reload ran.
    pub async fn set_page(&self, page: u32) -> bool {
        let changed = self.state().pagination.go_to(page);
        if changed {
            self.refresh_postings().await;
        }
        changed
    }

    pub async fn set_page_size(&self, limit: u32) -> bool {
        let changed = self.state().pagination.set_limit(limit);
        if changed {
            self.refresh_postings().await;
        }
        changed
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        let mut state = self.state();
        state.search_term = term.into();
        state.refilter();
    }

    pub fn select_category(&self, category: Option<i64>) {
        let mut state = self.state();
        state.selected_category = category;
        state.refilter();
    }

    pub fn open_details(&self, career: &CareerPost) {
        self.state().details = Some(career.clone());
    }

    pub fn close_details(&self) {
        self.state().details = None;
    }

    /// Entry point for the "Apply" button.
    pub fn request_apply(&self, career: &CareerPost) -> ApplyGate {
        if self.current_identity().is_none() {
            info!(career_id = career.id, "Apply requested without a user, prompting sign-in");
            self.inner.sign_in.request_sign_in();
            return ApplyGate::SignInRequested;
        }

        let already_applied = {
            let mut state = self.state();
            let applied = state.lookup.is_applied(career.id);
            if !applied {
                state.apply = ApplyPhase::DialogOpen {
                    career: career.clone(),
                    error: None,
                };
            }
            applied
        };

        if already_applied {
            self.notify(Notice::error(ALREADY_APPLIED));
            ApplyGate::AlreadyApplied
        } else {
            ApplyGate::DialogOpened
        }
    }

    pub fn close_apply_dialog(&self) {
        let mut state = self.state();
        if let ApplyPhase::DialogOpen { .. } = state.apply {
            state.apply = ApplyPhase::Idle;
        }
    }

    /// Validates and submits the open application. On success the career is
    /// marked applied at once, without waiting for a history reload.
    pub async fn submit_application(&self, form: ApplicationForm) -> Result<SubmittedApplication> {
        let (identity, career, generation) = match self.begin_submission(&form) {
            Ok(ready) => ready,
            Err(err) => {
                self.notify(Notice::error(err.user_message()));
                return Err(err);
            }
        };

        let result = self
            .inner
            .services
            .applications
            .submit(&identity, career.id, &form)
            .await;

        let applied = {
            let mut state = self.state();
            let same_user = self.inner.seq.identity.is_latest(generation)
                && self
                    .current_identity()
                    .is_some_and(|current| current.uid == identity.uid);
            if same_user {
                match &result {
                    Ok(_) => {
                        state.confirmed_applied.insert(career.id);
                        state.rederive_lookup();
                        state.apply = ApplyPhase::Idle;
                    }
                    Err(err) => {
                        state.apply = ApplyPhase::DialogOpen {
                            career: career.clone(),
                            error: Some(err.user_message()),
                        };
                    }
                }
            }
            same_user
        };

        if !applied {
            warn!(
                uid = %identity.uid,
                career_id = career.id,
                succeeded = result.is_ok(),
                "Identity changed during submission, result not applied to page state"
            );
            return result;
        }

        match &result {
            Ok(_) => self.notify(Notice::success(SUBMITTED)),
            Err(err) => {
                error!(career_id = career.id, error = %err, "Application submission failed");
                self.notify(Notice::error(format!(
                    "Failed to submit application: {}",
                    err.user_message()
                )));
            }
        }
        result
    }

    fn begin_submission(&self, form: &ApplicationForm) -> Result<(Identity, CareerPost, Ticket)> {
        let identity = self.current_identity().ok_or(Error::Unauthenticated)?;
        let mut state = self.state();
        let generation = self.inner.seq.identity.current();
        let career = match &state.apply {
            ApplyPhase::DialogOpen { career, .. } => career.clone(),
            _ => return Err(Error::NoActiveApplication),
        };

        if state.lookup.is_applied(career.id) {
            state.apply = ApplyPhase::Idle;
            return Err(Error::AlreadyApplied(career.id));
        }

        if let Err(errors) = form.check() {
            state.apply = ApplyPhase::DialogOpen {
                career,
                error: Some(first_message(&errors)),
            };
            return Err(Error::Validation(errors));
        }

        state.apply = ApplyPhase::Submitting {
            career: career.clone(),
        };
        Ok((identity, career, generation))
    }
}
