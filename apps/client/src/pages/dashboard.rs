//! Dashboard: job search plus the client-side filter/sort pipeline.
//!
//! A search is the only network round trip; filtering and sorting re-derive the
//! view from the last result without contacting the server. Each search carries
//! a generation tag and a reply whose tag is no longer current is dropped.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::api::types::{ApiStats, JobSource, SearchReply, SearchRequest};
use crate::errors::{RequestError, ValidationError};
use crate::listing::render::{results_summary, CardRenderer};
use crate::listing::{FilterState, JobCard, SortKey, WorkingSet};
use crate::models::{JobListing, UserSession};
use crate::notice::Notice;
use crate::pages::{require_session, ActionResult, Outcome};
use crate::state::ClientState;

pub const NO_RESULTS_MESSAGE: &str = "No jobs found. Try different keywords or location.";

/// Proof that a search was started; hand it back to `finish_search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
}

#[derive(Debug, Default)]
struct SearchGuard {
    generation: u64,
    in_flight: Option<u64>,
}

pub struct Dashboard {
    state: ClientState,
    user: UserSession,
    working_set: WorkingSet,
    recommended: Vec<JobListing>,
    stats: Option<ApiStats>,
    guard: SearchGuard,
}

impl Dashboard {
    /// Page entry: session check, usage counter, then recommendations.
    /// `None` means the user is not signed in.
    pub async fn open(state: ClientState) -> Option<Self> {
        let user = require_session(state.api.as_ref()).await?;
        let mut dashboard = Self::with_user(state, user);
        dashboard.refresh_stats().await;
        dashboard.load_recommendations().await;
        Some(dashboard)
    }

    pub fn with_user(state: ClientState, user: UserSession) -> Self {
        Self {
            state,
            user,
            working_set: WorkingSet::new(),
            recommended: Vec::new(),
            stats: None,
            guard: SearchGuard::default(),
        }
    }

    pub fn user(&self) -> &UserSession {
        &self.user
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    pub fn recommended(&self) -> &[JobListing] {
        &self.recommended
    }

    pub fn stats(&self) -> Option<ApiStats> {
        self.stats
    }

    pub fn is_loading(&self) -> bool {
        self.guard.in_flight.is_some()
    }

    /// Filter and sort controls only make sense once there is something to filter.
    pub fn controls_visible(&self) -> bool {
        !self.working_set.is_empty()
    }

    pub async fn refresh_stats(&mut self) {
        match self.state.api.stats().await {
            Ok(stats) => self.stats = Some(stats),
            Err(e) => warn!("Could not fetch API usage: {e}"),
        }
    }

    /// Recommendations are best-effort: disabled notifications, a failed
    /// request, or an empty list all leave the section hidden without a notice.
    pub async fn load_recommendations(&mut self) {
        if !self.user.notifications_enabled {
            debug!("Notifications disabled, skipping recommendations");
            return;
        }
        match self.state.api.recommended_jobs().await {
            Ok(jobs) if jobs.is_empty() => debug!("No recommended jobs"),
            Ok(jobs) => {
                info!("Loaded {} recommended jobs", jobs.len());
                self.recommended = jobs;
            }
            Err(e) => warn!("Could not load recommended jobs: {e}"),
        }
    }

    /// Validates the form and marks a search as in flight. No request is made here.
    pub fn begin_search(
        &mut self,
        query: &str,
        location: &str,
        source: JobSource,
    ) -> Result<(SearchTicket, SearchRequest), ValidationError> {
        if self.guard.in_flight.is_some() {
            return Err(ValidationError::SearchInFlight);
        }
        let query = query.trim();
        if query.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }

        self.guard.generation += 1;
        self.guard.in_flight = Some(self.guard.generation);

        let request = SearchRequest {
            query: query.to_string(),
            location: location.trim().to_string(),
            source,
        };
        Ok((
            SearchTicket {
                generation: self.guard.generation,
            },
            request,
        ))
    }

    /// Gives up on the in-flight search. Its reply, if one ever arrives, is stale.
    pub fn abandon_search(&mut self) {
        if let Some(generation) = self.guard.in_flight.take() {
            info!("Abandoned search #{generation}");
        }
    }

    /// Applies a search reply. Stale replies are dropped silently; failures
    /// leave the working set exactly as it was.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<SearchReply, RequestError>,
    ) -> ActionResult {
        if self.guard.in_flight != Some(ticket.generation) {
            debug!("Discarding stale reply for search #{}", ticket.generation);
            return Ok(Outcome::none());
        }
        self.guard.in_flight = None;

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Search #{} failed: {e}", ticket.generation);
                return Err(e.into());
            }
        };

        info!(
            "Search #{} returned {} jobs (server total: {:?})",
            ticket.generation,
            reply.jobs.len(),
            reply.total_results
        );
        let empty = reply.jobs.is_empty();
        self.working_set.replace(reply.jobs);

        let notice = match reply.message {
            Some(message) if !message.trim().is_empty() => Some(Notice::info(message)),
            _ if empty => Some(Notice::info(NO_RESULTS_MESSAGE)),
            _ => None,
        };
        Ok(Outcome {
            notice,
            navigate: None,
        })
    }

    pub async fn search(&mut self, query: &str, location: &str, source: JobSource) -> ActionResult {
        let (ticket, request) = self.begin_search(query, location, source)?;
        let result = self.state.api.search(&request).await;
        let outcome = self.finish_search(ticket, result);
        self.refresh_stats().await;
        outcome
    }

    pub fn apply_filter(&mut self, filter: FilterState) {
        self.working_set.apply_filter(filter);
    }

    pub fn apply_sort(&mut self, key: SortKey) {
        self.working_set.apply_sort(key);
    }

    pub fn results_summary(&self) -> String {
        results_summary(
            self.working_set.filtered().len(),
            self.working_set.all().len(),
        )
    }

    /// HTML-escaped cards of the filtered view, for export.
    pub fn cards(&self, now: DateTime<Utc>) -> Vec<JobCard> {
        CardRenderer::html(now, &self.state.config.date_format).cards(self.working_set.filtered())
    }

    pub fn screen_cards(&self, now: DateTime<Utc>) -> Vec<JobCard> {
        CardRenderer::terminal(now, &self.state.config.date_format)
            .cards(self.working_set.filtered())
    }

    pub fn recommended_cards(&self, now: DateTime<Utc>) -> Vec<JobCard> {
        CardRenderer::terminal(now, &self.state.config.date_format).cards(&self.recommended)
    }
}
