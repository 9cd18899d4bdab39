//! List view-state: paged suggestions plus this device's vote on each.

use futures::future::join_all;

use crate::api::types::{
    ActionResponse, Suggestion, SuggestionCursor, SuggestionStatus, VoteStatus, VoteType,
};
use crate::error::{Result, SdkError};
use crate::pagination::{PageKind, PageRequest, PageState, Paginator};
use crate::repository::SuggestionRepository;
use crate::usecase::{SuggestionUseCases, VoteOutcome};

use super::detail::DetailChanges;
use super::votes::{VoteMap, VoteTicket};

#[derive(Debug, Clone)]
pub struct SuggestionListState {
    items: Vec<Suggestion>,
    votes: VoteMap,
    paginator: Paginator<SuggestionCursor>,
    filter: Option<SuggestionStatus>,
}

impl SuggestionListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            votes: VoteMap::new(),
            paginator: Paginator::new(page_size),
            filter: None,
        }
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn votes(&self) -> &VoteMap {
        &self.votes
    }

    pub fn get(&self, suggestion_id: &str) -> Option<&Suggestion> {
        self.items.iter().find(|s| s.id == suggestion_id)
    }

    pub fn page_state(&self) -> PageState {
        self.paginator.state()
    }

    pub fn has_more(&self) -> bool {
        self.paginator.has_more()
    }

    pub fn cursor(&self) -> Option<&SuggestionCursor> {
        self.paginator.cursor()
    }

    pub fn filter(&self) -> Option<SuggestionStatus> {
        self.filter
    }

    /// Switch the status filter. Clears the list and restarts pagination.
    pub fn set_filter(&mut self, filter: Option<SuggestionStatus>) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.items.clear();
        self.paginator.reset();
    }

    // ── Pages ─────────────────────────────────────────────────────────

    pub fn begin_refresh(&mut self) -> PageRequest<SuggestionCursor> {
        self.paginator.begin_initial()
    }

    pub fn begin_load_more(&mut self) -> Option<PageRequest<SuggestionCursor>> {
        self.paginator.begin_more()
    }

    /// Merge a page. An initial page replaces the list; a later page is
    /// appended, replacing entries already held under the same id.
    pub fn apply_page(
        &mut self,
        request: &PageRequest<SuggestionCursor>,
        page: Vec<Suggestion>,
    ) -> bool {
        if !self.paginator.complete(request, &page, SuggestionCursor::after) {
            log::debug!("Discarding stale suggestion page");
            return false;
        }
        match request.kind {
            PageKind::Initial => self.items = page,
            PageKind::More => {
                for suggestion in page {
                    self.upsert(suggestion);
                }
            }
        }
        true
    }

    pub fn apply_page_error(&mut self, request: &PageRequest<SuggestionCursor>) {
        self.paginator.fail(request);
    }

    // ── Reconciliation ────────────────────────────────────────────────

    pub fn issue_vote_ticket(&mut self, suggestion_id: &str) -> VoteTicket {
        self.votes.issue(suggestion_id)
    }

    /// Merge a fetched vote status, including its authoritative count.
    pub fn apply_vote_status(&mut self, ticket: &VoteTicket, status: &VoteStatus) -> bool {
        if !self.votes.apply_status(ticket, status) {
            return false;
        }
        if let Some(item) = self.find_mut(ticket.suggestion_id()) {
            item.vote_count = status.vote_count;
        }
        true
    }

    /// Merge a vote or unvote result. A server snapshot replaces the stored
    /// entry outright.
    pub fn apply_vote_outcome(&mut self, ticket: &VoteTicket, outcome: &VoteOutcome) -> bool {
        if !self.votes.apply(ticket, outcome.applied) {
            return false;
        }
        let response = &outcome.response;
        if let Some(snapshot) = &response.suggestion {
            self.replace(snapshot.clone());
        } else if let Some(count) = response.vote_count {
            if let Some(item) = self.find_mut(&outcome.suggestion_id) {
                item.vote_count = count;
            }
        }
        true
    }

    /// Replace the stored entry with the same id. Unknown ids are ignored.
    pub fn replace(&mut self, suggestion: Suggestion) -> bool {
        match self.find_mut(&suggestion.id) {
            Some(item) => {
                *item = suggestion;
                true
            }
            None => false,
        }
    }

    pub fn remove_suggestion(&mut self, suggestion_id: &str) -> Option<Suggestion> {
        let index = self.items.iter().position(|s| s.id == suggestion_id)?;
        self.votes.set(suggestion_id, None);
        Some(self.items.remove(index))
    }

    /// Fold a dismissed detail view back into the list.
    pub fn reconcile_detail(&mut self, changes: DetailChanges) {
        let id = changes.suggestion.id.clone();
        self.replace(changes.suggestion);
        self.votes.set(&id, changes.vote);
    }

    // ── Drivers ───────────────────────────────────────────────────────

    /// Load the first page, then the vote status of every item on it.
    /// `Ok(false)` means a newer load superseded this one.
    pub async fn refresh<R: SuggestionRepository>(
        &mut self,
        suggestions: &SuggestionUseCases<R>,
    ) -> Result<bool> {
        let request = self.begin_refresh();
        self.run_page(suggestions, request).await
    }

    /// Load the next page. `Ok(false)` when exhausted or already loading.
    pub async fn load_more<R: SuggestionRepository>(
        &mut self,
        suggestions: &SuggestionUseCases<R>,
    ) -> Result<bool> {
        let Some(request) = self.begin_load_more() else {
            return Ok(false);
        };
        self.run_page(suggestions, request).await
    }

    /// Fetch vote status for every id concurrently and merge each result
    /// as it is matched back to its ticket. Failed lookups leave the entry
    /// untouched. Returns how many results were applied.
    pub async fn load_vote_statuses<R: SuggestionRepository>(
        &mut self,
        suggestions: &SuggestionUseCases<R>,
        ids: &[String],
    ) -> usize {
        let tickets: Vec<VoteTicket> = ids.iter().map(|id| self.votes.issue(id)).collect();
        let results = join_all(
            tickets
                .iter()
                .map(|ticket| suggestions.vote_status(ticket.suggestion_id())),
        )
        .await;

        let mut applied = 0;
        for (ticket, result) in tickets.iter().zip(results) {
            match result {
                Ok(status) => {
                    if self.apply_vote_status(ticket, &status) {
                        applied += 1;
                    }
                }
                Err(e) => log::warn!(
                    "Vote status for {} failed: {}",
                    ticket.suggestion_id(),
                    e
                ),
            }
        }
        applied
    }

    /// Vote if no vote is held on `suggestion_id`, otherwise withdraw it.
    pub async fn toggle_vote<R: SuggestionRepository>(
        &mut self,
        suggestions: &SuggestionUseCases<R>,
        suggestion_id: &str,
        desired: VoteType,
    ) -> Result<VoteOutcome> {
        let suggestion_id = suggestion_id.trim();
        if let Some(item) = self.get(suggestion_id) {
            if !item.can_be_voted() {
                return Err(SdkError::invalid_input(format!(
                    "suggestion is {} and cannot be voted on",
                    item.status.as_str()
                )));
            }
        }
        let current = self.votes.get(suggestion_id);
        let ticket = self.votes.issue(suggestion_id);
        let outcome = suggestions
            .toggle_vote(suggestion_id, desired, current)
            .await?;
        self.apply_vote_outcome(&ticket, &outcome);
        Ok(outcome)
    }

    /// Delete a suggestion and drop it locally. Errors come from the delete
    /// call only; callers reload with [`Self::refresh`] afterwards.
    pub async fn delete_suggestion<R: SuggestionRepository>(
        &mut self,
        suggestions: &SuggestionUseCases<R>,
        suggestion_id: &str,
    ) -> Result<ActionResponse> {
        let response = suggestions.delete_suggestion(suggestion_id).await?;
        self.remove_suggestion(suggestion_id.trim());
        Ok(response)
    }

    async fn run_page<R: SuggestionRepository>(
        &mut self,
        suggestions: &SuggestionUseCases<R>,
        request: PageRequest<SuggestionCursor>,
    ) -> Result<bool> {
        let result = suggestions
            .fetch_suggestions(self.filter, request.cursor.clone(), Some(request.limit))
            .await;
        let page = match result {
            Ok(page) => page.suggestions,
            Err(e) => {
                self.apply_page_error(&request);
                return Err(e);
            }
        };

        let ids: Vec<String> = page.iter().map(|s| s.id.clone()).collect();
        if !self.apply_page(&request, page) {
            return Ok(false);
        }
        self.load_vote_statuses(suggestions, &ids).await;
        Ok(true)
    }

    fn find_mut(&mut self, suggestion_id: &str) -> Option<&mut Suggestion> {
        self.items.iter_mut().find(|s| s.id == suggestion_id)
    }

    fn upsert(&mut self, suggestion: Suggestion) {
        if let Some(item) = self.find_mut(&suggestion.id) {
            *item = suggestion;
        } else {
            self.items.push(suggestion);
        }
    }
}
