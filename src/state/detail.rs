//! Detail view-state: one suggestion, its comments and this device's vote.

use crate::api::types::{Comment, Suggestion, VoteType};
use crate::error::{Result, SdkError};
use crate::pagination::{PageKind, PageRequest, PageState, Paginator};
use crate::repository::{CommentRepository, SuggestionRepository};
use crate::usecase::{CommentUseCases, SuggestionUseCases, VoteOutcome};

use super::votes::{VoteMap, VoteTicket};

/// What changed while a detail view was open, handed back to the list on
/// dismissal.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailChanges {
    pub suggestion: Suggestion,
    pub vote: Option<VoteType>,
}

#[derive(Debug, Clone)]
pub struct SuggestionDetailState {
    suggestion: Suggestion,
    comments: Vec<Comment>,
    paginator: Paginator<String>,
    vote: VoteMap,
    dirty: bool,
}

impl SuggestionDetailState {
    /// Open a detail view on a copy of a list entry and its known vote.
    pub fn new(suggestion: Suggestion, current_vote: Option<VoteType>, page_size: u32) -> Self {
        let mut vote = VoteMap::new();
        vote.set(&suggestion.id, current_vote);
        Self {
            suggestion,
            comments: Vec::new(),
            paginator: Paginator::new(page_size),
            vote,
            dirty: false,
        }
    }

    pub fn suggestion(&self) -> &Suggestion {
        &self.suggestion
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn current_vote(&self) -> Option<VoteType> {
        self.vote.get(&self.suggestion.id)
    }

    pub fn page_state(&self) -> PageState {
        self.paginator.state()
    }

    pub fn has_more_comments(&self) -> bool {
        self.paginator.has_more()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ── Comment pages ─────────────────────────────────────────────────

    pub fn begin_load_comments(&mut self) -> PageRequest<String> {
        self.paginator.begin_initial()
    }

    pub fn begin_load_more_comments(&mut self) -> Option<PageRequest<String>> {
        self.paginator.begin_more()
    }

    /// Merge a comment page. Stale pages are dropped and `false` returned.
    pub fn apply_comments_page(&mut self, request: &PageRequest<String>, page: Vec<Comment>) -> bool {
        if !self
            .paginator
            .complete(request, &page, |comment| comment.created_at.clone())
        {
            return false;
        }
        match request.kind {
            PageKind::Initial => self.comments = page,
            PageKind::More => {
                for comment in page {
                    if !self.comments.iter().any(|c| c.id == comment.id) {
                        self.comments.push(comment);
                    }
                }
            }
        }
        true
    }

    pub fn apply_comments_error(&mut self, request: &PageRequest<String>) {
        self.paginator.fail(request);
    }

    // ── Local reconciliation ──────────────────────────────────────────

    /// Append a comment the server accepted and bump the count.
    pub fn apply_comment_created(&mut self, comment: Comment) {
        if comment.suggestion_id != self.suggestion.id {
            log::warn!(
                "Ignoring comment {} for suggestion {}",
                comment.id,
                comment.suggestion_id
            );
            return;
        }
        self.comments.push(comment);
        self.suggestion.comment_count += 1;
        self.dirty = true;
    }

    /// Remove a comment by id. The count never drops below zero.
    pub fn apply_comment_deleted(&mut self, comment_id: &str) -> bool {
        let before = self.comments.len();
        self.comments.retain(|c| c.id != comment_id);
        if self.comments.len() == before {
            return false;
        }
        self.suggestion.comment_count = (self.suggestion.comment_count - 1).max(0);
        self.dirty = true;
        true
    }

    pub fn issue_vote_ticket(&mut self) -> VoteTicket {
        self.vote.issue(&self.suggestion.id)
    }

    /// Merge a vote result. Server snapshots replace local counts.
    pub fn apply_vote_outcome(&mut self, ticket: &VoteTicket, outcome: &VoteOutcome) -> bool {
        if outcome.suggestion_id != self.suggestion.id || !self.vote.apply(ticket, outcome.applied) {
            return false;
        }
        let response = &outcome.response;
        if let Some(snapshot) = &response.suggestion {
            self.suggestion = snapshot.clone();
        } else if let Some(count) = response.vote_count {
            self.suggestion.vote_count = count;
        }
        self.dirty = true;
        true
    }

    /// Close the view. Returns the changes the list must reconcile, if any.
    pub fn dismiss(self) -> Option<DetailChanges> {
        if !self.dirty {
            return None;
        }
        let vote = self.current_vote();
        Some(DetailChanges {
            suggestion: self.suggestion,
            vote,
        })
    }

    // ── Drivers ───────────────────────────────────────────────────────

    /// Load the first comment page. `Ok(false)` means the page arrived
    /// after a newer load and was discarded.
    pub async fn load_comments<R: CommentRepository>(
        &mut self,
        comments: &CommentUseCases<R>,
    ) -> Result<bool> {
        let request = self.begin_load_comments();
        self.run_comments_page(comments, request).await
    }

    /// Load the next comment page, if one exists and none is in flight.
    pub async fn load_more_comments<R: CommentRepository>(
        &mut self,
        comments: &CommentUseCases<R>,
    ) -> Result<bool> {
        let Some(request) = self.begin_load_more_comments() else {
            return Ok(false);
        };
        self.run_comments_page(comments, request).await
    }

    pub async fn post_comment<R: CommentRepository>(
        &mut self,
        comments: &CommentUseCases<R>,
        text: &str,
        nickname: Option<&str>,
    ) -> Result<Comment> {
        let comment = comments
            .create_comment(&self.suggestion.id, text, nickname)
            .await?;
        self.apply_comment_created(comment.clone());
        Ok(comment)
    }

    pub async fn delete_comment<R: CommentRepository>(
        &mut self,
        comments: &CommentUseCases<R>,
        comment_id: &str,
    ) -> Result<()> {
        comments.delete_comment(comment_id).await?;
        self.apply_comment_deleted(comment_id.trim());
        Ok(())
    }

    pub async fn toggle_vote<R: SuggestionRepository>(
        &mut self,
        suggestions: &SuggestionUseCases<R>,
        desired: VoteType,
    ) -> Result<VoteOutcome> {
        if !self.suggestion.can_be_voted() {
            return Err(SdkError::invalid_input(format!(
                "suggestion is {} and cannot be voted on",
                self.suggestion.status.as_str()
            )));
        }
        let current = self.current_vote();
        let ticket = self.issue_vote_ticket();
        let outcome = suggestions
            .toggle_vote(&self.suggestion.id, desired, current)
            .await?;
        self.apply_vote_outcome(&ticket, &outcome);
        Ok(outcome)
    }

    async fn run_comments_page<R: CommentRepository>(
        &mut self,
        comments: &CommentUseCases<R>,
        request: PageRequest<String>,
    ) -> Result<bool> {
        let result = comments
            .fetch_comments(
                &self.suggestion.id,
                request.cursor.as_deref(),
                Some(request.limit),
            )
            .await;
        match result {
            Ok(page) => Ok(self.apply_comments_page(&request, page.comments)),
            Err(e) => {
                self.apply_comments_error(&request);
                Err(e)
            }
        }
    }
}
