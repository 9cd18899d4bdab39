//! Per-suggestion vote bookkeeping with issue-order tickets.
//!
//! Each asynchronous vote operation (status fetch, vote, unvote) takes a
//! ticket before it starts. When its result arrives, it is applied only if
//! no result from a later-issued ticket for the same suggestion has been
//! applied already. Out-of-order completions therefore cannot roll the map
//! back to an older answer.

use std::collections::HashMap;

use crate::api::types::{VoteStatus, VoteType};

/// Issue-order token for one pending vote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTicket {
    suggestion_id: String,
    sequence: u64,
}

impl VoteTicket {
    pub fn suggestion_id(&self) -> &str {
        &self.suggestion_id
    }
}

#[derive(Debug, Default, Clone)]
pub struct VoteMap {
    votes: HashMap<String, VoteType>,
    applied: HashMap<String, u64>,
    issued: u64,
}

impl VoteMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, suggestion_id: &str) -> Option<VoteType> {
        self.votes.get(suggestion_id).copied()
    }

    pub fn has_voted(&self, suggestion_id: &str) -> bool {
        self.votes.contains_key(suggestion_id)
    }

    /// Ids this device currently holds a vote on, sorted.
    pub fn voted_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.votes.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn issue(&mut self, suggestion_id: &str) -> VoteTicket {
        self.issued += 1;
        VoteTicket {
            suggestion_id: suggestion_id.to_string(),
            sequence: self.issued,
        }
    }

    /// Apply the result of `ticket`. Returns `false` if a later-issued
    /// result for the same suggestion has already been applied.
    pub fn apply(&mut self, ticket: &VoteTicket, vote: Option<VoteType>) -> bool {
        let id = &ticket.suggestion_id;
        if let Some(&latest) = self.applied.get(id) {
            if latest >= ticket.sequence {
                log::debug!("Dropping stale vote result for {}", id);
                return false;
            }
        }
        self.applied.insert(id.clone(), ticket.sequence);
        match vote {
            Some(vote_type) => {
                self.votes.insert(id.clone(), vote_type);
            }
            None => {
                self.votes.remove(id);
            }
        }
        true
    }

    /// Apply a fetched vote status. The status endpoint does not report a
    /// direction, so a held vote is recorded as an upvote.
    pub fn apply_status(&mut self, ticket: &VoteTicket, status: &VoteStatus) -> bool {
        let vote = status.has_voted.then_some(VoteType::Upvote);
        self.apply(ticket, vote)
    }

    /// Overwrite the entry for `suggestion_id`, superseding anything in
    /// flight for it.
    pub fn set(&mut self, suggestion_id: &str, vote: Option<VoteType>) {
        let ticket = self.issue(suggestion_id);
        self.apply(&ticket, vote);
    }
}
