//! Suggestion, vote and image use cases.

use std::sync::Arc;

use super::{optional_text, require_non_empty, validate_limit};
use crate::api::types::{
    ActionResponse, CreateSuggestionRequest, DeleteSuggestionRequest, Suggestion,
    SuggestionCursor, SuggestionStatus, SuggestionsPage, UploadImageResponse, VoteRequest,
    VoteResponse, VoteStatus, VoteType,
};
use crate::context::SdkContext;
use crate::error::{Result, SdkError};
use crate::repository::{SuggestionQuery, SuggestionRepository};

/// Result of a toggle: the vote now applied (or `None` after an unvote)
/// and the server response.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteOutcome {
    pub suggestion_id: String,
    pub applied: Option<VoteType>,
    pub response: VoteResponse,
}

pub struct SuggestionUseCases<R> {
    repository: R,
    context: Arc<SdkContext>,
}

impl<R: SuggestionRepository> SuggestionUseCases<R> {
    pub fn new(repository: R, context: Arc<SdkContext>) -> Self {
        Self {
            repository,
            context,
        }
    }

    /// Fetch one page of suggestions for the configured app.
    pub async fn fetch_suggestions(
        &self,
        status: Option<SuggestionStatus>,
        start_after: Option<SuggestionCursor>,
        limit: Option<u32>,
    ) -> Result<SuggestionsPage> {
        let config = self.context.config.snapshot()?;
        validate_limit(limit)?;

        let query = SuggestionQuery {
            app_id: config.app_id,
            status,
            start_after,
            page_limit: limit,
        };
        self.repository.fetch_suggestions(&query).await
    }

    pub async fn create_suggestion(
        &self,
        title: &str,
        description: Option<&str>,
        nickname: Option<&str>,
        user_is_premium: bool,
    ) -> Result<Suggestion> {
        self.context.config.validate_configuration()?;
        let title = require_non_empty(title, "title")?;

        let device = self.context.device.identity();
        let request = CreateSuggestionRequest {
            title,
            description: optional_text(description),
            device_id: device.device_id,
            nickname: optional_text(nickname),
            platform: device.platform,
            language: device.language,
            user_is_premium,
        };
        let suggestion = self.repository.create_suggestion(&request).await?;
        log::info!("Created suggestion {}", suggestion.id);
        Ok(suggestion)
    }

    /// Delete a suggestion created from this device. Callers drop it from
    /// their lists and reload.
    pub async fn delete_suggestion(&self, suggestion_id: &str) -> Result<ActionResponse> {
        self.context.config.validate_configuration()?;
        let suggestion_id = require_non_empty(suggestion_id, "suggestionId")?;

        let request = DeleteSuggestionRequest {
            suggestion_id,
            device_id: self.context.device.device_id(),
        };
        self.repository.delete_suggestion(&request).await
    }

    /// Whether this device has voted on `suggestion_id`.
    pub async fn vote_status(&self, suggestion_id: &str) -> Result<VoteStatus> {
        self.context.config.validate_configuration()?;
        let suggestion_id = require_non_empty(suggestion_id, "suggestionId")?;

        let device_id = self.context.device.device_id();
        self.repository.vote_status(&suggestion_id, &device_id).await
    }

    pub async fn vote(&self, suggestion_id: &str, vote_type: VoteType) -> Result<VoteResponse> {
        let request = self.vote_request(suggestion_id, vote_type)?;
        self.repository.vote(&request).await
    }

    pub async fn unvote(&self, suggestion_id: &str, vote_type: VoteType) -> Result<VoteResponse> {
        let request = self.vote_request(suggestion_id, vote_type)?;
        self.repository.unvote(&request).await
    }

    /// Vote if no vote is held, otherwise withdraw the held vote.
    ///
    /// `current` is the locally known vote and may be stale; the server
    /// response is authoritative.
    pub async fn toggle_vote(
        &self,
        suggestion_id: &str,
        desired: VoteType,
        current: Option<VoteType>,
    ) -> Result<VoteOutcome> {
        let (response, applied) = match current {
            Some(held) => (self.unvote(suggestion_id, held).await?, None),
            None => (self.vote(suggestion_id, desired).await?, Some(desired)),
        };
        Ok(VoteOutcome {
            suggestion_id: suggestion_id.trim().to_string(),
            applied,
            response,
        })
    }

    /// Upload JPEG bytes to attach to a suggestion.
    pub async fn upload_image(&self, image: &[u8], file_name: &str) -> Result<UploadImageResponse> {
        self.context.config.validate_configuration()?;
        let file_name = require_non_empty(file_name, "fileName")?;
        if image.is_empty() {
            return Err(SdkError::invalid_input("image data must not be empty"));
        }
        self.repository.upload_image(image, &file_name).await
    }

    fn vote_request(&self, suggestion_id: &str, vote_type: VoteType) -> Result<VoteRequest> {
        self.context.config.validate_configuration()?;
        let suggestion_id = require_non_empty(suggestion_id, "suggestionId")?;

        let device = self.context.device.identity();
        Ok(VoteRequest {
            suggestion_id,
            device_id: device.device_id,
            vote_type,
            platform: device.platform,
            language: device.language,
        })
    }
}
