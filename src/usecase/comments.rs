//! Comment use cases.

use std::sync::Arc;

use super::{optional_text, require_non_empty, validate_limit};
use crate::api::types::{
    ActionResponse, Comment, CommentsPage, CreateCommentRequest, DeleteCommentRequest,
};
use crate::context::SdkContext;
use crate::error::{Result, SdkError};
use crate::repository::{CommentQuery, CommentRepository};

pub struct CommentUseCases<R> {
    repository: R,
    context: Arc<SdkContext>,
}

impl<R: CommentRepository> CommentUseCases<R> {
    pub fn new(repository: R, context: Arc<SdkContext>) -> Self {
        Self {
            repository,
            context,
        }
    }

    /// Fetch one page of comments, oldest first, starting after the
    /// `createdAt` of the last comment already held.
    pub async fn fetch_comments(
        &self,
        suggestion_id: &str,
        start_after: Option<&str>,
        limit: Option<u32>,
    ) -> Result<CommentsPage> {
        self.context.config.validate_configuration()?;
        let suggestion_id = require_non_empty(suggestion_id, "suggestionId")?;
        validate_limit(limit)?;

        let query = CommentQuery {
            suggestion_id,
            start_after: optional_text(start_after),
            page_limit: limit,
        };
        self.repository.fetch_comments(&query).await
    }

    /// Post a comment. Rejected locally when comments are disabled.
    pub async fn create_comment(
        &self,
        suggestion_id: &str,
        text: &str,
        nickname: Option<&str>,
    ) -> Result<Comment> {
        let config = self.context.config.snapshot()?;
        let suggestion_id = require_non_empty(suggestion_id, "suggestionId")?;
        let text = require_non_empty(text, "text")?;
        if !config.comments_enabled {
            return Err(SdkError::invalid_input("comments are disabled for this app"));
        }

        let request = CreateCommentRequest {
            suggestion_id,
            text,
            device_id: self.context.device.device_id(),
            nickname: optional_text(nickname),
        };
        self.repository.create_comment(&request).await
    }

    pub async fn delete_comment(&self, comment_id: &str) -> Result<ActionResponse> {
        self.context.config.validate_configuration()?;
        let comment_id = require_non_empty(comment_id, "commentId")?;

        let request = DeleteCommentRequest {
            comment_id,
            device_id: self.context.device.device_id(),
        };
        self.repository.delete_comment(&request).await
    }
}
