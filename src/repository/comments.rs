//! Comments on a suggestion.

use std::sync::Arc;

use super::routes;
use crate::api::client::ApiClient;
use crate::api::endpoint::Endpoint;
use crate::api::transport::HttpTransport;
use crate::api::types::{
    ActionResponse, Comment, CommentResponse, CommentsPage, CreateCommentRequest,
    DeleteCommentRequest,
};
use crate::error::Result;

/// One page request for a suggestion's comments, ordered by creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentQuery {
    pub suggestion_id: String,
    /// `createdAt` of the last comment already received.
    pub start_after: Option<String>,
    pub page_limit: Option<u32>,
}

#[allow(async_fn_in_trait)]
pub trait CommentRepository {
    async fn fetch_comments(&self, query: &CommentQuery) -> Result<CommentsPage>;

    async fn create_comment(&self, request: &CreateCommentRequest) -> Result<Comment>;

    async fn delete_comment(&self, request: &DeleteCommentRequest) -> Result<ActionResponse>;
}

pub fn fetch_comments_endpoint(query: &CommentQuery) -> Endpoint {
    let page_limit = query.page_limit.map(|limit| limit.to_string());
    Endpoint::get(routes::FETCH_COMMENTS)
        .with_query("suggestionId", &query.suggestion_id)
        .with_optional_query("startAfter", query.start_after.as_deref())
        .with_optional_query("pageLimit", page_limit.as_deref())
}

pub struct ApiCommentRepository<T> {
    client: Arc<ApiClient<T>>,
}

impl<T> ApiCommentRepository<T> {
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }
}

impl<T: HttpTransport> CommentRepository for ApiCommentRepository<T> {
    async fn fetch_comments(&self, query: &CommentQuery) -> Result<CommentsPage> {
        self.client.send_json(&fetch_comments_endpoint(query)).await
    }

    async fn create_comment(&self, request: &CreateCommentRequest) -> Result<Comment> {
        let endpoint = Endpoint::post_json(routes::CREATE_COMMENT, request)?;
        let response: CommentResponse = self.client.send_json(&endpoint).await?;
        Ok(response.comment)
    }

    async fn delete_comment(&self, request: &DeleteCommentRequest) -> Result<ActionResponse> {
        let endpoint = Endpoint::post_json(routes::DELETE_COMMENT, request)?;
        self.client.send_json(&endpoint).await
    }
}
