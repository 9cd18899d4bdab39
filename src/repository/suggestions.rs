//! Suggestions, votes and image uploads.

use std::sync::Arc;

use base64::Engine;

use super::routes;
use crate::api::client::ApiClient;
use crate::api::endpoint::Endpoint;
use crate::api::transport::HttpTransport;
use crate::api::types::{
    ActionResponse, CreateSuggestionRequest, DeleteSuggestionRequest, Suggestion,
    SuggestionCursor, SuggestionResponse, SuggestionStatus, SuggestionsPage, UploadImageRequest,
    UploadImageResponse, VoteRequest, VoteResponse, VoteStatus,
};
use crate::error::{Result, SdkError};

/// MIME type of uploaded images. Callers hand over JPEG data.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// One page request for the suggestion list.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionQuery {
    pub app_id: String,
    pub status: Option<SuggestionStatus>,
    pub start_after: Option<SuggestionCursor>,
    pub page_limit: Option<u32>,
}

#[allow(async_fn_in_trait)]
pub trait SuggestionRepository {
    async fn fetch_suggestions(&self, query: &SuggestionQuery) -> Result<SuggestionsPage>;

    async fn create_suggestion(&self, request: &CreateSuggestionRequest) -> Result<Suggestion>;

    async fn delete_suggestion(&self, request: &DeleteSuggestionRequest) -> Result<ActionResponse>;

    async fn vote_status(&self, suggestion_id: &str, device_id: &str) -> Result<VoteStatus>;

    async fn vote(&self, request: &VoteRequest) -> Result<VoteResponse>;

    async fn unvote(&self, request: &VoteRequest) -> Result<VoteResponse>;

    /// Upload raw JPEG bytes as a base64 data URL.
    async fn upload_image(&self, image: &[u8], file_name: &str) -> Result<UploadImageResponse>;
}

/// Endpoint for one suggestion page. The cursor is flattened to its JSON
/// form in the `startAfter` query parameter.
pub fn fetch_suggestions_endpoint(query: &SuggestionQuery) -> Result<Endpoint> {
    let start_after = query
        .start_after
        .as_ref()
        .map(|cursor| {
            serde_json::to_string(cursor)
                .map_err(|e| SdkError::Unknown(format!("Failed to encode cursor: {}", e)))
        })
        .transpose()?;
    let page_limit = query.page_limit.map(|limit| limit.to_string());

    Ok(Endpoint::get(routes::FETCH_SUGGESTIONS)
        .with_query("appId", &query.app_id)
        .with_optional_query("status", query.status.as_ref().map(|s| s.as_str()))
        .with_optional_query("startAfter", start_after.as_deref())
        .with_optional_query("pageLimit", page_limit.as_deref()))
}

/// `data:image/jpeg;base64,...` envelope for an image upload.
pub fn image_upload_request(image: &[u8], file_name: &str) -> UploadImageRequest {
    let encoded = base64::engine::general_purpose::STANDARD.encode(image);
    UploadImageRequest {
        image_data: format!("data:{};base64,{}", IMAGE_MIME_TYPE, encoded),
        file_name: file_name.to_string(),
        mime_type: IMAGE_MIME_TYPE.to_string(),
    }
}

pub struct ApiSuggestionRepository<T> {
    client: Arc<ApiClient<T>>,
}

impl<T> ApiSuggestionRepository<T> {
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }
}

impl<T: HttpTransport> SuggestionRepository for ApiSuggestionRepository<T> {
    async fn fetch_suggestions(&self, query: &SuggestionQuery) -> Result<SuggestionsPage> {
        let endpoint = fetch_suggestions_endpoint(query)?;
        self.client.send_json(&endpoint).await
    }

    async fn create_suggestion(&self, request: &CreateSuggestionRequest) -> Result<Suggestion> {
        let endpoint = Endpoint::post_json(routes::CREATE_SUGGESTION, request)?;
        let response: SuggestionResponse = self.client.send_json(&endpoint).await?;
        Ok(response.suggestion)
    }

    async fn delete_suggestion(&self, request: &DeleteSuggestionRequest) -> Result<ActionResponse> {
        let endpoint = Endpoint::post_json(routes::DELETE_SUGGESTION, request)?;
        self.client.send_json(&endpoint).await
    }

    async fn vote_status(&self, suggestion_id: &str, device_id: &str) -> Result<VoteStatus> {
        let endpoint = Endpoint::get(routes::VOTE_STATUS)
            .with_query("suggestionId", suggestion_id)
            .with_query("deviceId", device_id);
        self.client.send_json(&endpoint).await
    }

    async fn vote(&self, request: &VoteRequest) -> Result<VoteResponse> {
        let endpoint = Endpoint::post_json(routes::VOTE, request)?;
        self.client.send_json(&endpoint).await
    }

    async fn unvote(&self, request: &VoteRequest) -> Result<VoteResponse> {
        let endpoint = Endpoint::post_json(routes::UNVOTE, request)?;
        self.client.send_json(&endpoint).await
    }

    async fn upload_image(&self, image: &[u8], file_name: &str) -> Result<UploadImageResponse> {
        let request = image_upload_request(image, file_name);
        let endpoint = Endpoint::post_json(routes::UPLOAD_IMAGE, &request)?;
        self.client.send_json(&endpoint).await
    }
}
