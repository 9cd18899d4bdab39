//! App version reporting.

use std::sync::Arc;

use super::routes;
use crate::api::client::ApiClient;
use crate::api::endpoint::Endpoint;
use crate::api::transport::HttpTransport;
use crate::api::types::{VersionReportRequest, VersionReportResponse};
use crate::error::Result;

#[allow(async_fn_in_trait)]
pub trait VersionRepository {
    async fn report_version(&self, request: &VersionReportRequest) -> Result<VersionReportResponse>;
}

pub struct ApiVersionRepository<T> {
    client: Arc<ApiClient<T>>,
}

impl<T> ApiVersionRepository<T> {
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }
}

impl<T: HttpTransport> VersionRepository for ApiVersionRepository<T> {
    async fn report_version(&self, request: &VersionReportRequest) -> Result<VersionReportResponse> {
        let endpoint = Endpoint::post_json(routes::REPORT_VERSION, request)?;
        self.client.send_json(&endpoint).await
    }
}
