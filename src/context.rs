//! SDK context and facade.
//!
//! `SdkContext` replaces process-wide singletons: the configuration store,
//! device identity and preference store are created once and handed to
//! every use case explicitly. `FeedbackSdk` wires the production stack
//! (signed client, repositories, use cases) on top of one context.

use std::sync::Arc;

use crate::api::client::ApiClient;
use crate::api::transport::{HttpTransport, ReqwestTransport};
use crate::config::{ConfigStore, SdkOptions};
use crate::device::DeviceIdentityProvider;
use crate::error::Result;
use crate::repository::{ApiCommentRepository, ApiSuggestionRepository, ApiVersionRepository};
use crate::storage::PreferenceStore;
use crate::usecase::{CommentUseCases, SuggestionUseCases, VersionUseCases};

/// Shared, lock-guarded state needed by every use case.
pub struct SdkContext {
    pub config: Arc<ConfigStore>,
    pub device: Arc<DeviceIdentityProvider>,
    pub preferences: Arc<dyn PreferenceStore>,
}

impl SdkContext {
    /// Unconfigured context with a device identity backed by `preferences`.
    pub fn new(preferences: Arc<dyn PreferenceStore>) -> Self {
        let device = DeviceIdentityProvider::new(Arc::clone(&preferences));
        Self::with_device(Arc::new(ConfigStore::new()), Arc::new(device), preferences)
    }

    pub fn with_device(
        config: Arc<ConfigStore>,
        device: Arc<DeviceIdentityProvider>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            config,
            device,
            preferences,
        }
    }
}

/// Fully wired SDK over transport `T`.
pub struct FeedbackSdk<T> {
    context: Arc<SdkContext>,
    suggestions: SuggestionUseCases<ApiSuggestionRepository<T>>,
    comments: CommentUseCases<ApiCommentRepository<T>>,
    version: VersionUseCases<ApiVersionRepository<T>>,
}

impl FeedbackSdk<ReqwestTransport> {
    /// SDK talking to the network through reqwest.
    pub fn new(preferences: Arc<dyn PreferenceStore>) -> Self {
        Self::with_transport(ReqwestTransport::new(), Arc::new(SdkContext::new(preferences)))
    }
}

impl<T: HttpTransport> FeedbackSdk<T> {
    pub fn with_transport(transport: T, context: Arc<SdkContext>) -> Self {
        let client = Arc::new(ApiClient::new(transport, Arc::clone(&context.config)));
        Self {
            suggestions: SuggestionUseCases::new(
                ApiSuggestionRepository::new(Arc::clone(&client)),
                Arc::clone(&context),
            ),
            comments: CommentUseCases::new(
                ApiCommentRepository::new(Arc::clone(&client)),
                Arc::clone(&context),
            ),
            version: VersionUseCases::new(ApiVersionRepository::new(client), Arc::clone(&context)),
            context,
        }
    }

    pub fn configure(&self, api_key: &str, api_secret: &str, app_id: &str) -> Result<()> {
        self.context.config.configure(api_key, api_secret, app_id)
    }

    pub fn configure_with_options(
        &self,
        api_key: &str,
        api_secret: &str,
        app_id: &str,
        options: SdkOptions,
    ) -> Result<()> {
        self.context
            .config
            .configure_with_options(api_key, api_secret, app_id, options)
    }

    pub fn reset(&self) {
        self.context.config.reset();
    }

    pub fn context(&self) -> &Arc<SdkContext> {
        &self.context
    }

    pub fn suggestions(&self) -> &SuggestionUseCases<ApiSuggestionRepository<T>> {
        &self.suggestions
    }

    pub fn comments(&self) -> &CommentUseCases<ApiCommentRepository<T>> {
        &self.comments
    }

    pub fn version(&self) -> &VersionUseCases<ApiVersionRepository<T>> {
        &self.version
    }
}
