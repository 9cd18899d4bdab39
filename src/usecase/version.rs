//! App version reporting, rate limited to once per cooldown window.

use std::sync::Arc;
use std::time::Duration;

use super::require_non_empty;
use crate::api::types::{VersionReportRequest, VersionReportResponse};
use crate::context::SdkContext;
use crate::error::{Result, SdkError};
use crate::repository::VersionRepository;
use crate::storage::{get_timestamp, set_timestamp, LAST_VERSION_REPORT_KEY};

/// Minimum time between two successful reports (3 days).
pub const VERSION_REPORT_COOLDOWN: Duration = Duration::from_secs(3 * 24 * 60 * 60);

pub struct VersionUseCases<R> {
    repository: R,
    context: Arc<SdkContext>,
}

impl<R: VersionRepository> VersionUseCases<R> {
    pub fn new(repository: R, context: Arc<SdkContext>) -> Self {
        Self {
            repository,
            context,
        }
    }

    /// Report the running app version.
    ///
    /// Fails with `TooSoon` without any network call if the last
    /// successful report is younger than `VERSION_REPORT_COOLDOWN`.
    pub async fn report_version(
        &self,
        version: &str,
        build_number: &str,
    ) -> Result<VersionReportResponse> {
        self.report_version_at(version, build_number, now_ms()).await
    }

    pub(crate) async fn report_version_at(
        &self,
        version: &str,
        build_number: &str,
        now: u64,
    ) -> Result<VersionReportResponse> {
        self.context.config.validate_configuration()?;
        let version = require_non_empty(version, "version")?;
        let build_number = require_non_empty(build_number, "buildNumber")?;

        let preferences = self.context.preferences.as_ref();
        let last_report = get_timestamp(preferences, LAST_VERSION_REPORT_KEY).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable last version report timestamp: {}", e);
            None
        });
        if let Some(retry_after_ms) = remaining_cooldown(last_report, now) {
            log::debug!("Version report skipped, retry in {} ms", retry_after_ms);
            return Err(SdkError::TooSoon { retry_after_ms });
        }

        let request = VersionReportRequest {
            version,
            build_number,
            platform: self.context.device.platform(),
        };
        let response = self.repository.report_version(&request).await?;

        if let Err(e) = set_timestamp(preferences, LAST_VERSION_REPORT_KEY, now) {
            log::warn!("Failed to persist version report timestamp: {}", e);
        }
        log::info!("Reported version {} ({})", request.version, request.build_number);
        Ok(response)
    }
}

/// Milliseconds left in the cooldown, or `None` if a report is allowed.
///
/// A timestamp in the future (clock moved backwards) counts as elapsed.
pub fn remaining_cooldown(last_report_ms: Option<u64>, now_ms: u64) -> Option<u64> {
    let last = last_report_ms?;
    let cooldown = VERSION_REPORT_COOLDOWN.as_millis() as u64;
    let elapsed = now_ms.checked_sub(last)?;
    (elapsed < cooldown).then(|| cooldown - elapsed)
}

/// Current time in milliseconds since the Unix epoch.
fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
