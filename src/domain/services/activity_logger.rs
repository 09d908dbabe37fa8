use std::sync::Arc;

use tracing::warn;

use crate::domain::models::activity::ActivityLog;
use crate::domain::ports::ActivityLogRepository;

/// Best-effort audit sink. A failed append is logged operationally and
/// swallowed; the triggering mutation is already committed.
pub struct ActivityLogger {
    repo: Arc<dyn ActivityLogRepository>,
}

impl ActivityLogger {
    pub fn new(repo: Arc<dyn ActivityLogRepository>) -> Self {
        Self { repo }
    }

    pub async fn record(&self, entry: ActivityLog) {
        if let Err(e) = self.repo.append(&entry).await {
            warn!(action = %entry.action, "activity log append failed: {:?}", e);
        }
    }
}
