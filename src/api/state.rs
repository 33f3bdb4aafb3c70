use std::sync::Arc;

use crate::upstream::client::AttendanceBackend;
use crate::upstream::context::QueryContext;
use crate::upstream::tracker::RequestTracker;

/// Shared state of the dashboard handlers.
pub struct DashboardState {
    pub backend: Arc<dyn AttendanceBackend>,
    pub context: QueryContext,
    pub tracker: RequestTracker,
}

impl DashboardState {
    pub fn new(backend: Arc<dyn AttendanceBackend>, context: QueryContext) -> Self {
        Self {
            backend,
            context,
            tracker: RequestTracker::new(),
        }
    }
}
