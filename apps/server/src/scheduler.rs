//! Background market refresh for the web server.

use std::sync::Arc;
use std::time::Duration;

use coinboard_core::refresh::ScheduledRefresh;

use crate::main_lib::AppState;

/// Starts the periodic refresh. The first tick runs immediately so the
/// dashboard has data (or a cached snapshot) right after startup.
pub fn start_refresh_scheduler(state: &Arc<AppState>, period: Duration) -> ScheduledRefresh {
    tracing::info!("Starting market refresh scheduler ({}s interval)", period.as_secs());
    ScheduledRefresh::start(state.refresh_service.clone(), period)
}
