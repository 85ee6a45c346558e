//! Refresh orchestration.
//!
//! - [`service`] - Cache-then-fetch refresh with an in-flight guard ([`RefreshService`])
//! - [`scheduler`] - Owned periodic refresh task ([`ScheduledRefresh`])
//! - [`source`] - Snapshot producer seam ([`SnapshotSource`])
//! - [`clock`] - Time source seam ([`Clock`])
//!
//! ```text
//! ScheduledRefresh ──┐
//!                    ├─> RefreshService ──> FreshnessCache (KeyValueStore)
//! manual refresh ────┘          │
//!                               └─────────> SnapshotSource (SnapshotFetcher)
//! ```

pub mod clock;
pub mod scheduler;
pub mod service;
pub mod source;

#[cfg(test)]
mod service_tests;

pub use clock::{Clock, SystemClock};
pub use scheduler::ScheduledRefresh;
pub use service::{DashboardState, RefreshOutcome, RefreshService, RefreshServiceTrait};
pub use source::SnapshotSource;
