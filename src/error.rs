use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the user by the dashboard.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// The orders file is missing, unreadable or malformed. Fatal for the session.
    #[error("Data unavailable ({}): {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// A statistic has no defined value for the current view.
    #[error("No data for {metric}")]
    UndefinedAggregate { metric: &'static str },
}
