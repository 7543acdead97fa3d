//! Notification port trait.

use crate::domain::error::VolscanError;
use crate::domain::report::{Report, RunSummary};

/// Port for turning a report into a human-readable digest.
pub trait NotificationPort {
    fn notify(
        &self,
        report: &Report,
        summary: &RunSummary<'_>,
        output_path: &str,
    ) -> Result<(), VolscanError>;
}
