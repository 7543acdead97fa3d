//! Report persistence port trait.

use crate::domain::error::VolscanError;
use crate::domain::report::Report;

/// Port for persisting a run's report.
pub trait ReportPort {
    fn write(&self, report: &Report, output_path: &str) -> Result<(), VolscanError>;
}
