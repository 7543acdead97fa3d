//! Economic calendar port trait.

use chrono::NaiveDate;

use crate::domain::calendar::CalendarEvent;
use crate::domain::error::VolscanError;

pub trait CalendarPort {
    /// Events from `today` through `today + days_ahead`. An empty list is valid.
    fn fetch_events(
        &self,
        today: NaiveDate,
        days_ahead: u32,
    ) -> Result<Vec<CalendarEvent>, VolscanError>;
}
