use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid plan range: start {start} is after end {end}")]
    InvalidPlanRange { start: NaiveDate, end: NaiveDate },

    #[error("Meal slot {slot_id} dated {date} falls outside plan range {start}..={end}")]
    SlotOutOfRange {
        slot_id: String,
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },
}
