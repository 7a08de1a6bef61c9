//! Pending shift assignment batch.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::ShiftType;

use super::MonthlySchedule;

/// A batch of shift assignments being put together before submission.
///
/// The draft starts with no employee, no dates and a full shift type, and
/// returns to that state after a successful [`submit`](Self::submit).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignmentDraft {
    employee_id: Option<String>,
    dates: BTreeSet<NaiveDate>,
    shift_type: ShiftType,
}

impl ShiftAssignmentDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the employee the batch is for, replacing any previous choice.
    pub fn select_employee(&mut self, employee_id: impl Into<String>) {
        self.employee_id = Some(employee_id.into());
    }

    /// Toggles a date in the selection.
    ///
    /// Returns true if the date is selected after the call.
    pub fn toggle_date(&mut self, date: NaiveDate) -> bool {
        if self.dates.remove(&date) {
            false
        } else {
            self.dates.insert(date);
            true
        }
    }

    /// Sets the shift type applied to every selected date.
    pub fn set_shift_type(&mut self, shift_type: ShiftType) {
        self.shift_type = shift_type;
    }

    /// The selected employee, if any.
    pub fn employee_id(&self) -> Option<&str> {
        self.employee_id.as_deref()
    }

    /// The selected dates, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    /// The shift type to assign.
    pub fn shift_type(&self) -> ShiftType {
        self.shift_type
    }

    /// Returns the draft to its initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Applies the batch to a schedule.
    ///
    /// On success the draft is reset and the number of assigned dates is
    /// returned. On failure the draft is left as it was so the selection can
    /// be corrected.
    ///
    /// # Returns
    ///
    /// Returns an error if:
    /// - no employee or no date is selected (`EmptySelection`)
    /// - [`MonthlySchedule::assign_shifts`] fails
    pub fn submit(&mut self, schedule: &mut MonthlySchedule) -> EngineResult<usize> {
        let employee_id = self
            .employee_id
            .as_deref()
            .ok_or_else(|| EngineError::EmptySelection {
                message: "no employee selected".to_string(),
            })?;
        if self.dates.is_empty() {
            return Err(EngineError::EmptySelection {
                message: "no dates selected".to_string(),
            });
        }

        let dates: Vec<NaiveDate> = self.dates.iter().copied().collect();
        schedule.assign_shifts(employee_id, &dates, self.shift_type)?;

        self.reset();
        Ok(dates.len())
    }
}
