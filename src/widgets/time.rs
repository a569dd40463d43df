use chrono::Timelike;
use serde_json::Value;

use crate::domain::FieldPath;
use crate::form::{FormState, SetOptions};

use super::date::{STAMP_FORMAT, parse_stamp};

pub const DATE_REQUIRED_MESSAGE: &str = "Date is required!";

/// Minute choices offered by the picker.
pub const MINUTE_CHOICES: [u32; 2] = [0, 30];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubErrors {
    pub hour: Option<String>,
    pub minute: Option<String>,
    pub meridiem: Option<String>,
}

impl SubErrors {
    pub fn any(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.meridiem.is_some()
    }
}

/// Time picker: decomposes the stored timestamp into hour (1-12), minute
/// (00 or 30), and meridiem, and recomposes them with an externally
/// supplied date only when the user confirms. Cancelling closes the popup
/// and leaves the stored value untouched.
pub struct TimePicker {
    field: FieldPath,
    open: bool,
    hour: Option<u32>,
    minute: Option<u32>,
    meridiem: Option<Meridiem>,
    sub_errors: SubErrors,
}

impl TimePicker {
    pub fn new(field: FieldPath) -> Self {
        Self {
            field,
            open: false,
            hour: None,
            minute: None,
            meridiem: None,
            sub_errors: SubErrors::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn sub_errors(&self) -> &SubErrors {
        &self.sub_errors
    }

    /// Opens the popup, seeding the sub-selections from the stored value.
    /// Without a backing date there is nothing to compose against, so the
    /// field gets an error and the popup stays closed.
    pub fn open(&mut self, form: &mut FormState, date: Option<&str>) -> bool {
        if date.is_none_or(|date| date.trim().is_empty()) {
            form.set_error(&self.field, DATE_REQUIRED_MESSAGE);
            return false;
        }
        if let Value::String(stamp) = form.value(&self.field) {
            if let Some(at) = parse_stamp(&stamp) {
                let hour24 = at.hour();
                self.hour = Some(if hour24 % 12 == 0 { 12 } else { hour24 % 12 });
                self.minute = Some(at.minute());
                self.meridiem = Some(if hour24 >= 12 {
                    Meridiem::Pm
                } else {
                    Meridiem::Am
                });
            }
        }
        self.open = true;
        true
    }

    pub fn set_hour(&mut self, hour: u32) {
        if !(1..=12).contains(&hour) {
            tracing::debug!(hour, "hour outside 1-12 ignored");
            return;
        }
        self.hour = Some(hour);
        self.sub_errors = SubErrors::default();
    }

    pub fn set_minute(&mut self, minute: u32) {
        if !MINUTE_CHOICES.contains(&minute) {
            tracing::debug!(minute, "minute outside the offered choices ignored");
            return;
        }
        self.minute = Some(minute);
        self.sub_errors = SubErrors::default();
    }

    pub fn set_meridiem(&mut self, meridiem: Meridiem) {
        self.meridiem = Some(meridiem);
        self.sub_errors = SubErrors::default();
    }

    /// Recomposes the three sub-selections with `date` into one normalized
    /// timestamp. Writes only on success; incomplete selections produce
    /// sub-errors and keep the popup open.
    pub fn confirm(&mut self, form: &mut FormState, date: &str) -> bool {
        if !self.validate() {
            return false;
        }
        let (Some(hour), Some(minute), Some(meridiem)) = (self.hour, self.minute, self.meridiem)
        else {
            return false;
        };
        let Some(day) = parse_stamp(date)
            .map(|at| at.date())
            .or_else(|| chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        else {
            form.set_error(&self.field, DATE_REQUIRED_MESSAGE);
            return false;
        };
        let hour24 = match (meridiem, hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        };
        let Some(at) = day.and_hms_opt(hour24, minute, 0) else {
            return false;
        };
        form.set_value(
            &self.field,
            Value::String(at.format(STAMP_FORMAT).to_string()),
            SetOptions::default(),
        );
        self.open = false;
        true
    }

    /// Closes the popup without touching the stored value.
    pub fn cancel(&mut self) {
        self.open = false;
        self.sub_errors = SubErrors::default();
    }

    /// Readout for the closed-state input, e.g. `2:30 PM`; empty until all
    /// three sub-selections are made.
    pub fn display(&self) -> String {
        match (self.hour, self.minute, self.meridiem) {
            (Some(hour), Some(minute), Some(meridiem)) => {
                let suffix = match meridiem {
                    Meridiem::Am => "AM",
                    Meridiem::Pm => "PM",
                };
                format!("{hour}:{minute:02} {suffix}")
            }
            _ => String::new(),
        }
    }

    fn validate(&mut self) -> bool {
        let mut errors = SubErrors::default();
        if self.hour.is_none() {
            errors.hour = Some("Please select an hour.".to_string());
        }
        if self.minute.is_none() {
            errors.minute = Some("Please select a minute.".to_string());
        }
        if self.meridiem.is_none() {
            errors.meridiem = Some("Please select AM or PM.".to_string());
        }
        let valid = !errors.any();
        self.sub_errors = errors;
        valid
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::{FieldKind, FieldSchema, FormSchema};

    use super::*;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    fn form() -> FormState {
        FormState::new(&FormSchema::new(vec![FieldSchema::new(
            path("interview_time"),
            "Interview time",
            FieldKind::Time,
        )]))
    }

    #[test]
    fn open_without_date_sets_error_and_stays_closed() {
        let mut state = form();
        let mut picker = TimePicker::new(path("interview_time"));
        assert!(!picker.open(&mut state, None));
        assert!(!picker.is_open());
        assert_eq!(
            state.error_message(&path("interview_time"), None),
            Some(DATE_REQUIRED_MESSAGE.to_string())
        );
        assert!(!picker.open(&mut state, Some("  ")));
    }

    #[test]
    fn confirm_composes_date_and_time() {
        let mut state = form();
        let mut picker = TimePicker::new(path("interview_time"));
        assert!(picker.open(&mut state, Some("2026-08-05T00:00:00")));
        picker.set_hour(2);
        picker.set_minute(30);
        picker.set_meridiem(Meridiem::Pm);
        assert!(picker.confirm(&mut state, "2026-08-05T00:00:00"));
        assert_eq!(
            state.value(&path("interview_time")),
            json!("2026-08-05T14:30:00")
        );
        assert!(!picker.is_open());
        assert_eq!(picker.display(), "2:30 PM");
    }

    #[test]
    fn midnight_and_noon_compose_correctly() {
        let mut state = form();
        let mut picker = TimePicker::new(path("interview_time"));
        picker.open(&mut state, Some("2026-08-05"));
        picker.set_hour(12);
        picker.set_minute(0);
        picker.set_meridiem(Meridiem::Am);
        picker.confirm(&mut state, "2026-08-05");
        assert_eq!(
            state.value(&path("interview_time")),
            json!("2026-08-05T00:00:00")
        );
        picker.open(&mut state, Some("2026-08-05"));
        picker.set_meridiem(Meridiem::Pm);
        picker.confirm(&mut state, "2026-08-05");
        assert_eq!(
            state.value(&path("interview_time")),
            json!("2026-08-05T12:00:00")
        );
    }

    #[test]
    fn incomplete_selection_reports_sub_errors_and_writes_nothing() {
        let mut state = form();
        let mut picker = TimePicker::new(path("interview_time"));
        picker.open(&mut state, Some("2026-08-05"));
        picker.set_hour(9);
        assert!(!picker.confirm(&mut state, "2026-08-05"));
        assert!(picker.is_open());
        assert!(picker.sub_errors().minute.is_some());
        assert!(picker.sub_errors().meridiem.is_some());
        assert_eq!(state.value(&path("interview_time")), Value::Null);
        // the next sub-selection clears the sub-errors
        picker.set_minute(30);
        assert!(!picker.sub_errors().any());
    }

    #[test]
    fn cancel_keeps_the_stored_value() {
        let mut state = form();
        let mut picker = TimePicker::new(path("interview_time"));
        picker.open(&mut state, Some("2026-08-05"));
        picker.set_hour(9);
        picker.set_minute(0);
        picker.set_meridiem(Meridiem::Am);
        picker.confirm(&mut state, "2026-08-05");

        picker.open(&mut state, Some("2026-08-05"));
        picker.set_hour(11);
        picker.cancel();
        assert!(!picker.is_open());
        assert_eq!(
            state.value(&path("interview_time")),
            json!("2026-08-05T09:00:00")
        );
    }

    #[test]
    fn reopening_seeds_from_the_stored_value() {
        let mut state = form();
        state.seed_from_value(&json!({"interview_time": "2026-08-05T14:30:00"}));
        let mut picker = TimePicker::new(path("interview_time"));
        picker.open(&mut state, Some("2026-08-05"));
        assert_eq!(picker.display(), "2:30 PM");
    }
}
