use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::domain::FieldPath;
use crate::form::{FormState, SetOptions};

pub(crate) const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DISPLAY_FORMAT: &str = "%-d-%b-%Y";

/// Date picker: the field stores a normalized timestamp, the widget shows
/// `D-MMM-YYYY`. Clearing writes an explicit null, distinguishable from a
/// field that was never touched.
pub struct DatePicker {
    field: FieldPath,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
}

impl DatePicker {
    pub fn new(field: FieldPath) -> Self {
        Self {
            field,
            min: None,
            max: None,
        }
    }

    pub fn with_min(mut self, min: NaiveDate) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: NaiveDate) -> Self {
        self.max = Some(max);
        self
    }

    /// `Some(date)` stores the normalized timestamp and clears the field's
    /// error; `None` records an explicit "no date" without touching the
    /// error state.
    pub fn select(&self, form: &mut FormState, date: Option<NaiveDate>) {
        match date {
            Some(date) => {
                if self.min.is_some_and(|min| date < min)
                    || self.max.is_some_and(|max| date > max)
                {
                    form.set_error(&self.field, "Date is out of range");
                    return;
                }
                let stamp = date
                    .and_hms_opt(0, 0, 0)
                    .map(|at| at.format(STAMP_FORMAT).to_string())
                    .unwrap_or_default();
                form.set_value(&self.field, Value::String(stamp), SetOptions::default());
            }
            None => {
                form.set_value(&self.field, Value::Null, SetOptions::keep_error());
            }
        }
    }

    pub fn selected(&self, form: &FormState) -> Option<NaiveDate> {
        match form.value(&self.field) {
            Value::String(stamp) => parse_stamp(&stamp).map(|at| at.date()),
            _ => None,
        }
    }

    /// Human display text, empty when unset or cleared.
    pub fn display(&self, form: &FormState) -> String {
        self.selected(form)
            .map(|date| date.format(DISPLAY_FORMAT).to_string())
            .unwrap_or_default()
    }

    pub fn field(&self) -> &FieldPath {
        &self.field
    }
}

pub(crate) fn parse_stamp(stamp: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::{FieldKind, FieldSchema, FormSchema};
    use crate::form::{FieldValue, StampValue};

    use super::*;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    fn form() -> FormState {
        FormState::new(&FormSchema::new(vec![FieldSchema::new(
            path("start_date"),
            "Start date",
            FieldKind::Date,
        )]))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn selection_stores_normalized_stamp_and_clears_error() {
        let mut state = form();
        state.set_error(&path("start_date"), "Required");
        let picker = DatePicker::new(path("start_date"));
        picker.select(&mut state, Some(date(2026, 8, 5)));
        assert_eq!(state.value(&path("start_date")), json!("2026-08-05T00:00:00"));
        assert!(!state.has_error(&path("start_date")));
        assert_eq!(picker.display(&state), "5-Aug-2026");
    }

    #[test]
    fn clearing_is_distinguishable_from_untouched() {
        let mut state = form();
        let picker = DatePicker::new(path("start_date"));
        assert!(matches!(
            state.field(&path("start_date")).unwrap().value,
            FieldValue::Stamp(StampValue::Unset)
        ));
        picker.select(&mut state, None);
        assert!(matches!(
            state.field(&path("start_date")).unwrap().value,
            FieldValue::Stamp(StampValue::Cleared)
        ));
        assert_eq!(picker.display(&state), "");
    }

    #[test]
    fn out_of_range_selection_is_rejected_with_an_error() {
        let mut state = form();
        let picker = DatePicker::new(path("start_date"))
            .with_min(date(2026, 1, 1))
            .with_max(date(2026, 12, 31));
        picker.select(&mut state, Some(date(2025, 6, 1)));
        assert_eq!(state.value(&path("start_date")), Value::Null);
        assert!(state.has_error(&path("start_date")));
        picker.select(&mut state, Some(date(2026, 6, 1)));
        assert_eq!(picker.selected(&state), Some(date(2026, 6, 1)));
        assert!(!state.has_error(&path("start_date")));
    }

    #[test]
    fn seeded_fractional_stamps_still_display() {
        let mut state = form();
        state.seed_from_value(&json!({"start_date": "2026-08-05T14:30:00.0000000"}));
        let picker = DatePicker::new(path("start_date"));
        assert_eq!(picker.display(&state), "5-Aug-2026");
    }
}
