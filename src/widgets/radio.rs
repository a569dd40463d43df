use serde_json::Value;

use crate::domain::{FieldPath, SelectItem};
use crate::form::{FormState, SetOptions};

/// Two-position radio whose positions map to literal `true`/`false`, not
/// strings.
pub struct BoolRadio {
    field: FieldPath,
    labels: [String; 2],
}

impl BoolRadio {
    pub fn new(field: FieldPath, yes_label: impl Into<String>, no_label: impl Into<String>) -> Self {
        Self {
            field,
            labels: [yes_label.into(), no_label.into()],
        }
    }

    /// Position 0 is the affirmative option.
    pub fn choose(&self, form: &mut FormState, position: usize) {
        form.set_value(&self.field, Value::Bool(position == 0), SetOptions::default());
    }

    pub fn set(&self, form: &mut FormState, value: bool) {
        form.set_value(&self.field, Value::Bool(value), SetOptions::default());
    }

    pub fn is_checked(&self, form: &FormState, position: usize) -> bool {
        form.value(&self.field) == Value::Bool(position == 0)
    }

    pub fn labels(&self) -> (&str, &str) {
        (&self.labels[0], &self.labels[1])
    }
}

/// Radio over a fixed option set; stores the chosen option's `value`
/// string.
pub struct CircularRadio {
    field: FieldPath,
    options: Vec<SelectItem>,
    on_change: Option<Box<dyn FnMut(&str)>>,
}

impl CircularRadio {
    pub fn new(field: FieldPath, options: Vec<SelectItem>) -> Self {
        Self {
            field,
            options,
            on_change: None,
        }
    }

    pub fn on_change(mut self, observer: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(observer));
        self
    }

    pub fn options(&self) -> &[SelectItem] {
        &self.options
    }

    pub fn choose(&mut self, form: &mut FormState, value: &str) {
        if !self.options.iter().any(|item| item.value == value) {
            tracing::debug!(value, "radio choice does not match any option");
            return;
        }
        form.set_value(
            &self.field,
            Value::String(value.to_string()),
            SetOptions::default(),
        );
        if let Some(observer) = self.on_change.as_mut() {
            observer(value);
        }
    }

    pub fn is_checked(&self, form: &FormState, value: &str) -> bool {
        form.value(&self.field) == Value::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;

    use crate::domain::{FieldKind, FieldSchema, FormSchema, TextTransform};

    use super::*;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    #[test]
    fn positions_map_to_boolean_literals() {
        let mut form = FormState::new(&FormSchema::new(vec![FieldSchema::new(
            path("remote"),
            "Remote",
            FieldKind::Bool,
        )]));
        let radio = BoolRadio::new(path("remote"), "Yes", "No");
        radio.choose(&mut form, 0);
        assert_eq!(form.value(&path("remote")), json!(true));
        assert!(radio.is_checked(&form, 0));
        radio.choose(&mut form, 1);
        assert_eq!(form.value(&path("remote")), json!(false));
        assert!(radio.is_checked(&form, 1));
    }

    #[test]
    fn circular_radio_stores_the_value_string() {
        let mut form = FormState::new(&FormSchema::new(vec![FieldSchema::new(
            path("seniority"),
            "Seniority",
            FieldKind::Text(TextTransform::None),
        )]));
        let chosen: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = Rc::clone(&chosen);
        let mut radio = CircularRadio::new(
            path("seniority"),
            vec![
                SelectItem::new("jr", "Junior"),
                SelectItem::new("sr", "Senior"),
            ],
        )
        .on_change(move |value| sink.borrow_mut().push(value.to_string()));
        radio.choose(&mut form, "sr");
        assert_eq!(form.value(&path("seniority")), json!("sr"));
        assert!(radio.is_checked(&form, "sr"));
        radio.choose(&mut form, "nope");
        assert_eq!(chosen.borrow().as_slice(), &["sr".to_string()]);
    }
}
