use serde_json::Value;

use crate::domain::{FieldPath, PENDING_OPTION_VALUE, SelectItem};
use crate::form::{FormState, SetOptions};

/// What a dropdown wrote on its last change, handed to the registered
/// observer.
#[derive(Debug, Clone, PartialEq)]
pub enum DropdownChange {
    Single(Option<SelectItem>),
    Multi(Vec<SelectItem>),
}

/// Headless dropdown bound to one field. Single-select fields hold one
/// `SelectItem` (or null when cleared); multi-select fields hold a list.
pub struct Dropdown {
    field: FieldPath,
    options: Vec<SelectItem>,
    multi: bool,
    creatable: bool,
    clearable: bool,
    on_change: Option<Box<dyn FnMut(&DropdownChange)>>,
}

impl Dropdown {
    pub fn new(field: FieldPath, options: Vec<SelectItem>) -> Self {
        Self {
            field,
            options,
            multi: false,
            creatable: false,
            clearable: false,
            on_change: None,
        }
    }

    pub fn multi(mut self) -> Self {
        self.multi = true;
        self
    }

    /// Multi-select that lets the user append options the backend has not
    /// seen yet.
    pub fn creatable(mut self) -> Self {
        self.multi = true;
        self.creatable = true;
        self
    }

    pub fn clearable(mut self) -> Self {
        self.clearable = true;
        self
    }

    pub fn on_change(mut self, observer: impl FnMut(&DropdownChange) + 'static) -> Self {
        self.on_change = Some(Box::new(observer));
        self
    }

    pub fn options(&self) -> &[SelectItem] {
        &self.options
    }

    pub fn set_options(&mut self, options: Vec<SelectItem>) {
        self.options = options;
    }

    /// Picks the option whose `value` matches; unknown values are ignored.
    pub fn select(&mut self, form: &mut FormState, value: &str) {
        let Some(item) = self.options.iter().find(|item| item.value == value).cloned() else {
            tracing::debug!(value, "selection does not match any option");
            return;
        };
        if self.multi {
            let mut current = self.current_items(form);
            if !current.iter().any(|existing| existing.value == item.value) {
                current.push(item);
            }
            self.write_multi(form, current);
        } else {
            self.write_single(form, Some(item));
        }
    }

    pub fn deselect(&mut self, form: &mut FormState, value: &str) {
        if self.multi {
            let mut current = self.current_items(form);
            current.retain(|item| item.value != value);
            self.write_multi(form, current);
        } else if self.clearable {
            self.clear(form);
        }
    }

    pub fn clear(&mut self, form: &mut FormState) {
        if !self.clearable {
            return;
        }
        if self.multi {
            self.write_multi(form, Vec::new());
        } else {
            self.write_single(form, None);
        }
    }

    /// Confirms a typed label with no matching option: appends exactly one
    /// new option carrying the pending-id sentinel and adds it to the
    /// field's current value.
    pub fn create(&mut self, form: &mut FormState, label: &str) {
        if !self.creatable || label.trim().is_empty() {
            return;
        }
        let item = SelectItem::new(PENDING_OPTION_VALUE, label);
        self.options.push(item.clone());
        let mut current = self.current_items(form);
        current.push(item);
        self.write_multi(form, current);
    }

    fn current_items(&self, form: &FormState) -> Vec<SelectItem> {
        match form.value(&self.field) {
            Value::Array(_) => {
                serde_json::from_value(form.value(&self.field)).unwrap_or_default()
            }
            _ => Vec::new(),
        }
    }

    fn write_single(&mut self, form: &mut FormState, item: Option<SelectItem>) {
        let value = item
            .as_ref()
            .and_then(|item| serde_json::to_value(item).ok())
            .unwrap_or(Value::Null);
        form.set_value(&self.field, value, SetOptions::default());
        self.notify(DropdownChange::Single(item));
    }

    fn write_multi(&mut self, form: &mut FormState, items: Vec<SelectItem>) {
        let value = serde_json::to_value(&items).unwrap_or_else(|_| Value::Array(Vec::new()));
        form.set_value(&self.field, value, SetOptions::default());
        self.notify(DropdownChange::Multi(items));
    }

    fn notify(&mut self, change: DropdownChange) {
        if let Some(observer) = self.on_change.as_mut() {
            observer(&change);
        }
    }
}
