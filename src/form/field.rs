use serde_json::Value;

use crate::domain::{FieldKind, FieldSchema, SelectItem};

use super::error::FieldCoercionError;

/// Stored timestamp for date/time fields. `Cleared` is an explicit "no
/// date" chosen by the user, distinguishable from a field never touched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StampValue {
    #[default]
    Unset,
    Cleared,
    At(String),
}

impl StampValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StampValue::At(stamp) => Some(stamp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Single(Option<SelectItem>),
    Multi(Vec<SelectItem>),
    Stamp(StampValue),
}

#[derive(Debug, Clone)]
pub struct FieldState {
    pub schema: FieldSchema,
    pub value: FieldValue,
    pub dirty: bool,
}

impl FieldState {
    pub fn from_schema(schema: FieldSchema) -> Self {
        let mut state = Self {
            value: empty_value(&schema.kind),
            schema,
            dirty: false,
        };
        if let Some(default) = state.schema.default.clone() {
            state.write(&default);
            state.dirty = false;
        }
        state
    }

    /// Current value as JSON. Unset fields yield the kind's empty default.
    pub fn read(&self) -> Value {
        match &self.value {
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::Bool(flag) => Value::Bool(*flag),
            FieldValue::Single(item) => item
                .as_ref()
                .and_then(|item| serde_json::to_value(item).ok())
                .unwrap_or(Value::Null),
            FieldValue::Multi(items) => {
                serde_json::to_value(items).unwrap_or_else(|_| Value::Array(Vec::new()))
            }
            FieldValue::Stamp(stamp) => match stamp {
                StampValue::At(stamp) => Value::String(stamp.clone()),
                _ => Value::Null,
            },
        }
    }

    /// Writes a JSON value of the field's declared type. Mismatched shapes
    /// are ignored with a diagnostic so a bad caller cannot poison state.
    pub fn write(&mut self, value: &Value) -> bool {
        let accepted = match (&self.schema.kind, value) {
            (
                FieldKind::Text(_)
                | FieldKind::Multiline
                | FieldKind::RichText
                | FieldKind::Number
                | FieldKind::Masked(_)
                | FieldKind::File,
                Value::String(text),
            ) => {
                self.value = FieldValue::Text(text.clone());
                true
            }
            (
                FieldKind::Text(_)
                | FieldKind::Multiline
                | FieldKind::RichText
                | FieldKind::Number
                | FieldKind::Masked(_)
                | FieldKind::File,
                Value::Null,
            ) => {
                self.value = FieldValue::Text(String::new());
                true
            }
            (FieldKind::Bool, Value::Bool(flag)) => {
                self.value = FieldValue::Bool(*flag);
                true
            }
            (FieldKind::Select { multi: false, .. }, Value::Null) => {
                self.value = FieldValue::Single(None);
                true
            }
            (FieldKind::Select { multi: false, .. }, item @ Value::Object(_)) => {
                match serde_json::from_value::<SelectItem>(item.clone()) {
                    Ok(item) => {
                        self.value = FieldValue::Single(Some(item));
                        true
                    }
                    Err(_) => false,
                }
            }
            (FieldKind::Select { multi: true, .. }, items @ Value::Array(_)) => {
                match serde_json::from_value::<Vec<SelectItem>>(items.clone()) {
                    Ok(items) => {
                        self.value = FieldValue::Multi(items);
                        true
                    }
                    Err(_) => false,
                }
            }
            (FieldKind::Select { multi: true, .. }, Value::Null) => {
                self.value = FieldValue::Multi(Vec::new());
                true
            }
            (FieldKind::Date | FieldKind::Time, Value::String(stamp)) => {
                self.value = FieldValue::Stamp(StampValue::At(stamp.clone()));
                true
            }
            (FieldKind::Date | FieldKind::Time, Value::Null) => {
                self.value = FieldValue::Stamp(StampValue::Cleared);
                true
            }
            _ => false,
        };
        if !accepted {
            tracing::warn!(
                field = self.schema.name.as_str(),
                "rejected value of the wrong shape for this field"
            );
        }
        accepted
    }

    /// Submission representation. `None` means "leave the key out".
    pub fn submission_value(&self) -> Result<Option<Value>, FieldCoercionError> {
        match &self.value {
            FieldValue::Text(text) => match &self.schema.kind {
                FieldKind::Masked(mask) => masked_submission(text, mask, &self.schema),
                _ if text.is_empty() && !self.schema.required => Ok(None),
                _ => Ok(Some(Value::String(text.clone()))),
            },
            FieldValue::Bool(flag) => Ok(Some(Value::Bool(*flag))),
            FieldValue::Single(item) => Ok(item
                .as_ref()
                .and_then(|item| serde_json::to_value(item).ok())),
            FieldValue::Multi(items) => {
                if items.is_empty() && !self.schema.required {
                    Ok(None)
                } else {
                    Ok(serde_json::to_value(items).ok())
                }
            }
            FieldValue::Stamp(stamp) => match stamp {
                StampValue::Unset => Ok(None),
                StampValue::Cleared => Ok(Some(Value::Null)),
                StampValue::At(stamp) => Ok(Some(Value::String(stamp.clone()))),
            },
        }
    }
}

fn empty_value(kind: &FieldKind) -> FieldValue {
    match kind {
        FieldKind::Bool => FieldValue::Bool(false),
        FieldKind::Select { multi: true, .. } => FieldValue::Multi(Vec::new()),
        FieldKind::Select { multi: false, .. } => FieldValue::Single(None),
        FieldKind::Date | FieldKind::Time => FieldValue::Stamp(StampValue::Unset),
        _ => FieldValue::Text(String::new()),
    }
}

fn masked_submission(
    text: &str,
    mask: &str,
    schema: &FieldSchema,
) -> Result<Option<Value>, FieldCoercionError> {
    if text.is_empty() {
        if schema.required {
            return Err(FieldCoercionError::new(
                schema.name.as_str(),
                "value is required",
            ));
        }
        return Ok(None);
    }
    let slots = mask.chars().filter(|c| *c == '9').count();
    let digits = text.chars().filter(char::is_ascii_digit).count();
    if digits < slots {
        return Err(FieldCoercionError::new(
            schema.name.as_str(),
            format!("expected {slots} digits, got {digits}"),
        ));
    }
    Ok(Some(Value::String(text.to_string())))
}
