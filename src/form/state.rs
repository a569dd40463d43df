use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::domain::{FieldPath, FormSchema};

use super::{error::FieldCoercionError, errors::ErrorTree, field::FieldState};

/// Write behavior for [`FormState::set_value`].
#[derive(Debug, Clone, Copy)]
pub struct SetOptions {
    pub mark_dirty: bool,
    /// Optimistically drop any error at the path as part of the write,
    /// instead of waiting for the next validation pass.
    pub clear_error: bool,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            mark_dirty: true,
            clear_error: true,
        }
    }
}

impl SetOptions {
    pub fn keep_error() -> Self {
        Self {
            mark_dirty: true,
            clear_error: false,
        }
    }
}

/// Per-form container of field values, dirty flags, and validation errors.
/// Owned by the page that builds the form; widgets only reach it through
/// the binding operations.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    fields: IndexMap<String, FieldState>,
    errors: ErrorTree,
}

impl FormState {
    pub fn new(schema: &FormSchema) -> Self {
        let mut fields = IndexMap::new();
        for field in &schema.fields {
            fields.insert(
                field.name.as_str().to_string(),
                FieldState::from_schema(field.clone()),
            );
        }
        Self {
            fields,
            errors: ErrorTree::new(),
        }
    }

    pub fn field(&self, path: &FieldPath) -> Option<&FieldState> {
        self.fields.get(path.as_str())
    }

    pub fn field_mut(&mut self, path: &FieldPath) -> Option<&mut FieldState> {
        self.fields.get_mut(path.as_str())
    }

    /// Current value at `path`, or `Null` when the path is unknown. Never
    /// fails; unset fields yield their kind's empty default.
    pub fn value(&self, path: &FieldPath) -> Value {
        match self.fields.get(path.as_str()) {
            Some(field) => field.read(),
            None => {
                tracing::debug!(path = path.as_str(), "read of unregistered field");
                Value::Null
            }
        }
    }

    /// The only mutator. Unknown paths are a logged no-op.
    pub fn set_value(&mut self, path: &FieldPath, value: Value, options: SetOptions) {
        let Some(field) = self.fields.get_mut(path.as_str()) else {
            tracing::warn!(path = path.as_str(), "write to unregistered field");
            return;
        };
        if field.write(&value) && options.mark_dirty {
            field.dirty = true;
        }
        if options.clear_error {
            self.errors.remove(path);
        }
    }

    /// Minimal per-field handle for a primitive input: a stable id plus
    /// change/blur operations, without exposing the rest of the state.
    pub fn register(&mut self, path: FieldPath) -> FieldBinding<'_> {
        FieldBinding { form: self, path }
    }

    pub fn has_error(&self, path: &FieldPath) -> bool {
        self.errors.has_error(path)
    }

    /// Inline message for `path`. A non-empty override always wins over the
    /// message stored in the error tree; no error means `None`.
    pub fn error_message(&self, path: &FieldPath, override_text: Option<&str>) -> Option<String> {
        if !self.errors.has_error(path) {
            return None;
        }
        match override_text {
            Some(text) if !text.trim().is_empty() => Some(text.to_string()),
            _ => self.errors.message(path).map(str::to_string),
        }
    }

    pub fn set_error(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.errors.insert(path, message);
    }

    pub fn clear_error(&mut self, path: &FieldPath) {
        self.errors.remove(path);
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.leaf_count()
    }

    pub fn is_dirty(&self) -> bool {
        self.fields.values().any(|field| field.dirty)
    }

    /// Builds the nested plain object handed to the submit handler. Fields
    /// with nothing to say are left out entirely.
    pub fn submission_value(&self) -> Result<Value, FieldCoercionError> {
        let mut root = Value::Object(Map::new());
        for (name, field) in &self.fields {
            if let Some(value) = field.submission_value()? {
                let segments: Vec<&str> = name.split('.').collect();
                insert_path(&mut root, &segments, value);
            }
        }
        Ok(root)
    }

    /// Seeds field values from a previously submitted object, for edit
    /// forms. Unknown keys are ignored; seeding does not dirty fields.
    pub fn seed_from_value(&mut self, value: &Value) {
        for (name, field) in &mut self.fields {
            let segments: Vec<&str> = name.split('.').collect();
            if let Some(subvalue) = value_at_path(value, &segments) {
                field.write(subvalue);
                field.dirty = false;
            }
        }
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

pub struct FieldBinding<'a> {
    form: &'a mut FormState,
    path: FieldPath,
}

impl FieldBinding<'_> {
    /// Stable identifier for wiring labels to inputs.
    pub fn id(&self) -> &str {
        self.path.as_str()
    }

    pub fn value(&self) -> Value {
        self.form.value(&self.path)
    }

    pub fn change(&mut self, value: Value) {
        self.form.set_value(&self.path, value, SetOptions::default());
    }

    pub fn blur(&mut self) {
        if let Some(field) = self.form.field_mut(&self.path) {
            field.dirty = true;
        }
    }

    pub fn has_error(&self) -> bool {
        self.form.has_error(&self.path)
    }
}

fn insert_path(root: &mut Value, path: &[&str], value: Value) {
    if path.is_empty() {
        *root = value;
        return;
    }

    if !root.is_object() {
        *root = Value::Object(Map::new());
    }

    if let Value::Object(obj) = root {
        if path.len() == 1 {
            obj.insert(path[0].to_string(), value);
            return;
        }

        let entry = obj
            .entry(path[0].to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        insert_path(entry, &path[1..], value);
    }
}

fn value_at_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for segment in path {
        match current {
            Value::Object(map) => {
                current = map.get(*segment)?;
            }
            _ => return None,
        }
    }
    Some(current)
}
