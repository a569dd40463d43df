use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::path::FieldPath;

/// One option in any dropdown-style widget. `value` is the canonical
/// identifier and must be unique within an options list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectItem {
    pub value: String,
    pub label: String,
}

impl SelectItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Sentinel `value` for options created client-side and not yet persisted.
/// The backend resolves these to real identifiers on submission.
pub const PENDING_OPTION_VALUE: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextTransform {
    #[default]
    None,
    Capitalize,
    Uppercase,
    Lowercase,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text(TextTransform),
    Multiline,
    /// Opaque rich-text payload; the editor itself is an external widget
    /// satisfying a plain value/on-change contract.
    RichText,
    /// Digits-only input.
    Number,
    /// Mask pattern where `9` is a digit slot and other characters are
    /// literal separators.
    Masked(String),
    Bool,
    File,
    Select {
        options: Vec<SelectItem>,
        multi: bool,
        creatable: bool,
    },
    Date,
    Time,
}

impl FieldKind {
    pub fn single_select(options: Vec<SelectItem>) -> Self {
        FieldKind::Select {
            options,
            multi: false,
            creatable: false,
        }
    }

    pub fn multi_select(options: Vec<SelectItem>) -> Self {
        FieldKind::Select {
            options,
            multi: true,
            creatable: false,
        }
    }

    pub fn creatable_select(options: Vec<SelectItem>) -> Self {
        FieldKind::Select {
            options,
            multi: true,
            creatable: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: FieldPath,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
}

impl FieldSchema {
    pub fn new(name: FieldPath, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name,
            label: label.into(),
            kind,
            required: false,
            default: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Ordered field declarations for one form. Field names must be unique.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    pub fields: Vec<FieldSchema>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name.as_str() == name)
    }
}
