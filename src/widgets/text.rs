use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::{FieldPath, TextTransform};
use crate::form::{FormState, SetOptions};

static WORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)(\w)").expect("static pattern"));

/// Plain text input. Raw input is passed through the configured transform
/// before it lands in the field.
pub struct TextInput {
    field: FieldPath,
    transform: TextTransform,
}

impl TextInput {
    pub fn new(field: FieldPath) -> Self {
        Self {
            field,
            transform: TextTransform::None,
        }
    }

    pub fn with_transform(mut self, transform: TextTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn input(&self, form: &mut FormState, raw: &str) {
        let text = apply_transform(raw, self.transform);
        form.set_value(&self.field, Value::String(text), SetOptions::default());
    }

    pub fn field(&self) -> &FieldPath {
        &self.field
    }
}

/// Digits-only input; every non-digit character is stripped before the
/// write.
pub struct NumberInput {
    field: FieldPath,
}

impl NumberInput {
    pub fn new(field: FieldPath) -> Self {
        Self { field }
    }

    pub fn input(&self, form: &mut FormState, raw: &str) {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        form.set_value(&self.field, Value::String(digits), SetOptions::default());
    }
}

/// Masked input: digits fill the mask's `9` slots, literal separators are
/// inserted automatically, overflow digits are dropped.
pub struct MaskedInput {
    field: FieldPath,
    mask: String,
}

impl MaskedInput {
    pub const DEFAULT_MASK: &'static str = "999-9999-9999999-9";

    pub fn new(field: FieldPath) -> Self {
        Self {
            field,
            mask: Self::DEFAULT_MASK.to_string(),
        }
    }

    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = mask.into();
        self
    }

    pub fn input(&self, form: &mut FormState, raw: &str) {
        let formatted = apply_mask(raw, &self.mask);
        form.set_value(&self.field, Value::String(formatted), SetOptions::default());
    }

    /// Current value padded out to the full mask, `X` marking unfilled
    /// digit slots.
    pub fn display(&self, form: &FormState) -> String {
        let current = match form.value(&self.field) {
            Value::String(text) => text,
            _ => String::new(),
        };
        let mut digits = current.chars().filter(|c| c.is_ascii_digit());
        self.mask
            .chars()
            .map(|slot| {
                if slot == '9' {
                    digits.next().unwrap_or('X')
                } else {
                    slot
                }
            })
            .collect()
    }
}

fn apply_transform(raw: &str, transform: TextTransform) -> String {
    match transform {
        TextTransform::None => raw.to_string(),
        TextTransform::Uppercase => raw.to_uppercase(),
        TextTransform::Lowercase => raw.to_lowercase(),
        TextTransform::Capitalize => {
            let lowered = raw.to_lowercase();
            WORD_START
                .replace_all(&lowered, |caps: &regex::Captures<'_>| {
                    format!("{}{}", &caps[1], caps[2].to_uppercase())
                })
                .into_owned()
        }
    }
}

fn apply_mask(raw: &str, mask: &str) -> String {
    let mut digits = raw.chars().filter(|c| c.is_ascii_digit()).peekable();
    let mut out = String::new();
    for slot in mask.chars() {
        if slot == '9' {
            match digits.next() {
                Some(digit) => out.push(digit),
                None => break,
            }
        } else {
            if digits.peek().is_none() {
                break;
            }
            out.push(slot);
        }
    }
    out
}
