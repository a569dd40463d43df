use serde_json::Value;

use crate::domain::FieldPath;
use crate::form::{FormState, SetOptions};

/// Phone composite: a dialing-code field and a number field updated
/// together. The number field only ever holds digits; the code field is
/// `+`-prefixed whenever it is non-empty.
pub struct PhoneField {
    code_field: FieldPath,
    number_field: FieldPath,
}

impl PhoneField {
    pub fn new(code_field: FieldPath, number_field: FieldPath) -> Self {
        Self {
            code_field,
            number_field,
        }
    }

    /// Writes the picked dialing code, normalized to `+<digits>`. Only the
    /// code field changes; the typed number stays as it is.
    pub fn select_dial_code(&self, form: &mut FormState, dial_code: &str) {
        let digits: String = dial_code.chars().filter(char::is_ascii_digit).collect();
        let code = if digits.is_empty() {
            String::new()
        } else {
            format!("+{digits}")
        };
        form.set_value(&self.code_field, Value::String(code), SetOptions::default());
    }

    /// Writes the typed number with every non-digit character removed.
    pub fn input_number(&self, form: &mut FormState, raw: &str) {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        form.set_value(
            &self.number_field,
            Value::String(digits),
            SetOptions::default(),
        );
    }

    pub fn code_field(&self) -> &FieldPath {
        &self.code_field
    }

    pub fn number_field(&self) -> &FieldPath {
        &self.number_field
    }
}
