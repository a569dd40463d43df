use jsonschema::Validator;
use serde_json::Value;

use crate::domain::FieldPath;

use super::state::FormState;

#[derive(Debug)]
pub enum ValidationOutcome {
    /// The submission value, ready for the external submit handler.
    Valid(Value),
    Invalid {
        issues: usize,
        /// Errors whose instance path matched no registered field.
        global_errors: Vec<String>,
    },
    BuildError {
        message: String,
    },
}

/// Full-form validation pass: rebuilds the submission value, runs the
/// validator, and folds every instance path into the form's error tree.
pub fn validate_form(form: &mut FormState, validator: &Validator) -> ValidationOutcome {
    match form.submission_value() {
        Ok(value) => {
            form.clear_errors();
            if validator.is_valid(&value) {
                return ValidationOutcome::Valid(value);
            }
            let known: Vec<String> = form.paths().map(str::to_string).collect();
            let mut issues = 0usize;
            let mut global = Vec::new();
            for error in validator.iter_errors(&value) {
                issues += 1;
                let pointer = error.instance_path.to_string();
                let dotted = pointer.trim_start_matches('/').replace('/', ".");
                let message = error.to_string();
                match FieldPath::parse(&dotted) {
                    Ok(path) if known.iter().any(|name| *name == dotted) => {
                        form.set_error(&path, message);
                    }
                    _ => {
                        let prefix = if dotted.is_empty() {
                            "<root>".to_string()
                        } else {
                            dotted
                        };
                        global.push(format!("{prefix}: {message}"));
                    }
                }
            }
            ValidationOutcome::Invalid {
                issues,
                global_errors: global,
            }
        }
        Err(err) => {
            if let Ok(path) = FieldPath::parse(&err.path) {
                form.set_error(&path, err.message.clone());
            }
            ValidationOutcome::BuildError {
                message: err.message,
            }
        }
    }
}

/// Revalidates a single field after an edit; other fields' errors are left
/// alone.
pub fn validate_field(
    form: &mut FormState,
    validator: &Validator,
    path: &FieldPath,
) -> Result<(), String> {
    match form.submission_value() {
        Ok(value) => {
            form.clear_error(path);
            for error in validator.iter_errors(&value) {
                let pointer = error.instance_path.to_string();
                let dotted = pointer.trim_start_matches('/').replace('/', ".");
                if dotted == path.as_str() {
                    form.set_error(path, error.to_string());
                }
            }
            Ok(())
        }
        Err(err) => {
            if let Ok(err_path) = FieldPath::parse(&err.path) {
                form.set_error(&err_path, err.message.clone());
            }
            Err(err.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use jsonschema::validator_for;
    use serde_json::json;

    use crate::domain::{FieldKind, FieldSchema, FormSchema, TextTransform};
    use crate::form::SetOptions;

    use super::*;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    fn form() -> FormState {
        FormState::new(&FormSchema::new(vec![
            FieldSchema::new(path("name"), "Name", FieldKind::Text(TextTransform::None))
                .required(),
            FieldSchema::new(path("email"), "Email", FieldKind::Text(TextTransform::None)),
        ]))
    }

    fn validator() -> Validator {
        validator_for(&json!({
            "type": "object",
            "properties": {
                "name": {"type": "string", "minLength": 1},
                "email": {"type": "string", "format": "email", "minLength": 3}
            },
            "required": ["name"]
        }))
        .expect("valid schema")
    }

    #[test]
    fn empty_required_field_fails_validation() {
        let mut state = form();
        state.set_value(&path("name"), json!(""), SetOptions::default());
        let outcome = validate_form(&mut state, &validator());
        match outcome {
            ValidationOutcome::Invalid { issues, .. } => assert!(issues >= 1),
            other => panic!("expected invalid, got {other:?}"),
        }
        assert!(state.has_error(&path("name")));
    }

    #[test]
    fn errors_outside_the_form_accumulate_globally() {
        let mut state = form();
        state.set_value(&path("name"), json!("Amira"), SetOptions::default());
        let strict = validator_for(&json!({
            "type": "object",
            "required": ["name", "department"]
        }))
        .expect("valid schema");
        match validate_form(&mut state, &strict) {
            ValidationOutcome::Invalid { global_errors, .. } => {
                assert_eq!(global_errors.len(), 1);
                assert!(global_errors[0].starts_with("<root>"));
            }
            other => panic!("expected invalid, got {other:?}"),
        }
        assert_eq!(state.error_count(), 0);
    }

    #[test]
    fn field_error_lands_on_the_field() {
        let mut state = form();
        state.set_value(&path("name"), json!("Amira"), SetOptions::default());
        state.set_value(&path("email"), json!("x"), SetOptions::default());
        let outcome = validate_form(&mut state, &validator());
        assert!(matches!(outcome, ValidationOutcome::Invalid { .. }));
        assert!(state.has_error(&path("email")));
        assert!(!state.has_error(&path("name")));
    }

    #[test]
    fn valid_form_clears_errors_and_yields_value() {
        let mut state = form();
        state.set_error(&path("name"), "stale");
        state.set_value(&path("name"), json!("Amira"), SetOptions::keep_error());
        state.set_value(&path("email"), json!("a@b.co"), SetOptions::default());
        match validate_form(&mut state, &validator()) {
            ValidationOutcome::Valid(value) => assert_eq!(value["name"], json!("Amira")),
            other => panic!("expected valid, got {other:?}"),
        }
        assert_eq!(state.error_count(), 0);
    }

    #[test]
    fn single_field_revalidation_leaves_others_alone() {
        let mut state = form();
        state.set_value(&path("name"), json!("Amira"), SetOptions::default());
        state.set_value(&path("email"), json!("x"), SetOptions::default());
        state.set_error(&path("name"), "untouched");
        validate_field(&mut state, &validator(), &path("email")).unwrap();
        assert!(state.has_error(&path("email")));
        assert!(state.has_error(&path("name")));
    }
}
