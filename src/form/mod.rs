mod error;
mod errors;
mod field;
mod state;
mod validation;

pub use error::FieldCoercionError;
pub use errors::{ErrorNode, ErrorTree};
pub use field::{FieldState, FieldValue, StampValue};
pub use state::{FieldBinding, FormState, SetOptions};
pub use validation::{ValidationOutcome, validate_field, validate_form};
