mod path;
mod schema;

pub use path::{FieldPath, FieldPathError};
pub use schema::{
    FieldKind, FieldSchema, FormSchema, PENDING_OPTION_VALUE, SelectItem, TextTransform,
};
