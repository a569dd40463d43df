use thiserror::Error;

/// A field whose current contents could not be turned into a submission
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct FieldCoercionError {
    pub path: String,
    pub message: String,
}

impl FieldCoercionError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
