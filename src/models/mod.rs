//! Domain models

pub mod category;
pub mod enums;
pub mod equipment;
pub mod package;

use validator::{Validate, ValidationErrors};

use crate::error::{Error, Result};

/// Run derive-based validation and fold failures into a single
/// `InvalidValue`, one `field: message` clause per violation.
pub(crate) fn validated(input: &impl Validate) -> Result<()> {
    input
        .validate()
        .map_err(|e| Error::InvalidValue(flatten_errors(&e)))
}

fn flatten_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, errs) in errors.field_errors() {
        for err in errs {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string());
            parts.push(format!("{}: {}", field, message));
        }
    }
    parts.sort();
    parts.join("; ")
}
