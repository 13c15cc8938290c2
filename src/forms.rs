use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::response::FieldErrors;

/// `address` is a honeypot: the markup hides it, so anything filling it in
/// is not a person and the form is rejected.
fn validate_honeypot(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Ok(())
    } else {
        let mut error = ValidationError::new("hidden_field");
        error.message = Some("Invalid value for hidden field".into());
        Err(error)
    }
}

/// The form endpoints answer field errors, not extractor rejections, so
/// every field defaults when absent and validation does the complaining.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[serde(default)]
    #[validate(custom = "validate_honeypot")]
    pub address: String,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupForm {
    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub zip_code: String,
    #[serde(default)]
    #[validate(custom = "validate_honeypot")]
    pub address: String,
    pub next: Option<String>,
}

/// Flattens validation failures into the per-field message lists the form
/// response carries.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .map(|(field, failures)| {
            let messages = failures
                .iter()
                .map(|failure| match &failure.message {
                    Some(message) => message.clone().into_owned(),
                    None => failure.code.to_string(),
                })
                .collect();
            ((*field).to_owned(), messages)
        })
        .collect()
}
