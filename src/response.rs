use std::collections::BTreeMap;

use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Field name mapped to its ordered error messages. Messages may carry
/// markup; the client surfaces only the first one per field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Wire record answered by the login and signup endpoints. A populated
/// `redirect_url` tells the client where to navigate; `errors` carries
/// per-field validation messages. Both can be present at once, in which
/// case the client navigates first and still renders the errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormResponse {
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl FormResponse {
    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            redirect_url: Some(url.into()),
            errors: None,
        }
    }

    pub fn rejected(errors: FieldErrors) -> Self {
        Self {
            redirect_url: None,
            errors: Some(errors),
        }
    }
}

pub fn page(html: String) -> Response {
    Html(html).into_response()
}

pub fn form_response(response: FormResponse) -> Response {
    Json(response).into_response()
}

pub fn found(location: &str) -> Response {
    Redirect::to(location).into_response()
}

pub fn internal_server_error() -> Response {
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_serializes_like_the_original() {
        let mut errors = FieldErrors::new();
        errors.insert("email".to_owned(), vec!["bad".to_owned()]);
        let json = serde_json::to_value(FormResponse::rejected(errors)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"redirect_url": null, "errors": {"email": ["bad"]}})
        );
    }

    #[test]
    fn redirect_omits_the_errors_key() {
        let json = serde_json::to_value(FormResponse::redirect("/authenticate")).unwrap();
        assert_eq!(json, serde_json::json!({"redirect_url": "/authenticate"}));
    }

    #[test]
    fn missing_keys_deserialize_as_absent() {
        let response: FormResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response, FormResponse::default());
    }
}
