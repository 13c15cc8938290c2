use std::collections::BTreeMap;

use async_trait::async_trait;
use mockall::automock;

use super::Ui;
use crate::error::Error;
use crate::response::{FieldErrors, FormResponse};

/// Field name/value pairs collected from a form at submission time.
pub type Payload = BTreeMap<String, String>;

/// Folds the current values of a form's named controls into a payload.
/// Control order does not matter; a later control with the same name wins,
/// as it would when serializing a form.
pub fn collect<I, K, V>(controls: I) -> Payload
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    controls
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}

/// Transport behind the asynchronous form POST.
#[automock]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_form(&self, url: &str, payload: &Payload) -> Result<FormResponse, Error>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, url: &str, payload: &Payload) -> Result<FormResponse, Error> {
        let response = self
            .client
            .post(url)
            .form(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

/// The server's verdict on a submitted form, interpreted from the wire
/// record into an explicit shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Redirect { url: String },
    Rejected { errors: FieldErrors },
    RedirectWithErrors { url: String, errors: FieldErrors },
}

impl From<FormResponse> for Outcome {
    fn from(response: FormResponse) -> Self {
        let errors = response.errors.unwrap_or_default();
        // An empty redirect_url counts as absent, like the original markup
        // treated it.
        match response.redirect_url.filter(|url| !url.is_empty()) {
            Some(url) if errors.is_empty() => Outcome::Redirect { url },
            Some(url) => Outcome::RedirectWithErrors { url, errors },
            None => Outcome::Rejected { errors },
        }
    }
}

impl Outcome {
    /// Applies the verdict to the UI. Navigation runs before error
    /// rendering; a response carrying both triggers both, in that order.
    pub fn apply(&self, ui: &mut dyn Ui) {
        if let Outcome::Redirect { url } | Outcome::RedirectWithErrors { url, .. } = self {
            ui.navigate(url);
        }
        if let Outcome::Rejected { errors } | Outcome::RedirectWithErrors { errors, .. } = self {
            for (field, messages) in errors {
                // Only the first message per field is surfaced.
                if let Some(message) = messages.first() {
                    ui.set_field_error(field, message);
                }
            }
        }
    }
}

pub struct FormSubmitter<T> {
    transport: T,
}

impl<T: Transport> FormSubmitter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// POSTs `payload` to `url` and applies the server's verdict to the UI.
    /// One request per call, no retry; dropping the returned future cancels
    /// the in-flight request. Concurrent submits are not coordinated, so the
    /// last response to arrive wins the UI.
    pub async fn submit(
        &self,
        url: &str,
        payload: &Payload,
        ui: &mut dyn Ui,
    ) -> Result<Outcome, Error> {
        let outcome = Outcome::from(self.transport.post_form(url, payload).await?);
        outcome.apply(ui);
        Ok(outcome)
    }
}
