use tracing::info;

use crate::error::Error;
use crate::options::{Command, Options};
use crate::widget::cookie::{AuthCookie, MemoryCookies};
use crate::widget::form::{collect, FormSubmitter, HttpTransport};
use crate::widget::Ui;

/// Terminal rendering of the widget's UI port: field errors print to
/// stderr, navigation is recorded so the flow can follow it.
#[derive(Debug, Default)]
struct ConsoleUi {
    location: Option<String>,
}

impl Ui for ConsoleUi {
    fn set_field_error(&mut self, field: &str, message: &str) {
        eprintln!("{}: {}", field, message);
    }

    fn show_modal(&mut self, id: &str) {
        eprintln!("[would open {}]", id);
    }

    fn hide_modal(&mut self, id: &str) {
        eprintln!("[would close {}]", id);
    }

    fn navigate(&mut self, url: &str) {
        self.location = Some(url.to_owned());
    }
}

/// Drives a running gate the way the page widget would: submit the form,
/// surface field errors, follow a granted redirect, and record the
/// authorization flag locally.
pub async fn run(options: &Options, command: &Command) -> Result<(), Error> {
    let client = reqwest::Client::new();
    let submitter = FormSubmitter::new(HttpTransport::new(client.clone()));
    let mut ui = ConsoleUi::default();

    let (endpoint, payload) = match command {
        Command::Login { email } => (
            endpoint_url(options, "/login"),
            collect([("email", email.as_str())]),
        ),
        Command::Signup {
            email,
            first_name,
            last_name,
            zip_code,
        } => (
            endpoint_url(options, "/signup"),
            collect([
                ("email", email.as_str()),
                ("first_name", first_name.as_str()),
                ("last_name", last_name.as_str()),
                ("zip_code", zip_code.as_str()),
            ]),
        ),
    };

    submitter.submit(&endpoint, &payload, &mut ui).await?;

    match ui.location.take() {
        Some(location) => {
            // A browser would land on /authenticate here; follow the grant
            // and flip the local cookie the way the authenticate page does.
            let target = absolute_url(options, &location);
            client.get(&target).send().await?.error_for_status()?;

            let auth = AuthCookie::new(
                options.cookie_name.as_str(),
                options.cookie_domain.as_str(),
            );
            let mut cookies = MemoryCookies::new();
            auth.set_authorization(&mut cookies);
            info!("authorized: {}", auth.get_authorization(&cookies));
        }
        None => info!("no redirect granted; check the field errors above or your inbox"),
    }
    Ok(())
}

fn endpoint_url(options: &Options, path: &str) -> String {
    format!("{}{}", options.gate_url.trim_end_matches('/'), path)
}

fn absolute_url(options: &Options, location: &str) -> String {
    if location.starts_with("http://") || location.starts_with("https://") {
        location.to_owned()
    } else {
        endpoint_url(options, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(gate_url: &str) -> Options {
        Options {
            address: String::from("127.0.0.1"),
            port: 8080,
            db: None,
            cookie_name: String::from("gate_authorized"),
            cookie_domain: String::from("localhost"),
            redirect_location: String::from("/"),
            roster_url: String::from("http://127.0.0.1:9000"),
            roster_token: String::new(),
            gate_url: gate_url.to_owned(),
            command: None,
        }
    }

    #[test]
    fn relative_locations_resolve_against_the_gate() {
        let options = options("http://gate.example.com/");
        assert_eq!(
            absolute_url(&options, "/authenticate"),
            "http://gate.example.com/authenticate"
        );
        assert_eq!(
            absolute_url(&options, "https://elsewhere.example.com/"),
            "https://elsewhere.example.com/"
        );
    }

    #[test]
    fn the_console_ui_tracks_the_last_navigation() {
        let mut ui = ConsoleUi::default();
        ui.navigate("/first");
        ui.navigate("/second");
        assert_eq!(ui.location.as_deref(), Some("/second"));
    }
}
