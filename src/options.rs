use pico_args::{Arguments, Error};

#[derive(Debug, Clone)]
pub enum Command {
    /// Drive the login form of a running gate from the terminal.
    Login { email: String },
    /// Drive the signup form of a running gate from the terminal.
    Signup {
        email: String,
        first_name: String,
        last_name: String,
        zip_code: String,
    },
}

#[derive(Debug)]
pub struct Options {
    pub address: String,
    pub port: u16,
    pub db: Option<String>,
    pub cookie_name: String,
    pub cookie_domain: String,
    pub redirect_location: String,
    pub roster_url: String,
    pub roster_token: String,
    pub gate_url: String,
    pub command: Option<Command>,
}

impl Options {
    pub fn parse() -> Result<Self, Error> {
        let mut args = Arguments::from_env();
        let command = match args.subcommand()?.as_deref() {
            Some("login") => Some(Command::Login {
                email: args.value_from_str("--email")?,
            }),
            Some("signup") => Some(Command::Signup {
                email: args.value_from_str("--email")?,
                first_name: args.value_from_str("--first-name")?,
                last_name: args.value_from_str("--last-name")?,
                zip_code: args.value_from_str("--zip-code")?,
            }),
            Some(other) => {
                return Err(Error::ArgumentParsingFailed {
                    cause: format!("unknown subcommand {}", other),
                })
            }
            None => None,
        };
        Ok(Options {
            address: args
                .opt_value_from_str("--listen")?
                .unwrap_or_else(|| String::from("127.0.0.1")),
            port: args.opt_value_from_str("--port")?.unwrap_or(8080),
            db: args.opt_value_from_str("--db")?,
            cookie_name: args
                .opt_value_from_str("--cookie-name")?
                .unwrap_or_else(|| String::from("gate_authorized")),
            cookie_domain: args
                .opt_value_from_str("--cookie-domain")?
                .unwrap_or_else(|| String::from("localhost")),
            redirect_location: args
                .opt_value_from_str("--redirect-location")?
                .unwrap_or_else(|| String::from("/")),
            roster_url: args
                .opt_value_from_str("--roster-url")?
                .unwrap_or_else(|| String::from("http://127.0.0.1:9000")),
            roster_token: args.opt_value_from_str("--roster-token")?.unwrap_or_default(),
            gate_url: args
                .opt_value_from_str("--gate-url")?
                .unwrap_or_else(|| String::from("http://127.0.0.1:8080")),
            command,
        })
    }
}
