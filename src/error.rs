use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::net::AddrParseError;

use axum::response::{IntoResponse, Response};

use crate::response;

#[derive(Debug)]
pub enum Error {
    Io {
        cause: io::Error,
    },
    AddrParse {
        cause: AddrParseError,
        addr: String,
    },
    Args {
        cause: pico_args::Error,
    },
    Pool {
        cause: r2d2::Error,
    },
    Sqlite {
        cause: rusqlite::Error,
    },
    Http {
        cause: reqwest::Error,
    },
    Server {
        cause: hyper::Error,
    },
}

impl Error {
    pub fn from_addr_parse(cause: AddrParseError, addr: String) -> Self {
        Error::AddrParse { cause, addr }
    }
}

impl From<io::Error> for Error {
    fn from(cause: io::Error) -> Self {
        Error::Io { cause }
    }
}

impl From<pico_args::Error> for Error {
    fn from(cause: pico_args::Error) -> Self {
        Error::Args { cause }
    }
}

impl From<r2d2::Error> for Error {
    fn from(cause: r2d2::Error) -> Self {
        Error::Pool { cause }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(cause: rusqlite::Error) -> Self {
        Error::Sqlite { cause }
    }
}

impl From<reqwest::Error> for Error {
    fn from(cause: reqwest::Error) -> Self {
        Error::Http { cause }
    }
}

impl From<hyper::Error> for Error {
    fn from(cause: hyper::Error) -> Self {
        Error::Server { cause }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Error::Io { cause } => cause.fmt(f),
            Error::AddrParse { cause, addr } => write!(f, "{} for address {}", cause, addr),
            Error::Args { cause } => cause.fmt(f),
            Error::Pool { cause } => cause.fmt(f),
            Error::Sqlite { cause } => cause.fmt(f),
            Error::Http { cause } => cause.fmt(f),
            Error::Server { cause } => cause.fmt(f),
        }
    }
}

impl error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        response::internal_server_error()
    }
}
