use std::convert::TryFrom;

use rusqlite::{Error, Row};

/// A signup waiting for its email-verification link to be followed.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingUser {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub zip_code: String,
    pub token: String,
}

pub struct NewPendingUser<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub zip_code: &'a str,
    pub token: &'a str,
}

impl TryFrom<&Row<'_>> for PendingUser {
    type Error = Error;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        let r = Self {
            id: row.get(0)?,
            email: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            zip_code: row.get(4)?,
            token: row.get(5)?,
        };
        Ok(r)
    }
}
