use std::convert::TryFrom;

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension};

use super::models::{NewPendingUser, PendingUser};
use crate::error::Error;

type Conn = PooledConnection<SqliteConnectionManager>;

pub struct SqliteStore(Conn);

impl SqliteStore {
    pub fn new(connection: Conn) -> Self {
        Self(connection)
    }

    pub fn initialize_database(&self) -> Result<(), Error> {
        self.0
            .execute_batch(include_str!("../../db/pending_users.sql"))?;
        Ok(())
    }

    pub fn create_pending_user(&self, user: &NewPendingUser) -> Result<i64, Error> {
        self.0.execute(
            "INSERT INTO pending_users (email, first_name, last_name, zip_code, token)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.email,
                user.first_name,
                user.last_name,
                user.zip_code,
                user.token
            ],
        )?;
        Ok(self.0.last_insert_rowid())
    }

    pub fn find_pending_user(&self, id: i64) -> Result<Option<PendingUser>, Error> {
        let user = self
            .0
            .query_row(
                "SELECT id, email, first_name, last_name, zip_code, token
                 FROM pending_users WHERE id = ?1",
                params![id],
                |row| PendingUser::try_from(row),
            )
            .optional()?;
        Ok(user)
    }

    pub fn find_pending_user_by_email(&self, email: &str) -> Result<Option<PendingUser>, Error> {
        let user = self
            .0
            .query_row(
                "SELECT id, email, first_name, last_name, zip_code, token
                 FROM pending_users WHERE email = ?1
                 ORDER BY created_at LIMIT 1",
                params![email],
                |row| PendingUser::try_from(row),
            )
            .optional()?;
        Ok(user)
    }

    /// Consumes a pending signup once its token has been redeemed.
    pub fn delete_pending_user(&self, id: i64) -> Result<(), Error> {
        self.0
            .execute("DELETE FROM pending_users WHERE id = ?1", params![id])?;
        Ok(())
    }
}
