pub use self::store::SqliteStore;

use r2d2_sqlite::SqliteConnectionManager;

pub mod models;
mod store;

pub type Pool = r2d2::Pool<SqliteConnectionManager>;
