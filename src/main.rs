use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use r2d2_sqlite::SqliteConnectionManager;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::db::{Pool, SqliteStore};
use crate::error::Error;
use crate::membership::{HttpRoster, Roster};
use crate::options::Options;

mod authentication;
mod client;
mod db;
mod error;
mod forms;
mod handlers;
mod membership;
mod options;
mod page;
mod response;
mod token;
mod widget;

#[derive(Clone)]
pub struct AppState {
    pub options: Arc<Options>,
    pub pool: Option<Pool>,
    pub roster: Arc<dyn Roster>,
}

async fn run() -> Result<(), Error> {
    let options = Options::parse()?;

    if let Some(command) = &options.command {
        return client::run(&options, command).await;
    }

    let addr = SocketAddr::new(
        options
            .address
            .parse::<IpAddr>()
            .map_err(|e| Error::from_addr_parse(e, options.address.clone()))?,
        options.port,
    );

    let pool = match &options.db {
        Some(path) => {
            let pool = Pool::new(SqliteConnectionManager::file(path))?;
            SqliteStore::new(pool.get()?).initialize_database()?;
            Some(pool)
        }
        None => None,
    };

    let roster: Arc<dyn Roster> = Arc::new(HttpRoster::new(
        reqwest::Client::new(),
        options.roster_url.clone(),
        options.roster_token.clone(),
    ));

    let state = AppState {
        options: Arc::new(options),
        pool,
        roster,
    };

    let app = Router::new()
        .route("/", get(handlers::gate))
        .route("/login", post(handlers::login))
        .route("/signup", post(handlers::signup))
        .route("/verify/:id/:token", get(handlers::verify))
        .route("/authenticate", get(handlers::authenticate))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Listening on http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        error!("{}", e);
    }
}
