//! Serves the item catalog.

use item_store::{
    infra::{config, database, logging, state::AppState},
    server,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let _guard = logging::init_logging(&config.logging);

    let db = database::init_db(&config.database)?;
    database::migrate(&db).await?;

    let listener = TcpListener::bind((
        config.server.http_address.as_str(),
        config.server.http_port,
    ))
    .await?;
    server::run_app(listener, AppState::new(db, config)).await?;

    Ok(())
}
