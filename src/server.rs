//! The HTTP server.
//!
//! # Examples
//!
//! Create an item, then read it back.
//!
//! ```rust
//! # use item_store::feature::item::item_model::{Item, ItemCreate};
//! # tokio_test::block_on(async {
//! # let url = item_store::server::spawn_app().await;
//! let client = reqwest::Client::new();
//! let new_item = ItemCreate { name: "Foo".to_string(), price: 1.5, description: None };
//! let response = client.post(format!("{url}/items")).json(&new_item).send().await.unwrap();
//! assert_eq!(200, response.status());
//! let item = response.json::<Item>().await.unwrap();
//!
//! let response = client.get(format!("{url}/items/{}", item.id)).send().await.unwrap();
//! assert_eq!(item, response.json::<Item>().await.unwrap());
//! # });
//! ```

use crate::infra::{
    database::{self, DbPool},
    error::{InternalError, PanicHandler},
    middleware::{log_request_response, MakeRequestIdSpan},
    openapi::{openapi_json, ApiDoc},
    shutdown::shutdown_signal,
    state::AppState,
};
use axum::{error_handling::HandleErrorLayer, response::IntoResponse, routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};

/// Constructs the REST API.
pub fn api(state: AppState) -> Router {
    Router::new()
        .merge(crate::feature::item::item_api::routes())
        .route("/openapi.json", get(openapi_json))
        .with_state(state)
}

/// Constructs the full axum application.
pub fn app(state: AppState) -> Router {
    let server = &state.config().server;

    // Fallible middleware from tower, mapped to infallible response with [`HandleErrorLayer`].
    let tower_middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e| async move {
            InternalError::Other(format!("Tower middleware failed: {e}")).into_response()
        }))
        .concurrency_limit(server.concurrency_limit);
    let timeout = server.request_timeout;

    Router::new()
        .merge(Redoc::with_url("/api/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api/openapi.json").path("/api/rapidoc"))
        .nest("/api", api(state))
        // Layers
        .layer(TimeoutLayer::new(timeout))
        .layer(axum::middleware::from_fn(log_request_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(MakeRequestIdSpan)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(()),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(tower_middleware)
        .layer(CatchPanicLayer::custom(PanicHandler))
}

/// Serves the application until a shutdown signal arrives.
pub async fn run_app(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let app = app(state).into_make_service();

    tracing::info!("Starting axum on {:?}", listener.local_addr());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Successfully shut down");
    Ok(())
}

/// Spawn a server on a random port, backed by a fresh in-memory database.
///
/// Returns the base url of the API.
pub async fn spawn_app() -> String {
    let db = database::init_memory_db()
        .await
        .expect("failed to create in-memory database");
    spawn_app_with_db(db).await
}

/// Spawn a server on a random port with a custom database.
pub async fn spawn_app_with_db(db: DbPool) -> String {
    let address = "127.0.0.1";
    let listener = TcpListener::bind(format!("{address}:0"))
        .await
        .expect("failed to bind to a random port");
    let port = listener
        .local_addr()
        .expect("listener has no local address")
        .port();
    let config = crate::infra::config::load_config().expect("failed to load config");
    tokio::spawn(run_app(listener, AppState::new(db, config)));
    format!("http://{address}:{port}/api")
}

/// Builds the application state for tests.
#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    let db = database::init_memory_db().await.unwrap();
    let config = crate::infra::config::load_config().unwrap();
    AppState::new(db, config)
}
