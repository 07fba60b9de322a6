pub use crate::common::RouteResult;

use axum::{routing::on, Router};
use locations::{client::Client, database::Database};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    config::WebConfig,
};

pub mod api;
pub mod common;
pub mod config;
pub mod middleware;

#[derive(Clone)]
pub struct WebState<D: Database> {
    pub location_client: Client<D>,
}

impl<D: Database> WebState<D> {
    pub fn new(database: D) -> Self {
        Self {
            location_client: Client::new(database),
        }
    }
}

/// The complete application router, including cors, tracing and panic
/// recovery.
pub fn app<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
        .layer(CatchPanicLayer::custom(middleware::recovery::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::cors_layer())
}

pub async fn start_web_server<D: Database>(
    state: WebState<D>,
    config: &WebConfig,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.socket_addr()).await?;
    log::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(why) = tokio::signal::ctrl_c().await {
        log::error!("could not listen for shutdown signal: {}", why);
        std::future::pending::<()>().await;
    }
}
