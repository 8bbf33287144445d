//! The axum routes serving the control page:
//!
//! - `GET /`: the HTML page with the service name field and the start/stop buttons.
//! - `POST /toggle_service`: starts or stops a service, always answering `200 OK`
//!   with a JSON [`ServiceActionResult`](crate::ServiceActionResult).
mod index;
mod toggle_service;

use crate::ServiceToggle;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use axum_server::Handle;
use std::future::Future;
use std::io;
use std::net::TcpListener;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub(crate) struct AppState {
    toggle: ServiceToggle,
    default_service: Arc<str>,
    index_page: Arc<str>,
}

impl AppState {
    pub fn new(toggle: ServiceToggle, default_service: &str) -> Self {
        AppState {
            toggle,
            default_service: Arc::from(default_service),
            index_page: Arc::from(index::render_index(default_service)),
        }
    }
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/toggle_service", post(toggle_service::toggle_service))
        .with_state(state)
}

pub(crate) fn http_server(
    listener: TcpListener,
    state: AppState,
    handle: Handle,
) -> impl Future<Output = io::Result<()>> {
    axum_server::from_tcp(listener)
        .handle(handle)
        .serve(router(state).into_make_service())
}
