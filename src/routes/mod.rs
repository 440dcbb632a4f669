use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::mailer::Mailer;
use crate::template::{self, NotFoundTemplate};

mod assets;
pub mod contact;
mod health;
mod help;
mod index;
mod privacy;
mod terms;

pub use assets::AssetsService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mailer: Arc<dyn Mailer>,
}

async fn fallback() -> Response {
    let page = template::render(NotFoundTemplate);
    (StatusCode::NOT_FOUND, page).into_response()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index::page))
        .route("/help", get(help::page))
        .route("/privacy", get(privacy::page))
        .route("/terms", get(terms::page))
        .route(
            "/api/contact",
            post(contact::submit).fallback(contact::method_not_allowed),
        )
        .fallback(fallback)
        .nest_service("/static", AssetsService::new())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
