//! HTTP surface for sims.
//!
//! Routes:
//!
//! | Method   | Path             | Operation                  |
//! |----------|------------------|----------------------------|
//! | `GET`    | `/students`      | list every student         |
//! | `POST`   | `/students`      | create a student           |
//! | `DELETE` | `/students/:id`  | delete a student by id     |
//! | `GET`    | `/`              | client page                |
//! | `GET`    | `/script.js`     | client script              |

mod assets;
mod handlers;
mod middleware;
mod response;

use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get};
use axum::Router;

use crate::config::ServerConfig;
use crate::service::StudentService;

pub use response::{
    error_status, ERROR_BODY_INTERNAL, ERROR_BODY_INVALID_JSON, ERROR_BODY_STORAGE,
};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    service: StudentService,
    cors_enabled: bool,
    max_body_bytes: usize,
}

impl AppState {
    /// Create state from a service and the server section of the config.
    #[must_use]
    pub fn new(service: StudentService, server: &ServerConfig) -> Self {
        Self {
            service,
            cors_enabled: server.cors_enabled,
            max_body_bytes: server.max_body_bytes,
        }
    }

    /// The student service behind the routes.
    #[must_use]
    pub fn service(&self) -> &StudentService {
        &self.service
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(assets::index_handler))
        .route("/index.html", get(assets::index_handler))
        .route("/script.js", get(assets::script_handler))
        .route(
            "/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route("/students/:id", delete(handlers::delete_student))
        .layer(from_fn_with_state(state.clone(), middleware::cors_middleware))
        .layer(from_fn(middleware::request_logging_middleware))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}
