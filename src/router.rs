use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_app, metrics_middleware};
use crate::middleware::guard::require_page_access;
use crate::modules::pages::router::init_pages_router;
use crate::modules::session::router::{init_access_router, init_session_router};
use crate::state::AppState;

pub fn init_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let mut router = Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/session", init_session_router())
                .nest("/access", init_access_router()),
        )
        .nest(
            "/pages",
            init_pages_router().layer(middleware::from_fn_with_state(
                state.clone(),
                require_page_access,
            )),
        )
        .with_state(state.clone());

    if let Some(handle) = metrics_handle {
        router = router.merge(metrics_app(handle));
    }

    router
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
