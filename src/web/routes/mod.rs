use crate::web::{AppState, doc::ApiDoc};
use axum::Router;
use serde::Deserialize;
use tower_cookies::CookieManagerLayer;
use tower_http::{cors::CorsLayer, services::ServeDir};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod modules;
pub mod resources;

pub const STATIC_PREFIX: &str = "/api/v1/static/";

#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct PaginationQuery {
    limit: Option<i64>,
    offset: Option<i64>,
}

impl PaginationQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }
}

pub fn build_app<S: Send + Sync + Clone + 'static>(state: AppState) -> Router<S> {
    let docs = state.docs();
    let mut router = Router::new()
        .nest("/api/v1/modules/", modules::routes(state.clone()))
        .nest("/api/v1/resources/", resources::routes(state.clone()))
        .nest_service(STATIC_PREFIX, ServeDir::new(state.uploads_dir()))
        .layer(CookieManagerLayer::default())
        .layer(CorsLayer::very_permissive())
        .with_state(state);

    if docs {
        let openapi = ApiDoc::openapi();

        router = router.merge(SwaggerUi::new("/api/v1/docs").url("/api-doc/openapi.json", openapi));
    }

    router
}
