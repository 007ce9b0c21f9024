//! API handlers for Equipos REST endpoints

pub mod components;
pub mod equipment;
pub mod health;
pub mod openapi;
pub mod problems;

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// JSON body extractor whose rejections use the application error body
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::Validation(format!("Cuerpo de la petición no válido: {}", rejection.body_text()))
            })?;
        Ok(AppJson(value))
    }
}

/// Query string extractor whose rejections use the application error body
pub struct AppQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::Validation(format!("Parámetros no válidos: {}", rejection.body_text()))
            })?;
        Ok(AppQuery(value))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Equipment
        .route(
            "/equipos",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route("/equipos/con-problemas", get(equipment::list_equipment_with_problems))
        .route("/equipos/:id/detalle", get(equipment::get_equipment_detail))
        .route("/equipos/:id/problemas", get(equipment::get_equipment_problems))
        .route("/equipos/:id/estado", put(equipment::update_equipment_status))
        // Components
        .route("/componentes", get(components::list_components))
        .route(
            "/componentes/equipo/:equipo_id",
            get(components::list_equipment_components),
        )
        .route("/componentes/asignar", post(components::assign_component))
        // Problems
        .route("/problemas", get(problems::list_problems))
        .route("/problemas/equipo/:id", post(problems::report_problem))
        .route("/problemas/:id/solucionar", put(problems::resolve_problem))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
