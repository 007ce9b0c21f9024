//! Component endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::AppJson;
use crate::{
    error::AppResult,
    models::component::{AssignComponent, Component, ComponentAssignment, EquipmentComponent},
};

/// Component assignment response
#[derive(Serialize, ToSchema)]
pub struct AssignComponentResponse {
    pub message: String,
    pub componente: ComponentAssignment,
}

/// List the component catalog
#[utoipa::path(
    get,
    path = "/componentes",
    tag = "componentes",
    responses(
        (status = 200, description = "Component list", body = Vec<Component>)
    )
)]
pub async fn list_components(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Component>>> {
    let components = state.services.components.list().await?;
    Ok(Json(components))
}

/// List components attached to an equipment
#[utoipa::path(
    get,
    path = "/componentes/equipo/{equipo_id}",
    tag = "componentes",
    params(("equipo_id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Attached components", body = Vec<EquipmentComponent>)
    )
)]
pub async fn list_equipment_components(
    State(state): State<crate::AppState>,
    Path(equipo_id): Path<i32>,
) -> AppResult<Json<Vec<EquipmentComponent>>> {
    let components = state.services.components.list_for_equipment(equipo_id).await?;
    Ok(Json(components))
}

/// Assign a component to an equipment
#[utoipa::path(
    post,
    path = "/componentes/asignar",
    tag = "componentes",
    request_body = AssignComponent,
    responses(
        (status = 201, description = "Component assigned", body = AssignComponentResponse),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment or component not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Component already assigned", body = crate::error::ErrorResponse)
    )
)]
pub async fn assign_component(
    State(state): State<crate::AppState>,
    AppJson(data): AppJson<AssignComponent>,
) -> AppResult<(StatusCode, Json<AssignComponentResponse>)> {
    let componente = state.services.components.assign(&data).await?;

    Ok((
        StatusCode::CREATED,
        Json(AssignComponentResponse {
            message: "Componente asignado correctamente".to_string(),
            componente,
        }),
    ))
}
