//! Equipment API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::AppJson;
use crate::{
    error::AppResult,
    models::equipment::{
        CreateEquipment, Equipment, EquipmentDetail, EquipmentProblems, EquipmentSummary,
        UpdateEquipmentStatus,
    },
};

/// List all equipment with an open-problem flag
#[utoipa::path(
    get,
    path = "/equipos",
    tag = "equipos",
    responses(
        (status = 200, description = "Equipment list", body = Vec<EquipmentSummary>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<EquipmentSummary>>> {
    let equipment = state.services.equipment.list().await?;
    Ok(Json(equipment))
}

/// List equipment with unresolved problems
#[utoipa::path(
    get,
    path = "/equipos/con-problemas",
    tag = "equipos",
    responses(
        (status = 200, description = "Equipment with open problems", body = Vec<EquipmentSummary>)
    )
)]
pub async fn list_equipment_with_problems(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<EquipmentSummary>>> {
    let equipment = state.services.equipment.list_with_open_problems().await?;
    Ok(Json(equipment))
}

/// Equipment detail: header, components and problems
#[utoipa::path(
    get,
    path = "/equipos/{id}/detalle",
    tag = "equipos",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment detail", body = EquipmentDetail),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment_detail(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentDetail>> {
    let detail = state.services.equipment.detail(id).await?;
    Ok(Json(detail))
}

/// Problem history of an equipment
#[utoipa::path(
    get,
    path = "/equipos/{id}/problemas",
    tag = "equipos",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Problem history", body = EquipmentProblems),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment_problems(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentProblems>> {
    let problems = state.services.equipment.problems(id).await?;
    Ok(Json(problems))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipos",
    tag = "equipos",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Missing user or department", body = crate::error::ErrorResponse),
        (status = 404, description = "User or department not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AppJson(data): AppJson<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.equipment.create(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Override equipment status
#[utoipa::path(
    put,
    path = "/equipos/{id}/estado",
    tag = "equipos",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipmentStatus,
    responses(
        (status = 200, description = "Status updated", body = Equipment),
        (status = 400, description = "Invalid status", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_equipment_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    AppJson(data): AppJson<UpdateEquipmentStatus>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.set_status(id, &data).await?;
    Ok(Json(equipment))
}
