//! Problem reporting and resolution endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::{AppJson, AppQuery};
use crate::{
    error::AppResult,
    models::{
        enums::EquipmentStatus,
        problem::{Problem, ProblemListing, ProblemQuery, ReportProblem},
    },
};

/// Problem report response
#[derive(Serialize, ToSchema)]
pub struct ReportProblemResponse {
    pub message: String,
    pub problema: Problem,
}

/// Problem resolution response
#[derive(Serialize, ToSchema)]
pub struct ResolveProblemResponse {
    pub message: String,
    pub problema: Problem,
    /// Equipment status after reconciliation
    pub equipo_estado: EquipmentStatus,
}

/// Report a problem on an equipment
#[utoipa::path(
    post,
    path = "/problemas/equipo/{id}",
    tag = "problemas",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = ReportProblem,
    responses(
        (status = 201, description = "Problem reported", body = ReportProblemResponse),
        (status = 400, description = "Missing description", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn report_problem(
    State(state): State<crate::AppState>,
    Path(equipo_id): Path<i32>,
    AppJson(data): AppJson<ReportProblem>,
) -> AppResult<(StatusCode, Json<ReportProblemResponse>)> {
    let problema = state.services.problems.report(equipo_id, &data).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReportProblemResponse {
            message: "Problema reportado correctamente".to_string(),
            problema,
        }),
    ))
}

/// List problems with their equipment and department
#[utoipa::path(
    get,
    path = "/problemas",
    tag = "problemas",
    params(ProblemQuery),
    responses(
        (status = 200, description = "Problem list", body = Vec<ProblemListing>)
    )
)]
pub async fn list_problems(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<ProblemQuery>,
) -> AppResult<Json<Vec<ProblemListing>>> {
    let problems = state.services.problems.list(&query).await?;
    Ok(Json(problems))
}

/// Mark a problem as resolved
#[utoipa::path(
    put,
    path = "/problemas/{id}/solucionar",
    tag = "problemas",
    params(("id" = i32, Path, description = "Problem ID")),
    responses(
        (status = 200, description = "Problem resolved", body = ResolveProblemResponse),
        (status = 404, description = "Problem not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn resolve_problem(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ResolveProblemResponse>> {
    let resolution = state.services.problems.resolve(id).await?;

    Ok(Json(ResolveProblemResponse {
        message: "Problema solucionado correctamente".to_string(),
        problema: resolution.problema,
        equipo_estado: resolution.equipo_estado,
    }))
}
