//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{components, equipment, health, problems};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equipos API",
        version = "1.0.0",
        description = "Equipment maintenance tracking REST API"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::list_equipment_with_problems,
        equipment::get_equipment_detail,
        equipment::get_equipment_problems,
        equipment::create_equipment,
        equipment::update_equipment_status,
        // Components
        components::list_components,
        components::list_equipment_components,
        components::assign_component,
        // Problems
        problems::report_problem,
        problems::list_problems,
        problems::resolve_problem,
    ),
    components(
        schemas(
            // Equipment
            crate::models::enums::EquipmentStatus,
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentSummary,
            crate::models::equipment::EquipmentInfo,
            crate::models::equipment::EquipmentDetail,
            crate::models::equipment::EquipmentProblems,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipmentStatus,
            // Components
            crate::models::component::Component,
            crate::models::component::EquipmentComponent,
            crate::models::component::ComponentAssignment,
            crate::models::component::AssignComponent,
            components::AssignComponentResponse,
            // Problems
            crate::models::problem::Problem,
            crate::models::problem::ProblemListing,
            crate::models::problem::ReportProblem,
            problems::ReportProblemResponse,
            problems::ResolveProblemResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipos", description = "Equipment registry and status"),
        (name = "componentes", description = "Component catalog and assignments"),
        (name = "problemas", description = "Problem reporting and resolution")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
