//! Problem model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::EquipmentStatus;

/// Reported problem (`problemas` row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Problem {
    pub id: i32,
    pub descripcion: String,
    pub fecha_informado: NaiveDate,
    /// Set once, when the problem is resolved
    pub fecha_solucion: Option<NaiveDate>,
    pub reparado: bool,
}

/// Problem list entry joined with its equipment and department
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProblemListing {
    pub id: i32,
    pub descripcion: String,
    pub fecha_informado: NaiveDate,
    pub fecha_solucion: Option<NaiveDate>,
    pub reparado: bool,
    pub equipo_id: i32,
    pub equipo_estado: EquipmentStatus,
    /// Department name
    pub departamento: String,
}

/// Problem list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProblemQuery {
    /// Only unresolved problems when exactly `true`; any other value lists all
    pub activos: Option<String>,
}

impl ProblemQuery {
    pub fn only_open(&self) -> bool {
        self.activos.as_deref() == Some("true")
    }
}

/// Report problem request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReportProblem {
    #[validate(
        required(message = "Descripción obligatoria"),
        length(min = 1, message = "Descripción obligatoria")
    )]
    pub descripcion: Option<String>,
}

/// Outcome of a resolution: the stored problem and the equipment status after reconciliation
#[derive(Debug, Clone)]
pub struct Resolution {
    pub problema: Problem,
    pub equipo_estado: EquipmentStatus,
}
