//! Equipment model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{component::EquipmentComponent, enums::EquipmentStatus, problem::Problem};

/// Equipment record (`equipo` row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub estado: EquipmentStatus,
    /// Date of the last control
    pub fecha_control: Option<NaiveDate>,
    pub usuario_id: i32,
    pub departamento_id: i32,
}

/// Equipment list entry with department info and open-problem flag
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentSummary {
    pub id: i32,
    pub estado: EquipmentStatus,
    pub fecha_control: Option<NaiveDate>,
    /// Department name
    pub departamento: String,
    pub ubicacion: Option<String>,
    /// Whether at least one linked problem is still unresolved
    pub tiene_problema: bool,
}

/// Equipment header in the detail view
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentInfo {
    pub id: i32,
    pub estado: EquipmentStatus,
    pub fecha_control: Option<NaiveDate>,
    /// Owning user name
    pub usuario: String,
    /// Department name
    pub departamento: String,
    pub ubicacion: Option<String>,
}

/// Full equipment detail: header, components and problem history
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentDetail {
    pub equipo: EquipmentInfo,
    pub componentes: Vec<EquipmentComponent>,
    pub problemas: Vec<Problem>,
}

/// Problem history of one equipment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentProblems {
    pub equipo_id: i32,
    pub total: usize,
    pub problemas: Vec<Problem>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(required(message = "usuario_id y departamento_id son obligatorios"))]
    pub usuario_id: Option<i32>,
    #[validate(required(message = "usuario_id y departamento_id son obligatorios"))]
    pub departamento_id: Option<i32>,
    pub fecha_control: Option<NaiveDate>,
}

/// Administrative status override request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEquipmentStatus {
    /// One of "Operativo", "Con Problemas", "En Mantencion"
    pub estado: Option<String>,
}
