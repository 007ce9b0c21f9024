//! Component model and equipment assignments

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Component catalog entry (`componente` row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Component {
    pub id: i32,
    pub nombre: String,
    pub tipo: Option<String>,
}

/// Component attached to an equipment, joined with its catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentComponent {
    /// Assignment ID
    pub id: i32,
    pub nombre: String,
    pub tipo: Option<String>,
    pub descripcion: String,
    pub cantidad: i32,
}

/// Raw assignment (`equipo_componente` row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ComponentAssignment {
    pub id: i32,
    pub equipo_id: i32,
    pub componente_id: i32,
    pub descripcion: String,
    pub cantidad: i32,
}

/// Assign component request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignComponent {
    #[validate(required(message = "equipo_id, componente_id y descripcion son obligatorios"))]
    pub equipo_id: Option<i32>,
    #[validate(required(message = "equipo_id, componente_id y descripcion son obligatorios"))]
    pub componente_id: Option<i32>,
    #[validate(
        required(message = "equipo_id, componente_id y descripcion son obligatorios"),
        length(min = 1, message = "equipo_id, componente_id y descripcion son obligatorios")
    )]
    pub descripcion: Option<String>,
    /// Defaults to 1 when absent or zero
    #[validate(range(min = 0, message = "cantidad no puede ser negativa"))]
    pub cantidad: Option<i32>,
}
