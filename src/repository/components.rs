//! Components repository

use sqlx::{Pool, Postgres};

use super::map_constraint_error;
use crate::{
    error::{AppError, AppResult},
    models::component::{Component, ComponentAssignment, EquipmentComponent},
};

#[derive(Clone)]
pub struct ComponentsRepository {
    pool: Pool<Postgres>,
}

impl ComponentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List the component catalog
    pub async fn list(&self) -> AppResult<Vec<Component>> {
        let rows = sqlx::query_as::<_, Component>(
            "SELECT id, nombre, tipo FROM componente ORDER BY nombre",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Components attached to an equipment
    pub async fn list_for_equipment(&self, equipo_id: i32) -> AppResult<Vec<EquipmentComponent>> {
        let rows = sqlx::query_as::<_, EquipmentComponent>(
            r#"
            SELECT ec.id, c.nombre, c.tipo, ec.descripcion, ec.cantidad
            FROM equipo_componente ec
            JOIN componente c ON c.id = ec.componente_id
            WHERE ec.equipo_id = $1
            ORDER BY c.nombre
            "#,
        )
        .bind(equipo_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Attach a component to an equipment.
    ///
    /// The (equipo_id, componente_id) pair is unique; a second assignment
    /// leaves the first untouched and fails with Conflict.
    pub async fn assign(
        &self,
        equipo_id: i32,
        componente_id: i32,
        descripcion: &str,
        cantidad: i32,
    ) -> AppResult<ComponentAssignment> {
        let row = sqlx::query_as::<_, ComponentAssignment>(
            r#"
            INSERT INTO equipo_componente (equipo_id, componente_id, descripcion, cantidad)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (equipo_id, componente_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(equipo_id)
        .bind(componente_id)
        .bind(descripcion)
        .bind(cantidad)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_error(e, "Equipo o componente no existe", ALREADY_ASSIGNED)
        })?;

        row.ok_or_else(|| AppError::Conflict(ALREADY_ASSIGNED.to_string()))
    }
}

const ALREADY_ASSIGNED: &str = "El componente ya está asignado a este equipo";
