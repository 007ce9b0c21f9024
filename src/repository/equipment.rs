//! Equipment repository

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use super::map_constraint_error;
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentStatus,
        equipment::{Equipment, EquipmentInfo, EquipmentSummary},
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment with department info and an open-problem flag
    pub async fn list(&self) -> AppResult<Vec<EquipmentSummary>> {
        let rows = sqlx::query_as::<_, EquipmentSummary>(
            r#"
            SELECT
                e.id,
                e.estado,
                e.fecha_control,
                d.nombre AS departamento,
                d.ubicacion,
                EXISTS (
                    SELECT 1
                    FROM equipo_problemas ep
                    JOIN problemas p ON p.id = ep.problema_id
                    WHERE ep.equipo_id = e.id AND p.reparado = FALSE
                ) AS tiene_problema
            FROM equipo e
            JOIN departamentos d ON d.id = e.departamento_id
            ORDER BY e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List equipment that has at least one unresolved problem
    pub async fn list_with_open_problems(&self) -> AppResult<Vec<EquipmentSummary>> {
        let rows = sqlx::query_as::<_, EquipmentSummary>(
            r#"
            SELECT
                e.id,
                e.estado,
                e.fecha_control,
                d.nombre AS departamento,
                d.ubicacion,
                TRUE AS tiene_problema
            FROM equipo e
            JOIN departamentos d ON d.id = e.departamento_id
            WHERE EXISTS (
                SELECT 1
                FROM equipo_problemas ep
                JOIN problemas p ON p.id = ep.problema_id
                WHERE ep.equipo_id = e.id AND p.reparado = FALSE
            )
            ORDER BY e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipo WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipo no encontrado".to_string()))
    }

    /// Equipment header with owner and department names
    pub async fn get_info(&self, id: i32) -> AppResult<EquipmentInfo> {
        sqlx::query_as::<_, EquipmentInfo>(
            r#"
            SELECT
                e.id,
                e.estado,
                e.fecha_control,
                u.nombre AS usuario,
                d.nombre AS departamento,
                d.ubicacion
            FROM equipo e
            JOIN usuario u ON u.id = e.usuario_id
            JOIN departamentos d ON d.id = e.departamento_id
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Equipo no encontrado".to_string()))
    }

    pub async fn user_exists(&self, usuario_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM usuario WHERE id = $1)")
            .bind(usuario_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn department_exists(&self, departamento_id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM departamentos WHERE id = $1)")
                .bind(departamento_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create equipment in "Operativo" state
    pub async fn create(
        &self,
        usuario_id: i32,
        departamento_id: i32,
        fecha_control: Option<NaiveDate>,
    ) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipo (estado, fecha_control, usuario_id, departamento_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(EquipmentStatus::Operational)
        .bind(fecha_control)
        .bind(usuario_id)
        .bind(departamento_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, "Usuario o departamento no existe", "Equipo duplicado"))?;
        Ok(row)
    }

    /// Overwrite the status without looking at open problems
    pub async fn set_status(&self, id: i32, estado: EquipmentStatus) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("UPDATE equipo SET estado = $1 WHERE id = $2 RETURNING *")
            .bind(estado)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipo no encontrado".to_string()))
    }
}
