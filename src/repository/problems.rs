//! Problems repository: reporting, resolution and listings

use sqlx::{Pool, Postgres};

use super::reconciliation::{lock_equipment, reconcile};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::StatusEvent,
        problem::{Problem, ProblemListing, Resolution},
    },
};

#[derive(Clone)]
pub struct ProblemsRepository {
    pool: Pool<Postgres>,
}

impl ProblemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get problem by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Problem> {
        sqlx::query_as::<_, Problem>("SELECT * FROM problemas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Problema no encontrado".to_string()))
    }

    /// List problems joined with their equipment and department, newest first
    pub async fn list(&self, only_open: bool) -> AppResult<Vec<ProblemListing>> {
        let rows = sqlx::query_as::<_, ProblemListing>(
            r#"
            SELECT
                p.id,
                p.descripcion,
                p.fecha_informado,
                p.fecha_solucion,
                p.reparado,
                e.id AS equipo_id,
                e.estado AS equipo_estado,
                d.nombre AS departamento
            FROM problemas p
            JOIN equipo_problemas ep ON ep.problema_id = p.id
            JOIN equipo e ON e.id = ep.equipo_id
            JOIN departamentos d ON d.id = e.departamento_id
            WHERE ($1 = FALSE OR p.reparado = FALSE)
            ORDER BY p.fecha_informado DESC, p.id DESC
            "#,
        )
        .bind(only_open)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Problem history of one equipment, newest first
    pub async fn list_for_equipment(&self, equipo_id: i32) -> AppResult<Vec<Problem>> {
        let rows = sqlx::query_as::<_, Problem>(
            r#"
            SELECT p.id, p.descripcion, p.fecha_informado, p.fecha_solucion, p.reparado
            FROM problemas p
            JOIN equipo_problemas ep ON ep.problema_id = p.id
            WHERE ep.equipo_id = $1
            ORDER BY p.fecha_informado DESC, p.id DESC
            "#,
        )
        .bind(equipo_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Report a problem on an equipment.
    ///
    /// Inserts the problem, links it and moves the equipment to
    /// "Con Problemas" in a single transaction.
    pub async fn report(&self, equipo_id: i32, descripcion: &str) -> AppResult<Problem> {
        let mut tx = self.pool.begin().await?;

        let current = lock_equipment(&mut *tx, &[equipo_id])
            .await?
            .into_iter()
            .next()
            .map(|(_, estado)| estado)
            .ok_or_else(|| AppError::NotFound("Equipo no existe".to_string()))?;

        let problem = sqlx::query_as::<_, Problem>(
            r#"
            INSERT INTO problemas (descripcion, fecha_informado, reparado)
            VALUES ($1, CURRENT_DATE, FALSE)
            RETURNING *
            "#,
        )
        .bind(descripcion)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO equipo_problemas (equipo_id, problema_id) VALUES ($1, $2)")
            .bind(equipo_id)
            .bind(problem.id)
            .execute(&mut *tx)
            .await?;

        reconcile(&mut *tx, equipo_id, current, StatusEvent::ProblemReported).await?;

        tx.commit().await?;

        tracing::info!("Problem {} reported on equipment {}", problem.id, equipo_id);
        Ok(problem)
    }

    /// Mark a problem as resolved and reconcile the status of its equipment.
    ///
    /// Resolving an already resolved problem changes nothing and returns the
    /// stored record with the current equipment status.
    pub async fn resolve(&self, id: i32) -> AppResult<Resolution> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Problem>("SELECT * FROM problemas WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Problema no encontrado".to_string()))?;

        let equipo_ids: Vec<i32> = sqlx::query_scalar(
            "SELECT equipo_id FROM equipo_problemas WHERE problema_id = $1 ORDER BY equipo_id",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let locked = lock_equipment(&mut *tx, &equipo_ids).await?;
        let Some(&(_, first_status)) = locked.first() else {
            return Err(AppError::Internal(format!(
                "Problem {} is not linked to any equipment",
                id
            )));
        };

        // Conditional on reparado so a concurrent resolution of the same problem wins once
        let resolved = sqlx::query_as::<_, Problem>(
            r#"
            UPDATE problemas
            SET reparado = TRUE,
                fecha_solucion = CURRENT_DATE
            WHERE id = $1 AND reparado = FALSE
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(problema) = resolved else {
            tx.commit().await?;
            tracing::debug!("Problem {} already resolved, nothing to do", id);
            let problema = if existing.reparado {
                existing
            } else {
                self.get_by_id(id).await?
            };
            return Ok(Resolution {
                problema,
                equipo_estado: first_status,
            });
        };

        let mut equipo_estado = first_status;
        for (index, (equipo_id, current)) in locked.into_iter().enumerate() {
            let next = reconcile(&mut *tx, equipo_id, current, StatusEvent::ProblemResolved).await?;
            if index == 0 {
                equipo_estado = next;
            }
        }

        tx.commit().await?;

        tracing::info!("Problem {} resolved, equipment status {}", id, equipo_estado);
        Ok(Resolution {
            problema,
            equipo_estado,
        })
    }
}
