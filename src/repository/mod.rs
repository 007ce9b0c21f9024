//! Repository layer for database operations

pub mod components;
pub mod equipment;
pub mod problems;
mod reconciliation;

use sqlx::{Pool, Postgres};

use crate::error::{AppError, AppResult};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub components: components::ComponentsRepository,
    pub problems: problems::ProblemsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            components: components::ComponentsRepository::new(pool.clone()),
            problems: problems::ProblemsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Map foreign key and unique violations to NotFound / Conflict, anything else stays a database error
pub(crate) fn map_constraint_error(err: sqlx::Error, not_found: &str, conflict: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_foreign_key_violation() {
            return AppError::NotFound(not_found.to_string());
        }
        if db_err.is_unique_violation() {
            return AppError::Conflict(conflict.to_string());
        }
    }
    AppError::Database(err)
}
