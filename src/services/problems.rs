//! Problem reporting and resolution service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::problem::{Problem, ProblemListing, ProblemQuery, ReportProblem, Resolution},
    repository::Repository,
};

#[derive(Clone)]
pub struct ProblemsService {
    repository: Repository,
}

impl ProblemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List problems; only unresolved ones when `activos` is true
    pub async fn list(&self, query: &ProblemQuery) -> AppResult<Vec<ProblemListing>> {
        self.repository.problems.list(query.only_open()).await
    }

    /// Report a problem; the equipment moves to "Con Problemas"
    pub async fn report(&self, equipo_id: i32, data: &ReportProblem) -> AppResult<Problem> {
        data.validate()?;
        let descripcion = data
            .descripcion
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::Validation("Descripción obligatoria".to_string()))?;

        self.repository.problems.report(equipo_id, descripcion).await
    }

    /// Resolve a problem; the equipment returns to "Operativo" once no open problems remain
    pub async fn resolve(&self, id: i32) -> AppResult<Resolution> {
        self.repository.problems.resolve(id).await
    }
}
