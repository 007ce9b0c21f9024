//! Components service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::component::{AssignComponent, Component, ComponentAssignment, EquipmentComponent},
    repository::Repository,
};

#[derive(Clone)]
pub struct ComponentsService {
    repository: Repository,
}

impl ComponentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Component>> {
        self.repository.components.list().await
    }

    pub async fn list_for_equipment(&self, equipo_id: i32) -> AppResult<Vec<EquipmentComponent>> {
        self.repository.components.list_for_equipment(equipo_id).await
    }

    /// Attach a component to an equipment (quantity defaults to 1 when absent or zero)
    pub async fn assign(&self, data: &AssignComponent) -> AppResult<ComponentAssignment> {
        data.validate()?;
        let descripcion = data.descripcion.as_deref().map(str::trim).unwrap_or_default();
        let (Some(equipo_id), Some(componente_id)) = (data.equipo_id, data.componente_id) else {
            return Err(AppError::Validation(
                "equipo_id, componente_id y descripcion son obligatorios".to_string(),
            ));
        };
        if descripcion.is_empty() {
            return Err(AppError::Validation(
                "equipo_id, componente_id y descripcion son obligatorios".to_string(),
            ));
        }

        let cantidad = match data.cantidad {
            None | Some(0) => 1,
            Some(n) => n,
        };

        let assignment = self
            .repository
            .components
            .assign(equipo_id, componente_id, descripcion, cantidad)
            .await?;

        tracing::info!(
            "Component {} assigned to equipment {} (x{})",
            componente_id,
            equipo_id,
            assignment.cantidad
        );
        Ok(assignment)
    }
}
