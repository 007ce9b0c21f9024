//! Equipment service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentStatus,
        equipment::{
            CreateEquipment, Equipment, EquipmentDetail, EquipmentProblems, EquipmentSummary,
            UpdateEquipmentStatus,
        },
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EquipmentSummary>> {
        self.repository.equipment.list().await
    }

    pub async fn list_with_open_problems(&self) -> AppResult<Vec<EquipmentSummary>> {
        self.repository.equipment.list_with_open_problems().await
    }

    /// Equipment header, attached components and problem history
    pub async fn detail(&self, id: i32) -> AppResult<EquipmentDetail> {
        let equipo = self.repository.equipment.get_info(id).await?;
        let componentes = self.repository.components.list_for_equipment(id).await?;
        let problemas = self.repository.problems.list_for_equipment(id).await?;

        Ok(EquipmentDetail {
            equipo,
            componentes,
            problemas,
        })
    }

    /// Problem history of one equipment
    pub async fn problems(&self, id: i32) -> AppResult<EquipmentProblems> {
        // Verify equipment exists
        self.repository.equipment.get_by_id(id).await?;
        let problemas = self.repository.problems.list_for_equipment(id).await?;

        Ok(EquipmentProblems {
            equipo_id: id,
            total: problemas.len(),
            problemas,
        })
    }

    /// Register new equipment for an existing user and department
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        let (Some(usuario_id), Some(departamento_id)) = (data.usuario_id, data.departamento_id)
        else {
            return Err(AppError::Validation(
                "usuario_id y departamento_id son obligatorios".to_string(),
            ));
        };

        if !self.repository.equipment.user_exists(usuario_id).await? {
            return Err(AppError::NotFound("Usuario no existe".to_string()));
        }
        if !self.repository.equipment.department_exists(departamento_id).await? {
            return Err(AppError::NotFound("Departamento no existe".to_string()));
        }

        let equipment = self
            .repository
            .equipment
            .create(usuario_id, departamento_id, data.fecha_control)
            .await?;

        tracing::info!("Equipment {} created", equipment.id);
        Ok(equipment)
    }

    /// Administrative status override.
    ///
    /// Not reconciled against open problems: forcing "Operativo" while
    /// problems are open is allowed.
    pub async fn set_status(&self, id: i32, data: &UpdateEquipmentStatus) -> AppResult<Equipment> {
        let estado: EquipmentStatus = data
            .estado
            .as_deref()
            .ok_or_else(|| AppError::Validation("Estado no válido".to_string()))?
            .parse()
            .map_err(|_| AppError::Validation("Estado no válido".to_string()))?;

        let equipment = self.repository.equipment.set_status(id, estado).await?;

        tracing::info!("Equipment {} status overridden to {}", id, estado);
        Ok(equipment)
    }
}
