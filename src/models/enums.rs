//! Shared domain enums

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Operational status of an equipment unit, stored as text in `equipo.estado`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EquipmentStatus {
    #[default]
    #[serde(rename = "Operativo")]
    Operational,
    #[serde(rename = "Con Problemas")]
    HasProblems,
    #[serde(rename = "En Mantencion")]
    UnderMaintenance,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 3] = [
        EquipmentStatus::Operational,
        EquipmentStatus::HasProblems,
        EquipmentStatus::UnderMaintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Operational => "Operativo",
            EquipmentStatus::HasProblems => "Con Problemas",
            EquipmentStatus::UnderMaintenance => "En Mantencion",
        }
    }

    /// Derive the status that follows `event`, given the number of problems
    /// still open on the equipment once the event has been applied.
    ///
    /// A reported problem always moves the equipment to `HasProblems`.
    /// A resolution re-derives the status from the open count, except that
    /// `UnderMaintenance` is only ever left through a report or the
    /// administrative override.
    pub fn reconcile(self, event: StatusEvent, open_problems: i64) -> EquipmentStatus {
        match event {
            StatusEvent::ProblemReported => EquipmentStatus::HasProblems,
            StatusEvent::ProblemResolved => match self {
                EquipmentStatus::UnderMaintenance => EquipmentStatus::UnderMaintenance,
                _ if open_problems > 0 => EquipmentStatus::HasProblems,
                _ => EquipmentStatus::Operational,
            },
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid equipment status: {}", s))
    }
}

// SQLx conversion for EquipmentStatus
impl sqlx::Type<Postgres> for EquipmentStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for EquipmentStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for EquipmentStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

// ---------------------------------------------------------------------------
// StatusEvent
// ---------------------------------------------------------------------------

/// Mutation that triggers a status reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    ProblemReported,
    ProblemResolved,
}
