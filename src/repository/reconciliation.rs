//! Equipment status reconciliation
//!
//! Every write that changes the set of open problems of an equipment goes
//! through these two steps, inside the caller's transaction:
//!
//! 1. [`lock_equipment`] takes a row lock on the equipment rows, always in id
//!    order so that concurrent reporters and resolvers queue up instead of
//!    deadlocking.
//! 2. [`reconcile`] counts the open problems in a *new* statement and stores
//!    the status derived by [`EquipmentStatus::reconcile`].
//!
//! Under READ COMMITTED each statement takes a fresh snapshot, so a count
//! issued after the lock was granted sees every resolution committed by the
//! previous lock holder. Counting inside the locking statement would not.

use sqlx::PgConnection;

use crate::{
    error::AppResult,
    models::enums::{EquipmentStatus, StatusEvent},
};

/// Lock the given equipment rows and return their current status, ordered by id.
/// Missing ids are simply absent from the result.
pub(super) async fn lock_equipment(
    conn: &mut PgConnection,
    ids: &[i32],
) -> AppResult<Vec<(i32, EquipmentStatus)>> {
    let rows = sqlx::query_as::<_, (i32, EquipmentStatus)>(
        "SELECT id, estado FROM equipo WHERE id = ANY($1) ORDER BY id FOR UPDATE",
    )
    .bind(ids)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}

/// Recompute and persist the status of a locked equipment after `event`.
pub(super) async fn reconcile(
    conn: &mut PgConnection,
    equipo_id: i32,
    current: EquipmentStatus,
    event: StatusEvent,
) -> AppResult<EquipmentStatus> {
    let open_problems: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM equipo_problemas ep
        JOIN problemas p ON p.id = ep.problema_id
        WHERE ep.equipo_id = $1 AND p.reparado = FALSE
        "#,
    )
    .bind(equipo_id)
    .fetch_one(&mut *conn)
    .await?;

    let next = current.reconcile(event, open_problems);

    if next != current {
        sqlx::query("UPDATE equipo SET estado = $1 WHERE id = $2")
            .bind(next)
            .bind(equipo_id)
            .execute(&mut *conn)
            .await?;
        tracing::info!(
            "Equipment {} status {} -> {} ({:?}, {} open problems)",
            equipo_id,
            current,
            next,
            event,
            open_problems
        );
    } else {
        tracing::debug!("Equipment {} status unchanged ({})", equipo_id, current);
    }

    Ok(next)
}
