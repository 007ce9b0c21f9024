//! Status reconciliation: reporting and resolving problems against the
//! repository and service layer.

mod common;

use assert_matches::assert_matches;
use sqlx::PgPool;

use equipos_server::{
    models::{equipment::UpdateEquipmentStatus, problem::ReportProblem, EquipmentStatus},
    AppError,
};

fn report(descripcion: &str) -> ReportProblem {
    ReportProblem {
        descripcion: Some(descripcion.to_string()),
    }
}

// ---------------------------------------------------------------------------
// ReportProblem
// ---------------------------------------------------------------------------

#[sqlx::test(fixtures("base"))]
async fn report_moves_equipment_to_has_problems(pool: PgPool) {
    let services = common::services(pool.clone());
    let equipo_id = common::insert_equipment(&pool).await;

    let problem = services
        .problems
        .report(equipo_id, &report("pantalla rota"))
        .await
        .unwrap();

    assert!(!problem.reparado);
    assert!(problem.fecha_solucion.is_none());
    assert_eq!(problem.descripcion, "pantalla rota");
    assert_eq!(
        common::equipment_status(&pool, equipo_id).await,
        EquipmentStatus::HasProblems
    );
    assert_eq!(common::count_rows(&pool, "equipo_problemas").await, 1);
}

#[sqlx::test(fixtures("base"))]
async fn report_overrides_maintenance(pool: PgPool) {
    let services = common::services(pool.clone());
    let equipo_id = common::insert_equipment(&pool).await;
    services
        .equipment
        .set_status(
            equipo_id,
            &UpdateEquipmentStatus {
                estado: Some("En Mantencion".to_string()),
            },
        )
        .await
        .unwrap();

    services
        .problems
        .report(equipo_id, &report("no enciende"))
        .await
        .unwrap();

    assert_eq!(
        common::equipment_status(&pool, equipo_id).await,
        EquipmentStatus::HasProblems
    );
}

#[sqlx::test(fixtures("base"))]
async fn report_on_missing_equipment_writes_nothing(pool: PgPool) {
    let services = common::services(pool.clone());

    let result = services.problems.report(999, &report("teclado")).await;

    assert_matches!(result, Err(AppError::NotFound(_)));
    assert_eq!(common::count_rows(&pool, "problemas").await, 0);
    assert_eq!(common::count_rows(&pool, "equipo_problemas").await, 0);
}

#[sqlx::test(fixtures("base"))]
async fn report_rejects_blank_description(pool: PgPool) {
    let services = common::services(pool.clone());
    let equipo_id = common::insert_equipment(&pool).await;

    for data in [
        ReportProblem { descripcion: None },
        report(""),
        report("   "),
    ] {
        let result = services.problems.report(equipo_id, &data).await;
        assert_matches!(result, Err(AppError::Validation(_)));
    }

    assert_eq!(common::count_rows(&pool, "problemas").await, 0);
    assert_eq!(
        common::equipment_status(&pool, equipo_id).await,
        EquipmentStatus::Operational
    );
}

// ---------------------------------------------------------------------------
// ResolveProblem
// ---------------------------------------------------------------------------

#[sqlx::test(fixtures("base"))]
async fn resolving_only_problem_restores_operational(pool: PgPool) {
    let services = common::services(pool.clone());
    let equipo_id = common::insert_equipment(&pool).await;
    let problem = services
        .problems
        .report(equipo_id, &report("pantalla rota"))
        .await
        .unwrap();

    let resolution = services.problems.resolve(problem.id).await.unwrap();

    assert!(resolution.problema.reparado);
    assert!(resolution.problema.fecha_solucion.is_some());
    assert_eq!(resolution.equipo_estado, EquipmentStatus::Operational);
    assert_eq!(
        common::equipment_status(&pool, equipo_id).await,
        EquipmentStatus::Operational
    );
}

#[sqlx::test(fixtures("base"))]
async fn status_stays_until_last_problem_resolved(pool: PgPool) {
    let services = common::services(pool.clone());
    let equipo_id = common::insert_equipment(&pool).await;
    let p1 = services.problems.report(equipo_id, &report("ventilador")).await.unwrap();
    let p2 = services.problems.report(equipo_id, &report("bateria")).await.unwrap();

    let first = services.problems.resolve(p1.id).await.unwrap();
    assert_eq!(first.equipo_estado, EquipmentStatus::HasProblems);
    assert_eq!(
        common::equipment_status(&pool, equipo_id).await,
        EquipmentStatus::HasProblems
    );

    let second = services.problems.resolve(p2.id).await.unwrap();
    assert_eq!(second.equipo_estado, EquipmentStatus::Operational);
    assert_eq!(
        common::equipment_status(&pool, equipo_id).await,
        EquipmentStatus::Operational
    );
}

#[sqlx::test(fixtures("base"))]
async fn problems_of_other_equipment_do_not_count(pool: PgPool) {
    let services = common::services(pool.clone());
    let first = common::insert_equipment(&pool).await;
    let second = common::insert_equipment(&pool).await;
    let p1 = services.problems.report(first, &report("pantalla")).await.unwrap();
    services.problems.report(second, &report("mouse")).await.unwrap();

    let resolution = services.problems.resolve(p1.id).await.unwrap();

    assert_eq!(resolution.equipo_estado, EquipmentStatus::Operational);
    assert_eq!(
        common::equipment_status(&pool, second).await,
        EquipmentStatus::HasProblems
    );
}

#[sqlx::test(fixtures("base"))]
async fn resolving_twice_is_a_no_op(pool: PgPool) {
    let services = common::services(pool.clone());
    let equipo_id = common::insert_equipment(&pool).await;
    let problem = services.problems.report(equipo_id, &report("cable")).await.unwrap();
    let first = services.problems.resolve(problem.id).await.unwrap();

    // A new problem arrives; resolving the old one again must not touch it
    services.problems.report(equipo_id, &report("monitor")).await.unwrap();
    let second = services.problems.resolve(problem.id).await.unwrap();

    assert_eq!(second.problema.id, first.problema.id);
    assert_eq!(second.problema.fecha_solucion, first.problema.fecha_solucion);
    assert!(second.problema.reparado);
    assert_eq!(second.equipo_estado, EquipmentStatus::HasProblems);
    assert_eq!(
        common::equipment_status(&pool, equipo_id).await,
        EquipmentStatus::HasProblems
    );
}

#[sqlx::test(fixtures("base"))]
async fn resolve_missing_problem_is_not_found(pool: PgPool) {
    let services = common::services(pool);

    let result = services.problems.resolve(12345).await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[sqlx::test(fixtures("base"))]
async fn resolve_leaves_maintenance_untouched(pool: PgPool) {
    let services = common::services(pool.clone());
    let equipo_id = common::insert_equipment(&pool).await;
    let problem = services.problems.report(equipo_id, &report("fuente")).await.unwrap();
    services
        .equipment
        .set_status(
            equipo_id,
            &UpdateEquipmentStatus {
                estado: Some("En Mantencion".to_string()),
            },
        )
        .await
        .unwrap();

    let resolution = services.problems.resolve(problem.id).await.unwrap();

    assert_eq!(resolution.equipo_estado, EquipmentStatus::UnderMaintenance);
    assert_eq!(
        common::equipment_status(&pool, equipo_id).await,
        EquipmentStatus::UnderMaintenance
    );
}

// ---------------------------------------------------------------------------
// Administrative override
// ---------------------------------------------------------------------------

#[sqlx::test(fixtures("base"))]
async fn override_ignores_open_problems(pool: PgPool) {
    let services = common::services(pool.clone());
    let equipo_id = common::insert_equipment(&pool).await;
    services.problems.report(equipo_id, &report("disco")).await.unwrap();

    let equipment = services
        .equipment
        .set_status(
            equipo_id,
            &UpdateEquipmentStatus {
                estado: Some("Operativo".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(equipment.estado, EquipmentStatus::Operational);
    assert_eq!(common::count_rows(&pool, "problemas").await, 1);
}

#[sqlx::test(fixtures("base"))]
async fn override_rejects_unknown_status(pool: PgPool) {
    let services = common::services(pool.clone());
    let equipo_id = common::insert_equipment(&pool).await;

    for estado in [None, Some("Invalido"), Some("operativo"), Some("")] {
        let result = services
            .equipment
            .set_status(
                equipo_id,
                &UpdateEquipmentStatus {
                    estado: estado.map(str::to_string),
                },
            )
            .await;
        assert_matches!(result, Err(AppError::Validation(_)));
    }

    assert_eq!(
        common::equipment_status(&pool, equipo_id).await,
        EquipmentStatus::Operational
    );
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(fixtures("base"))]
async fn concurrent_resolutions_converge_to_operational(pool: PgPool) {
    let services = common::services(pool.clone());
    let equipo_id = common::insert_equipment(&pool).await;

    let mut problem_ids = Vec::new();
    for i in 0..6 {
        let problem = services
            .problems
            .report(equipo_id, &report(&format!("falla {}", i)))
            .await
            .unwrap();
        problem_ids.push(problem.id);
    }

    let handles: Vec<_> = problem_ids
        .into_iter()
        .map(|id| {
            let services = services.clone();
            tokio::spawn(async move { services.problems.resolve(id).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let open: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM problemas WHERE reparado = FALSE")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(open, 0);
    assert_eq!(
        common::equipment_status(&pool, equipo_id).await,
        EquipmentStatus::Operational
    );
}

#[sqlx::test(fixtures("base"))]
async fn concurrent_report_and_resolve_keep_new_problem_visible(pool: PgPool) {
    let services = common::services(pool.clone());
    let equipo_id = common::insert_equipment(&pool).await;
    let old = services.problems.report(equipo_id, &report("viejo")).await.unwrap();

    let resolver = {
        let services = services.clone();
        tokio::spawn(async move { services.problems.resolve(old.id).await })
    };
    let reporter = {
        let services = services.clone();
        tokio::spawn(async move { services.problems.report(equipo_id, &report("nuevo")).await })
    };

    resolver.await.unwrap().unwrap();
    reporter.await.unwrap().unwrap();

    // Whatever the commit order, one problem is still open
    assert_eq!(
        common::equipment_status(&pool, equipo_id).await,
        EquipmentStatus::HasProblems
    );
}
