mod common;

use anyhow::Result;
use common::PgTestContext;
use products_hr::{
    HrError,
    department::{self, NewDepartment},
    employee::{self, NewEmployee},
    job::{self, NewJob},
    user::{self, NewUser},
};

#[tokio::test]
async fn concurrent_duplicate_logins_yield_one_conflict() -> Result<()> {
    let Some(ctx) = PgTestContext::new().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return Ok(());
    };

    let attempt = |db: platform_db::DbPool| async move {
        user::create(
            &db,
            NewUser {
                login: "racer".into(),
                password: "correct horse".into(),
                employee_id: None,
            },
        )
        .await
    };
    let (first, second) = tokio::join!(
        tokio::spawn(attempt(ctx.db.clone())),
        tokio::spawn(attempt(ctx.db.clone()))
    );
    let outcomes = [first?, second?];

    let created = outcomes.iter().filter(|r| r.is_ok()).count();
    let conflicts = outcomes
        .iter()
        .filter(|r| matches!(r, Err(HrError::Conflict(_))))
        .count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, 1);

    ctx.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn postgres_enforces_referential_actions() -> Result<()> {
    let Some(ctx) = PgTestContext::new().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return Ok(());
    };
    let db = &ctx.db;

    let leader = employee::create(
        db,
        NewEmployee {
            name: "Grace Hopper".into(),
            email: Some("grace@example.test".into()),
        },
    )
    .await?;
    let engineering = department::create(
        db,
        NewDepartment {
            name: "Engineering".into(),
            leader_id: Some(leader.id),
        },
    )
    .await?;
    job::create(
        db,
        NewJob {
            name: "Backend Dev".into(),
            code: Some("BKND".into()),
            department_id: engineering.id,
        },
    )
    .await?;

    let duplicate = job::create(
        db,
        NewJob {
            name: "Frontend Dev".into(),
            code: Some("BKND".into()),
            department_id: engineering.id,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(HrError::Conflict(_))));

    let orphan = job::create(
        db,
        NewJob {
            name: "Ghost".into(),
            code: None,
            department_id: engineering.id + 100,
        },
    )
    .await;
    assert!(matches!(orphan, Err(HrError::Conflict(_))));

    let restricted = department::delete(db, engineering.id).await;
    assert!(matches!(restricted, Err(HrError::Conflict(_))));

    employee::delete(db, leader.id).await?;
    let engineering = department::get(db, engineering.id).await?;
    assert_eq!(engineering.leader_id, None);

    ctx.cleanup().await;
    Ok(())
}
