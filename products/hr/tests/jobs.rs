mod common;

use products_hr::department;
use products_hr::job::{self, JobPatch, NewJob};
use products_hr::{HrError, Page};

fn new_job(name: &str, code: Option<&str>, department_id: i32) -> NewJob {
    NewJob {
        name: name.into(),
        code: code.map(Into::into),
        department_id,
    }
}

#[tokio::test]
async fn engineering_scenario() {
    let db = common::setup().await;
    let engineering = common::department(&db, "Engineering").await;
    assert_eq!(engineering.id, 1);

    let backend = job::create(&db, new_job("Backend Dev", Some("BKND"), 1))
        .await
        .unwrap();
    assert_eq!(backend.id, 1);
    assert_eq!(job::get(&db, 1).await.unwrap(), backend);

    let err = job::create(&db, new_job("Frontend Dev", Some("BKND"), 1))
        .await
        .unwrap_err();
    match err {
        HrError::Conflict(message) => assert_eq!(message, "job code is already in use"),
        other => panic!("expected conflict, got {other:?}"),
    }

    assert!(matches!(
        department::delete(&db, 1).await,
        Err(HrError::Conflict(_))
    ));
    assert_eq!(job::list(&db, Page::default()).await.unwrap(), vec![backend]);
}

#[tokio::test]
async fn codes_longer_than_four_characters_are_invalid() {
    let db = common::setup().await;
    let engineering = common::department(&db, "Engineering").await;
    let err = job::create(&db, new_job("Backend Dev", Some("BACKEND"), engineering.id))
        .await
        .unwrap_err();
    assert!(matches!(err, HrError::Validation(_)));
    assert!(job::list(&db, Page::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn jobs_without_code_do_not_collide() {
    let db = common::setup().await;
    let engineering = common::department(&db, "Engineering").await;
    common::job(&db, "Backend Dev", None, engineering.id).await;
    common::job(&db, "Frontend Dev", None, engineering.id).await;
    assert_eq!(job::list(&db, Page::default()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_job_names_conflict() {
    let db = common::setup().await;
    let engineering = common::department(&db, "Engineering").await;
    common::job(&db, "Backend Dev", Some("BKND"), engineering.id).await;
    let err = job::create(&db, new_job("Backend Dev", Some("BK2"), engineering.id))
        .await
        .unwrap_err();
    match err {
        HrError::Conflict(message) => assert_eq!(message, "job name is already in use"),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_department_conflicts() {
    let db = common::setup().await;
    let err = job::create(&db, new_job("Backend Dev", Some("BKND"), 404))
        .await
        .unwrap_err();
    match err {
        HrError::Conflict(message) => {
            assert_eq!(message, "job references a record that does not exist")
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let db = common::setup().await;
    let engineering = common::department(&db, "Engineering").await;
    let sales = common::department(&db, "Sales").await;
    let created = common::job(&db, "Backend Dev", Some("BKND"), engineering.id).await;

    let moved = job::update(
        &db,
        created.id,
        JobPatch {
            department_id: Some(sales.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(moved.name, "Backend Dev");
    assert_eq!(moved.code.as_deref(), Some("BKND"));
    assert_eq!(moved.department_id, sales.id);

    let uncoded = job::update(&db, created.id, serde_json::from_str(r#"{"code": null}"#).unwrap())
        .await
        .unwrap();
    assert_eq!(uncoded.code, None);
    assert_eq!(uncoded.department_id, sales.id);
    assert_eq!(job::get(&db, created.id).await.unwrap(), uncoded);
}

#[tokio::test]
async fn update_rejected_by_constraints_leaves_row_unchanged() {
    let db = common::setup().await;
    let engineering = common::department(&db, "Engineering").await;
    common::job(&db, "Backend Dev", Some("BKND"), engineering.id).await;
    let frontend = common::job(&db, "Frontend Dev", Some("FRND"), engineering.id).await;

    let dup = job::update(
        &db,
        frontend.id,
        JobPatch {
            code: Some(Some("BKND".into())),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(dup, HrError::Conflict(_)));

    let dangling = job::update(
        &db,
        frontend.id,
        JobPatch {
            department_id: Some(77),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(dangling, HrError::Conflict(_)));

    let too_long = job::update(
        &db,
        frontend.id,
        JobPatch {
            code: Some(Some("FRONT".into())),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(too_long, HrError::Validation(_)));

    assert_eq!(job::get(&db, frontend.id).await.unwrap(), frontend);
}

#[tokio::test]
async fn department_of_job_is_an_explicit_fetch() {
    let db = common::setup().await;
    let engineering = common::department(&db, "Engineering").await;
    let backend = common::job(&db, "Backend Dev", None, engineering.id).await;
    assert_eq!(job::department(&db, backend.id).await.unwrap(), engineering);
    assert!(matches!(
        job::department(&db, 500).await,
        Err(HrError::NotFound { entity: "job", .. })
    ));
}

#[tokio::test]
async fn deleting_missing_job_is_not_found() {
    let db = common::setup().await;
    assert!(matches!(job::delete(&db, 3).await, Err(HrError::NotFound { .. })));
}

#[test]
fn patches_reject_null_for_required_fields() {
    for body in [r#"{"name": null}"#, r#"{"department_id": null}"#] {
        assert!(serde_json::from_str::<JobPatch>(body).is_err(), "{body}");
    }
    let cleared: JobPatch = serde_json::from_str(r#"{"code": null}"#).unwrap();
    assert_eq!(cleared.code, Some(None));
    assert!(cleared.name.is_none());
}
