mod common;

use products_hr::user::{self, NewUser, UserPatch};
use products_hr::{HrError, Page};

fn new_user(login: &str, employee_id: Option<i32>) -> NewUser {
    NewUser {
        login: login.into(),
        password: "s3cret-passw0rd".into(),
        employee_id,
    }
}

#[tokio::test]
async fn passwords_are_hashed_and_never_serialised() {
    let db = common::setup().await;
    let created = user::create(&db, new_user("ada", None)).await.unwrap();
    assert_eq!(user::get(&db, created.id).await.unwrap(), created);

    assert!(user::check_password(&db, created.id, "s3cret-passw0rd").await.unwrap());
    assert!(!user::check_password(&db, created.id, "wrong").await.unwrap());

    let json = serde_json::to_value(&created).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"id": created.id, "login": "ada", "employee_id": null})
    );
}

#[test]
fn legacy_passw_field_is_accepted() {
    let input: NewUser =
        serde_json::from_str(r#"{"login": "ada", "passw": "long-enough"}"#).unwrap();
    assert_eq!(input.password, "long-enough");
    assert!(!format!("{input:?}").contains("long-enough"));
}

#[tokio::test]
async fn one_account_per_employee() {
    let db = common::setup().await;
    let grace = common::employee(&db, "Grace").await;
    user::create(&db, new_user("grace", Some(grace.id)))
        .await
        .unwrap();
    let err = user::create(&db, new_user("grace2", Some(grace.id)))
        .await
        .unwrap_err();
    match err {
        HrError::Conflict(message) => assert_eq!(message, "user employee_id is already in use"),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn logins_are_unique() {
    let db = common::setup().await;
    user::create(&db, new_user("ada", None)).await.unwrap();
    let err = user::create(&db, new_user("ada", None)).await.unwrap_err();
    match err {
        HrError::Conflict(message) => assert_eq!(message, "user login is already in use"),
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(user::list(&db, Page::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_employee_conflicts() {
    let db = common::setup().await;
    assert!(matches!(
        user::create(&db, new_user("ghost", Some(12))).await,
        Err(HrError::Conflict(_))
    ));
}

#[tokio::test]
async fn short_password_is_a_validation_error() {
    let db = common::setup().await;
    let err = user::create(
        &db,
        NewUser {
            login: "ada".into(),
            password: "short".into(),
            employee_id: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, HrError::Validation(_)));
}

#[tokio::test]
async fn password_update_rehashes_and_keeps_login() {
    let db = common::setup().await;
    let grace = common::employee(&db, "Grace").await;
    let created = user::create(&db, new_user("grace", Some(grace.id)))
        .await
        .unwrap();
    let updated = user::update(
        &db,
        created.id,
        UserPatch {
            password: Some("another-passphrase".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated, created);
    assert!(user::check_password(&db, created.id, "another-passphrase").await.unwrap());
    assert!(!user::check_password(&db, created.id, "s3cret-passw0rd").await.unwrap());

    let detached = user::update(
        &db,
        created.id,
        serde_json::from_str(r#"{"employee_id": null}"#).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(detached.employee_id, None);
    assert_eq!(detached.login, "grace");
}

#[tokio::test]
async fn missing_user_is_not_found() {
    let db = common::setup().await;
    assert!(matches!(
        user::get(&db, 1).await,
        Err(HrError::NotFound { entity: "user", id: 1 })
    ));
    assert!(matches!(
        user::update(&db, 1, UserPatch::default()).await,
        Err(HrError::NotFound { .. })
    ));
    assert!(matches!(user::delete(&db, 1).await, Err(HrError::NotFound { .. })));
}

#[test]
fn user_patch_rejects_null_login_and_password() {
    for body in [r#"{"login": null}"#, r#"{"passw": null}"#] {
        assert!(serde_json::from_str::<UserPatch>(body).is_err(), "{body}");
    }
}
