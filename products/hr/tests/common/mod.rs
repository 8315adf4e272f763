#![allow(dead_code)]

use migration::{Migrator, MigratorTrait};
use products_hr::department::{self, Department, NewDepartment};
use products_hr::employee::{self, Employee, NewEmployee};
use products_hr::job::{self, Job, NewJob};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};

/// Fresh in-memory SQLite database with the real migrations applied.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "PRAGMA foreign_keys = ON;".to_string(),
    ))
    .await
    .unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn department(db: &DatabaseConnection, name: &str) -> Department {
    department::create(
        db,
        NewDepartment {
            name: name.into(),
            leader_id: None,
        },
    )
    .await
    .unwrap()
}

pub async fn employee(db: &DatabaseConnection, name: &str) -> Employee {
    employee::create(
        db,
        NewEmployee {
            name: name.into(),
            email: None,
        },
    )
    .await
    .unwrap()
}

pub async fn job(db: &DatabaseConnection, name: &str, code: Option<&str>, department_id: i32) -> Job {
    job::create(
        db,
        NewJob {
            name: name.into(),
            code: code.map(Into::into),
            department_id,
        },
    )
    .await
    .unwrap()
}
