use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::department::{self, Department, DepartmentPatch, NewDepartment};
use crate::employee::{self, Employee, NewEmployee};
use crate::error::HrResult;
use crate::job::{self, Job, NewJob};
use crate::user::{self, NewUser, User};

#[derive(Debug, Clone)]
pub struct SeededRecords {
    pub department: Department,
    pub leader: Employee,
    pub jobs: Vec<Job>,
    pub user: User,
}

/// Insert a small demo organisation in one transaction. Running it twice
/// fails with a conflict and leaves the first run untouched.
pub async fn demo(db: &DatabaseConnection, admin_password: &str) -> HrResult<SeededRecords> {
    let txn = db.begin().await?;
    let leader = employee::create(
        &txn,
        NewEmployee {
            name: "Grace Hopper".into(),
            email: Some("grace@staffing.test".into()),
        },
    )
    .await?;
    let engineering = department::create(
        &txn,
        NewDepartment {
            name: "Engineering".into(),
            leader_id: None,
        },
    )
    .await?;
    let department = department::update(
        &txn,
        engineering.id,
        DepartmentPatch {
            leader_id: Some(Some(leader.id)),
            ..Default::default()
        },
    )
    .await?;
    let mut jobs = Vec::new();
    for (name, code) in [("Backend Dev", "BKND"), ("Frontend Dev", "FRND")] {
        let job = job::create(
            &txn,
            NewJob {
                name: name.into(),
                code: Some(code.into()),
                department_id: department.id,
            },
        )
        .await?;
        jobs.push(job);
    }
    let user = user::create(
        &txn,
        NewUser {
            login: "admin".into(),
            password: admin_password.into(),
            employee_id: Some(leader.id),
        },
    )
    .await?;
    txn.commit().await?;
    info!(department = department.id, jobs = jobs.len(), "demo data seeded");
    Ok(SeededRecords {
        department,
        leader,
        jobs,
        user,
    })
}
