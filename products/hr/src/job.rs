use entity::{department, job};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, EntityTrait, ModelTrait, QueryOrder,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::department::Department;
use crate::error::{HrError, HrResult};
use crate::input::{self, NAME_MAX, Page};

const TABLE: &str = "job";
const UNIQUE: &[&str] = &["name", "code"];

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewJob {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    pub department_id: i32,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobPatch {
    #[serde(default, deserialize_with = "input::non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "input::nullable")]
    pub code: Option<Option<String>>,
    #[serde(default, deserialize_with = "input::non_null")]
    pub department_id: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: i32,
    pub name: String,
    pub code: Option<String>,
    pub department_id: i32,
}

impl From<job::Model> for Job {
    fn from(model: job::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code: model.code,
            department_id: model.department_id,
        }
    }
}

/// A missing department surfaces as a conflict from the foreign key, the
/// same way a duplicate name or code does.
#[instrument(name = "hr.job.create", skip_all, fields(department_id = input.department_id))]
pub async fn create<C: ConnectionTrait>(db: &C, input: NewJob) -> HrResult<Job> {
    let name = input::required_text("name", &input.name, NAME_MAX)?;
    let code = input::job_code(input.code.as_deref())?;
    let model = job::ActiveModel {
        name: Set(name),
        code: Set(code),
        department_id: Set(input.department_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| HrError::from_write(TABLE, UNIQUE, err))?;
    info!(id = model.id, "job created");
    Ok(model.into())
}

#[instrument(name = "hr.job.get", skip(db))]
pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<Job> {
    find(db, id).await.map(Into::into)
}

#[instrument(name = "hr.job.list", skip(db))]
pub async fn list<C: ConnectionTrait>(db: &C, page: Page) -> HrResult<Vec<Job>> {
    let query = job::Entity::find().order_by_asc(job::Column::Id);
    let rows = page.apply(query)?.all(db).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

#[instrument(name = "hr.job.update", skip(db, patch))]
pub async fn update<C: TransactionTrait>(db: &C, id: i32, patch: JobPatch) -> HrResult<Job> {
    let txn = db.begin().await?;
    let existing = find(&txn, id).await?;
    let mut active: job::ActiveModel = existing.clone().into();
    let mut changed = false;
    if let Some(name) = &patch.name {
        active.name = Set(input::required_text("name", name, NAME_MAX)?);
        changed = true;
    }
    if let Some(code) = &patch.code {
        active.code = Set(input::job_code(code.as_deref())?);
        changed = true;
    }
    if let Some(department_id) = patch.department_id {
        active.department_id = Set(department_id);
        changed = true;
    }
    if !changed {
        return Ok(existing.into());
    }
    let updated = active
        .update(&txn)
        .await
        .map_err(|err| HrError::from_write(TABLE, UNIQUE, err))?;
    txn.commit().await?;
    info!(id, "job updated");
    Ok(updated.into())
}

#[instrument(name = "hr.job.delete", skip(db))]
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<()> {
    let result = job::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|err| HrError::from_delete(TABLE, id, err))?;
    if result.rows_affected == 0 {
        return Err(HrError::not_found(TABLE, id));
    }
    info!(id, "job deleted");
    Ok(())
}

/// The department job `id` belongs to.
#[instrument(name = "hr.job.department", skip(db))]
pub async fn department<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<Department> {
    let job = find(db, id).await?;
    job.find_related(department::Entity)
        .one(db)
        .await?
        .map(Into::into)
        .ok_or_else(|| HrError::not_found("department", job.department_id))
}

async fn find<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<job::Model> {
    job::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| HrError::not_found(TABLE, id))
}
