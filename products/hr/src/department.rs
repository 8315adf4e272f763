use entity::{department, job};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, EntityTrait, ModelTrait, QueryOrder,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{HrError, HrResult};
use crate::input::{self, NAME_MAX, Page};
use crate::job::Job;

const TABLE: &str = "department";
const UNIQUE: &[&str] = &["name"];

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewDepartment {
    pub name: String,
    #[serde(default)]
    pub leader_id: Option<i32>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepartmentPatch {
    #[serde(default, deserialize_with = "input::non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "input::nullable")]
    pub leader_id: Option<Option<i32>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i32,
    pub name: String,
    pub leader_id: Option<i32>,
}

impl From<department::Model> for Department {
    fn from(model: department::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            leader_id: model.leader_id,
        }
    }
}

#[instrument(name = "hr.department.create", skip_all)]
pub async fn create<C: ConnectionTrait>(db: &C, input: NewDepartment) -> HrResult<Department> {
    let name = input::required_text("name", &input.name, NAME_MAX)?;
    let model = department::ActiveModel {
        name: Set(name),
        leader_id: Set(input.leader_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| HrError::from_write(TABLE, UNIQUE, err))?;
    info!(id = model.id, "department created");
    Ok(model.into())
}

#[instrument(name = "hr.department.get", skip(db))]
pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<Department> {
    find(db, id).await.map(Into::into)
}

#[instrument(name = "hr.department.list", skip(db))]
pub async fn list<C: ConnectionTrait>(db: &C, page: Page) -> HrResult<Vec<Department>> {
    let query = department::Entity::find().order_by_asc(department::Column::Id);
    let rows = page.apply(query)?.all(db).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

#[instrument(name = "hr.department.update", skip(db, patch))]
pub async fn update<C: TransactionTrait>(
    db: &C,
    id: i32,
    patch: DepartmentPatch,
) -> HrResult<Department> {
    let txn = db.begin().await?;
    let existing = find(&txn, id).await?;
    let mut active: department::ActiveModel = existing.clone().into();
    let mut changed = false;
    if let Some(name) = &patch.name {
        active.name = Set(input::required_text("name", name, NAME_MAX)?);
        changed = true;
    }
    if let Some(leader_id) = patch.leader_id {
        active.leader_id = Set(leader_id);
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
    info!(id, "department updated");
    Ok(updated.into())
}

/// Rejected with a conflict while any job still belongs to the department.
#[instrument(name = "hr.department.delete", skip(db))]
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<()> {
    let result = department::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|err| HrError::from_delete(TABLE, id, err))?;
    if result.rows_affected == 0 {
        return Err(HrError::not_found(TABLE, id));
    }
    info!(id, "department deleted");
    Ok(())
}

/// Jobs belonging to department `id`, ordered by job id.
#[instrument(name = "hr.department.jobs", skip(db))]
pub async fn jobs<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<Vec<Job>> {
    let department = find(db, id).await?;
    let rows = department
        .find_related(job::Entity)
        .order_by_asc(job::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

async fn find<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<department::Model> {
    department::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| HrError::not_found(TABLE, id))
}
