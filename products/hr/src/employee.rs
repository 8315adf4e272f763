use entity::employee;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, EntityTrait, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{HrError, HrResult};
use crate::input::{self, NAME_MAX, Page};

const TABLE: &str = "employee";
const UNIQUE: &[&str] = &["email"];

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewEmployee {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeePatch {
    #[serde(default, deserialize_with = "input::non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "input::nullable")]
    pub email: Option<Option<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
}

impl From<employee::Model> for Employee {
    fn from(model: employee::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
        }
    }
}

#[instrument(name = "hr.employee.create", skip_all)]
pub async fn create<C: ConnectionTrait>(db: &C, input: NewEmployee) -> HrResult<Employee> {
    let name = input::required_text("name", &input.name, NAME_MAX)?;
    let email = input::email(input.email.as_deref())?;
    let model = employee::ActiveModel {
        name: Set(name),
        email: Set(email),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| HrError::from_write(TABLE, UNIQUE, err))?;
    info!(id = model.id, "employee created");
    Ok(model.into())
}

#[instrument(name = "hr.employee.get", skip(db))]
pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<Employee> {
    find(db, id).await.map(Into::into)
}

#[instrument(name = "hr.employee.list", skip(db))]
pub async fn list<C: ConnectionTrait>(db: &C, page: Page) -> HrResult<Vec<Employee>> {
    let query = employee::Entity::find().order_by_asc(employee::Column::Id);
    let rows = page.apply(query)?.all(db).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

#[instrument(name = "hr.employee.update", skip(db, patch))]
pub async fn update<C: TransactionTrait>(
    db: &C,
    id: i32,
    patch: EmployeePatch,
) -> HrResult<Employee> {
    let txn = db.begin().await?;
    let existing = find(&txn, id).await?;
    let mut active: employee::ActiveModel = existing.clone().into();
    let mut changed = false;
    if let Some(name) = &patch.name {
        active.name = Set(input::required_text("name", name, NAME_MAX)?);
        changed = true;
    }
    if let Some(email) = &patch.email {
        active.email = Set(input::email(email.as_deref())?);
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
    info!(id, "employee updated");
    Ok(updated.into())
}

/// Rejected while a user account points at the employee. Departments led by
/// the employee lose their leader instead.
#[instrument(name = "hr.employee.delete", skip(db))]
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<()> {
    let result = employee::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|err| HrError::from_delete(TABLE, id, err))?;
    if result.rows_affected == 0 {
        return Err(HrError::not_found(TABLE, id));
    }
    info!(id, "employee deleted");
    Ok(())
}

async fn find<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<employee::Model> {
    employee::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| HrError::not_found(TABLE, id))
}
