use std::fmt;

use entity::user;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, EntityTrait, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{HrError, HrResult};
use crate::input::{self, LOGIN_MAX, Page};
use crate::password::{hash_password, verify_password};

const TABLE: &str = "user";
const UNIQUE: &[&str] = &["login", "employee_id"];

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub login: String,
    #[serde(alias = "passw")]
    pub password: String,
    #[serde(default)]
    pub employee_id: Option<i32>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("employee_id", &self.employee_id)
            .finish()
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default, deserialize_with = "input::non_null")]
    pub login: Option<String>,
    #[serde(default, alias = "passw", deserialize_with = "input::non_null")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "input::nullable")]
    pub employee_id: Option<Option<i32>>,
}

impl fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPatch")
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("employee_id", &self.employee_id)
            .finish()
    }
}

/// Public view of an account; the password hash never leaves this module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub employee_id: Option<i32>,
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            login: model.login,
            employee_id: model.employee_id,
        }
    }
}

#[instrument(name = "hr.user.create", skip_all)]
pub async fn create<C: ConnectionTrait>(db: &C, input: NewUser) -> HrResult<User> {
    let login = input::required_text("login", &input.login, LOGIN_MAX)?;
    let password_hash = hash_password(input::password(&input.password)?)?;
    let model = user::ActiveModel {
        login: Set(login),
        password_hash: Set(password_hash),
        employee_id: Set(input.employee_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| HrError::from_write(TABLE, UNIQUE, err))?;
    info!(id = model.id, "user created");
    Ok(model.into())
}

#[instrument(name = "hr.user.get", skip(db))]
pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<User> {
    find(db, id).await.map(Into::into)
}

#[instrument(name = "hr.user.list", skip(db))]
pub async fn list<C: ConnectionTrait>(db: &C, page: Page) -> HrResult<Vec<User>> {
    let query = user::Entity::find().order_by_asc(user::Column::Id);
    let rows = page.apply(query)?.all(db).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

#[instrument(name = "hr.user.update", skip(db, patch))]
pub async fn update<C: TransactionTrait>(db: &C, id: i32, patch: UserPatch) -> HrResult<User> {
    let txn = db.begin().await?;
    let existing = find(&txn, id).await?;
    let mut active: user::ActiveModel = existing.clone().into();
    let mut changed = false;
    if let Some(login) = &patch.login {
        active.login = Set(input::required_text("login", login, LOGIN_MAX)?);
        changed = true;
    }
    if let Some(password) = &patch.password {
        active.password_hash = Set(hash_password(input::password(password)?)?);
        changed = true;
    }
    if let Some(employee_id) = patch.employee_id {
        active.employee_id = Set(employee_id);
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
    info!(id, "user updated");
    Ok(updated.into())
}

#[instrument(name = "hr.user.delete", skip(db))]
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<()> {
    let result = user::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|err| HrError::from_delete(TABLE, id, err))?;
    if result.rows_affected == 0 {
        return Err(HrError::not_found(TABLE, id));
    }
    info!(id, "user deleted");
    Ok(())
}

/// Whether `password` matches the stored hash of user `id`.
#[instrument(name = "hr.user.check_password", skip(db, password))]
pub async fn check_password<C: ConnectionTrait>(db: &C, id: i32, password: &str) -> HrResult<bool> {
    let model = find(db, id).await?;
    verify_password(password, &model.password_hash)
}

async fn find<C: ConnectionTrait>(db: &C, id: i32) -> HrResult<user::Model> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| HrError::not_found(TABLE, id))
}
