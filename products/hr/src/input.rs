//! Input shaping shared by the entity modules: paging, patch fields and
//! field validation.

use sea_orm::{EntityTrait, QuerySelect, Select};
use serde::{Deserialize, Deserializer, de};

use crate::error::{HrError, HrResult};

pub const MAX_PAGE_SIZE: u64 = 200;
/// Largest offset the query binders accept (they bind as `i64`).
pub const MAX_OFFSET: u64 = i64::MAX as u64;
pub(crate) const NAME_MAX: usize = 255;
pub(crate) const EMAIL_MAX: usize = 255;
pub(crate) const LOGIN_MAX: usize = 150;
pub(crate) const JOB_CODE_MAX: usize = 4;
pub(crate) const PASSWORD_MIN: usize = 8;
pub(crate) const PASSWORD_MAX: usize = 1024;

/// Optional window over a listing. Rows are always ordered by id.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Page {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl Page {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    pub(crate) fn apply<E: EntityTrait>(self, query: Select<E>) -> HrResult<Select<E>> {
        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_PAGE_SIZE {
                return Err(HrError::validation(format!(
                    "limit must be between 1 and {MAX_PAGE_SIZE}"
                )));
            }
        }
        if self.offset.is_some_and(|offset| offset > MAX_OFFSET) {
            return Err(HrError::validation(format!(
                "offset must be at most {MAX_OFFSET}"
            )));
        }
        // SQLite rejects OFFSET without LIMIT.
        let limit = match (self.offset, self.limit) {
            (Some(_), None) => Some(MAX_OFFSET),
            (_, limit) => limit,
        };
        Ok(query.offset(self.offset).limit(limit))
    }
}

/// Deserialize a nullable patch field so that an absent key stays `None`
/// while an explicit `null` becomes `Some(None)`.
///
/// Pair with `#[serde(default)]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize a patch field that may be omitted but never cleared: an
/// explicit `null` is rejected. Pair with `#[serde(default)]`.
pub fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)?
        .map(Some)
        .ok_or_else(|| de::Error::custom("value must not be null"))
}

pub(crate) fn required_text(field: &str, value: &str, max: usize) -> HrResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HrError::validation(format!("{field} is required")));
    }
    ensure_max_len(field, trimmed, max)?;
    Ok(trimmed.to_string())
}

pub(crate) fn job_code(value: Option<&str>) -> HrResult<Option<String>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HrError::validation("code must not be blank"));
    }
    ensure_max_len("code", trimmed, JOB_CODE_MAX)?;
    Ok(Some(trimmed.to_string()))
}

pub(crate) fn email(value: Option<&str>) -> HrResult<Option<String>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    ensure_max_len("email", trimmed, EMAIL_MAX)?;
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(Some(trimmed.to_lowercase()))
        }
        _ => Err(HrError::validation("email must look like name@domain")),
    }
}

pub(crate) fn password(value: &str) -> HrResult<&str> {
    let len = value.chars().count();
    if len < PASSWORD_MIN {
        return Err(HrError::validation(format!(
            "password must be at least {PASSWORD_MIN} characters"
        )));
    }
    if len > PASSWORD_MAX {
        return Err(HrError::validation(format!(
            "password must be at most {PASSWORD_MAX} characters"
        )));
    }
    Ok(value)
}

fn ensure_max_len(field: &str, value: &str, max: usize) -> HrResult<()> {
    if value.chars().count() > max {
        return Err(HrError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}
