use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use platform_api::{ApiJson, ApiPath, ApiQuery, ApiResult};
use products_hr::{
    Page,
    department::{self, Department, DepartmentPatch, NewDepartment},
    job::Job,
};

use crate::http::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list).post(create))
        .route(
            "/departments/{id}",
            get(read).put(update).patch(update).delete(remove),
        )
        .route("/departments/{id}/jobs", get(jobs))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewDepartment>,
) -> ApiResult<(StatusCode, Json<Department>)> {
    let created = department::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<Page>,
) -> ApiResult<Json<Vec<Department>>> {
    Ok(Json(department::list(&state.db, page).await?))
}

async fn read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Department>> {
    Ok(Json(department::get(&state.db, id).await?))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<DepartmentPatch>,
) -> ApiResult<Json<Department>> {
    Ok(Json(department::update(&state.db, id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    department::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn jobs(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Vec<Job>>> {
    Ok(Json(department::jobs(&state.db, id).await?))
}
