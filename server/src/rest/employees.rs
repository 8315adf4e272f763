use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use platform_api::{ApiJson, ApiPath, ApiQuery, ApiResult};
use products_hr::{
    Page,
    employee::{self, Employee, EmployeePatch, NewEmployee},
};

use crate::http::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list).post(create))
        .route(
            "/employees/{id}",
            get(read).put(update).patch(update).delete(remove),
        )
}

async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewEmployee>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let created = employee::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<Page>,
) -> ApiResult<Json<Vec<Employee>>> {
    Ok(Json(employee::list(&state.db, page).await?))
}

async fn read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Employee>> {
    Ok(Json(employee::get(&state.db, id).await?))
}

async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<EmployeePatch>,
) -> ApiResult<Json<Employee>> {
    Ok(Json(employee::update(&state.db, id, patch).await?))
}

async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    employee::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
